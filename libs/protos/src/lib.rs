//! Protobuf messages and tonic clients for the remote services.
//!
//! The `generated` tree is produced by buf with the prost and tonic plugins;
//! messages additionally derive `serde::Serialize` so RPC payloads can be
//! rendered into log records.

pub mod google {
    pub mod protobuf {
        include!("generated/google/protobuf/google.protobuf.rs");
    }

    pub mod pubsub {
        pub mod v1 {
            include!("generated/google/pubsub/v1/google.pubsub.v1.rs");
        }
    }
}

pub mod serde_bytes {
    //! Serializers referenced from field attributes in generated code.

    use serde::Serializer;

    /// Renders a `bytes` field as (lossy) UTF-8 text instead of a number array.
    pub fn lossy_utf8<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&String::from_utf8_lossy(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::google::pubsub::v1::{PubsubMessage, Topic};
    use prost::Message;

    #[test]
    fn test_topic_wire_roundtrip_keeps_name() {
        let topic = Topic {
            name: "projects/test-project/topics/test-topic".to_string(),
            ..Default::default()
        };
        let decoded = Topic::decode(topic.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, topic);
    }

    #[test]
    fn test_message_data_serializes_as_text() {
        let message = PubsubMessage {
            data: b"hello".to_vec(),
            ..Default::default()
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["data"], "hello");
    }
}
