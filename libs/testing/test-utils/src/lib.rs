//! Shared test utilities for client testing
//!
//! This crate provides reusable test infrastructure for the client crates:
//! - `CaptureLogLines`: a log sink that records every formatted line
//! - `TestDataBuilder`: deterministic resource names
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{CaptureLogLines, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_logging_test() {
//!     let logs = CaptureLogLines::new();
//!     let _guard = logs.install();
//!
//!     let builder = TestDataBuilder::from_test_name("my_logging_test");
//!     let topic = builder.topic_name("main");
//!     // ... issue calls ...
//!
//!     assert_eq!(logs.lines_containing("<< response").len(), 1);
//! }
//! ```

mod capture;

pub use capture::CaptureLogLines;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving names from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_topic");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Project id unique to this builder's seed
    pub fn project_id(&self) -> String {
        format!("test-project-{}", self.seed)
    }

    /// `projects/{project}`
    pub fn project_name(&self) -> String {
        format!("projects/{}", self.project_id())
    }

    /// Fully qualified topic name
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.topic_name("orders"), "projects/test-project-7/topics/orders");
    /// ```
    pub fn topic_name(&self, topic: &str) -> String {
        format!("{}/topics/{}", self.project_name(), topic)
    }

    /// Fully qualified subscription name
    pub fn subscription_name(&self, subscription: &str) -> String {
        format!("{}/subscriptions/{}", self.project_name(), subscription)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that exactly one line contains `needle` and return it
    pub fn assert_single_line(lines: &[String], needle: &str) -> String {
        let matching: Vec<&String> = lines.iter().filter(|line| line.contains(needle)).collect();
        assert_eq!(
            matching.len(),
            1,
            "expected exactly one line containing {needle:?}, got {matching:#?}"
        );
        matching[0].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.topic_name("t"), builder2.topic_name("t"));
        assert_eq!(
            builder1.subscription_name("s"),
            "projects/test-project-42/subscriptions/s"
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        // Different test names should generate different data
        assert_ne!(builder1.project_id(), builder2.project_id());
    }

    #[test]
    fn test_assert_single_line() {
        let lines = vec!["a >> request".to_string(), "a << response".to_string()];
        assert_eq!(assertions::assert_single_line(&lines, "<<"), "a << response");
    }
}
