//! Generic assembly of a stub chain: pool, round robin, decorators.

use std::sync::Arc;

use crate::error::GrpcResult;
use crate::options::ClientOptions;
use crate::tracing_options::{TracingOptions, RPC_COMPONENT};

/// Decorators a stub capability set provides to [`build_connection`].
///
/// Implemented for each service's stub trait object, e.g.
/// `impl StubDecorators for dyn PublisherStub`.
pub trait StubDecorators {
  /// Spread calls over `children` in turn. Fails on an empty pool.
  fn round_robin(children: Vec<Arc<Self>>) -> GrpcResult<Arc<Self>>;

  /// Log every call made through `child`.
  fn with_logging(child: Arc<Self>, options: TracingOptions) -> Arc<Self>;
}

/// Assemble the stub chain for one client
///
/// Builds `options.connection_pool_size()` raw stubs through `factory`
/// (called with each index in order), puts them behind a round-robin pool
/// and, when the `rpc` tracing component is enabled, wraps the pool in the
/// logging decorator. The first factory error aborts the assembly.
///
/// # Example
/// ```ignore
/// let stub: Arc<dyn PublisherStub> = build_connection(&options, |options, _| {
///     Ok(Arc::new(GrpcPublisherStub::connect(options)?) as Arc<dyn PublisherStub>)
/// })?;
/// ```
pub fn build_connection<S, F>(options: &ClientOptions, mut factory: F) -> GrpcResult<Arc<S>>
where
  S: StubDecorators + ?Sized,
  F: FnMut(&ClientOptions, usize) -> GrpcResult<Arc<S>>,
{
  let pool_size = options.connection_pool_size();
  let children = (0..pool_size)
    .map(|index| factory(options, index))
    .collect::<GrpcResult<Vec<_>>>()?;

  let mut stub = S::round_robin(children)?;
  let logging = options.tracing_options().is_enabled(RPC_COMPONENT);
  if logging {
    stub = S::with_logging(stub, options.tracing_options().clone());
  }

  tracing::debug!(
    target: "grpc_client",
    pool_size,
    logging,
    "Assembled stub chain"
  );
  Ok(stub)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::GrpcError;
  use crate::options::ServiceProfile;
  use std::sync::atomic::{AtomicUsize, Ordering};

  trait Named: Send + Sync {
    fn name(&self) -> String;
  }

  struct Leaf(usize);

  impl Named for Leaf {
    fn name(&self) -> String {
      format!("leaf-{}", self.0)
    }
  }

  struct Pool {
    children: Vec<Arc<dyn Named>>,
    next: AtomicUsize,
  }

  impl Named for Pool {
    fn name(&self) -> String {
      let index = self.next.fetch_add(1, Ordering::Relaxed) % self.children.len();
      self.children[index].name()
    }
  }

  struct Logged(Arc<dyn Named>);

  impl Named for Logged {
    fn name(&self) -> String {
      format!("logged:{}", self.0.name())
    }
  }

  impl StubDecorators for dyn Named {
    fn round_robin(children: Vec<Arc<Self>>) -> GrpcResult<Arc<Self>> {
      if children.is_empty() {
        return Err(GrpcError::InvalidConfig("empty pool".to_string()));
      }
      Ok(Arc::new(Pool {
        children,
        next: AtomicUsize::new(0),
      }))
    }

    fn with_logging(child: Arc<Self>, _options: TracingOptions) -> Arc<Self> {
      Arc::new(Logged(child))
    }
  }

  fn options(pool_size: usize, tracing: bool) -> ClientOptions {
    let tracing_options = if tracing {
      TracingOptions::default().enable(RPC_COMPONENT)
    } else {
      TracingOptions::default()
    };
    ClientOptions::resolve(ServiceProfile::PUBSUB, None, Some("localhost:8085"))
      .with_connection_pool_size(pool_size)
      .with_tracing_options(tracing_options)
  }

  #[test]
  fn test_factory_called_once_per_channel() {
    let mut indexes = Vec::new();
    let stub: Arc<dyn Named> = build_connection(&options(3, false), |_, index| {
      indexes.push(index);
      Ok(Arc::new(Leaf(index)) as Arc<dyn Named>)
    })
    .unwrap();

    assert_eq!(indexes, vec![0, 1, 2]);
    let names: Vec<_> = (0..4).map(|_| stub.name()).collect();
    assert_eq!(names, vec!["leaf-0", "leaf-1", "leaf-2", "leaf-0"]);
  }

  #[test]
  fn test_logging_wraps_pool_when_enabled() {
    let stub: Arc<dyn Named> =
      build_connection(&options(2, true), |_, index| Ok(Arc::new(Leaf(index)) as Arc<dyn Named>))
        .unwrap();
    assert_eq!(stub.name(), "logged:leaf-0");
    assert_eq!(stub.name(), "logged:leaf-1");
  }

  #[test]
  fn test_first_failure_aborts_assembly() {
    let mut calls = 0;
    let result: GrpcResult<Arc<dyn Named>> = build_connection(&options(4, false), |_, index| {
      calls += 1;
      if index == 1 {
        Err(GrpcError::InvalidConfig("bad endpoint".to_string()))
      } else {
        Ok(Arc::new(Leaf(index)) as Arc<dyn Named>)
      }
    });

    assert!(matches!(result, Err(GrpcError::InvalidConfig(_))));
    assert_eq!(calls, 2);
  }
}
