//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod retry;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use retry::{with_retry, RetryPolicy, Retryable};
pub use test_dependencies::{MockAI, MockContentSource, TestDependencies};
pub use traits::*;
