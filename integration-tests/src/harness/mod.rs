mod fixtures;
pub mod tracing;

pub use fixtures::{clf_line, hit, hits};
pub use tracing::{CapturedEvent, init_test_tracing};
