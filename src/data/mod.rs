pub mod mock;
pub mod provider;

pub use mock::{bundled_lesson, MockProvider};
pub use provider::{FetchError, ProgressProvider};
