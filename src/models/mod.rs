pub mod color;
pub mod error;
pub mod icon;
pub mod lesson;
pub mod progress;

pub use color::HexColor;
pub use error::DataError;
pub use icon::Icon;
pub use lesson::{LearningStep, Lesson};
pub use progress::{Achievement, DailyActivity, ProgressScreenData, ProgressStats, Rarity};
