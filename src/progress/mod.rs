//! The animated progress page and the snapshot it is drawn from.

pub mod badge;
pub mod bars;
pub mod counter;
pub mod ring;
pub mod screen;

pub use badge::{AchievementBadge, BadgePress};
pub use bars::ActivityBarSeries;
pub use counter::AnimatedCounter;
pub use ring::{RingCell, RingGeometry};
pub use screen::{Period, ProgressScreen, ProgressSettings};
