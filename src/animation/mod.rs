//! Frame-stepped animation primitives.
//!
//! Nothing here reads a clock: owners call `advance(dt)` once per frame, which
//! keeps every animation deterministic under test.

pub mod animator;
pub mod easing;
pub mod glow;
pub mod spring;
pub mod tween;

pub use animator::{ListenerId, ValueAnimator};
pub use easing::Easing;
pub use glow::GlowLoop;
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
