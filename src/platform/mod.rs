//! Device capabilities the views lean on. Each may be missing; callers fall
//! back quietly.

pub mod camera;
pub mod haptics;

pub use camera::{Camera, CaptureError, CapturedImage, SimulatedCamera, UnavailableCamera};
pub use haptics::{HapticKind, Haptics, TerminalHaptics};
