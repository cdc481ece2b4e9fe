pub mod camera;
pub mod home;
pub mod learn;
pub mod profile;
pub mod progress;
