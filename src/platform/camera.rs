use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera permission was not granted")]
    PermissionDenied,

    #[error("no camera is available")]
    Unavailable,

    #[error("capture failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub uri: String,
}

/// Platform camera capability.
pub trait Camera {
    /// Ask for access. Returns whether it was granted.
    fn request_permission(&mut self) -> bool;

    fn take_picture(&mut self) -> Result<CapturedImage, CaptureError>;
}

/// Stand-in camera for terminals: grants access when asked and hands back a
/// numbered placeholder image per shot.
#[derive(Debug, Default)]
pub struct SimulatedCamera {
    granted: bool,
    shots: u32,
}

impl SimulatedCamera {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Camera for SimulatedCamera {
    fn request_permission(&mut self) -> bool {
        self.granted = true;
        info!("camera permission granted");
        true
    }

    fn take_picture(&mut self) -> Result<CapturedImage, CaptureError> {
        if !self.granted {
            return Err(CaptureError::PermissionDenied);
        }
        self.shots += 1;
        let image = CapturedImage {
            uri: format!("capture-{:03}.jpg", self.shots),
        };
        debug!("captured {}", image.uri);
        Ok(image)
    }
}

/// A device without a camera.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCamera;

impl Camera for UnavailableCamera {
    fn request_permission(&mut self) -> bool {
        false
    }

    fn take_picture(&mut self) -> Result<CapturedImage, CaptureError> {
        Err(CaptureError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_requires_permission() {
        let mut camera = SimulatedCamera::new();
        assert_eq!(camera.take_picture(), Err(CaptureError::PermissionDenied));
        assert!(camera.request_permission());
        assert_eq!(camera.take_picture().unwrap().uri, "capture-001.jpg");
        assert_eq!(camera.take_picture().unwrap().uri, "capture-002.jpg");
    }

    #[test]
    fn test_unavailable_never_captures() {
        let mut camera = UnavailableCamera;
        assert!(!camera.request_permission());
        assert_eq!(camera.take_picture(), Err(CaptureError::Unavailable));
    }
}
