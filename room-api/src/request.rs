use serde::{Deserialize, Serialize};

/// Body of the toggle camera call.
/// Carries the state the camera should end up in, not a relative "flip" instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleCameraRequest {
    /// Desired camera state, `true` for on.
    #[serde(rename = "cameraState")]
    pub camera_state: bool,
}

impl ToggleCameraRequest {
    pub fn new(camera_state: bool) -> Self {
        Self { camera_state }
    }
}
