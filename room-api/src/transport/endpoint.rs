/// POST, body is a [crate::request::ToggleCameraRequest]
pub const TOGGLE_CAMERA_PATH: &str = "/api/toggle-camera";
/// GET, no body
pub const ACCEPT_MEETING_PATH: &str = "/api/accept-meeting";
