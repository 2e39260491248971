use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;

use crate::client::CameraTogglePolicy;

const DEFAULT_ROOM_CONTROL_URL: &str = "http://localhost:5000";
const DEFAULT_ROOM_NAME: &str = "Meeting Room";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin of the room-control backend
    pub room_control_url: String,
    /// Shown on the screen only, every call goes to the same backend
    pub room_name: String,
    pub camera_policy: CameraTogglePolicy,
    pub request_timeout: Duration,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let room_control_url =
            env::var("ROOM_CONTROL_URL").unwrap_or_else(|_| DEFAULT_ROOM_CONTROL_URL.to_owned());
        let room_name = env::var("ROOM_NAME")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROOM_NAME.to_owned());
        let camera_policy = match env::var("CAMERA_TOGGLE_POLICY") {
            Ok(value) => value
                .parse::<CameraTogglePolicy>()
                .context("invalid CAMERA_TOGGLE_POLICY")?,
            Err(_) => CameraTogglePolicy::default(),
        };
        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_owned()).into();

        Ok(Self {
            room_control_url,
            room_name,
            camera_policy,
            request_timeout,
            log_dir,
        })
    }
}
