use std::{fmt, future::Future, pin::Pin, str::FromStr, sync::Arc};

use room_api::{
    request::ToggleCameraRequest,
    response::{RemoteCallFailure, RemoteResponse},
    transport::client::RoomControlTransport,
};
use tracing::{error, info, warn};

use crate::state_store::DeviceState;

#[cfg(test)]
pub(crate) mod scripted;

/// A remote call which has been started but not reconciled yet.
/// Owns everything it needs, so it can be spawned on its own task.
pub type PendingCall = Pin<Box<dyn Future<Output = Completion> + Send>>;

/// When the camera flag is written relative to the backend call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraTogglePolicy {
    /// Send the desired state and write it only after the backend confirmed it
    #[default]
    ConfirmThenCommit,
    /// Flip the flag locally without contacting the backend
    Optimistic,
}

impl FromStr for CameraTogglePolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "confirm" | "confirm-then-commit" => Ok(CameraTogglePolicy::ConfirmThenCommit),
            "optimistic" => Ok(CameraTogglePolicy::Optimistic),
            other => Err(anyhow::anyhow!(
                "unknown camera toggle policy '{}', expected 'confirm' or 'optimistic'",
                other
            )),
        }
    }
}

/// Issue order of camera requests, later requests have greater tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a [PendingCall], carrying what is needed to reconcile it
#[derive(Debug)]
pub enum Completion {
    Camera {
        token: RequestToken,
        desired: bool,
        response: RemoteResponse,
    },
    MeetingAccept {
        response: RemoteResponse,
    },
}

/// What reconciling a [Completion] did to the [DeviceState]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Committed,
    Unchanged,
    /// A newer camera request was committed before this one completed
    Superseded,
}

/// RoomControlClient drives the room-control backend and keeps the
/// [DeviceState] in line with what the backend confirmed.
///
/// Every operation is split into `begin_*`, which decides what to send and
/// returns the call to await, and [RoomControlClient::reconcile], which writes
/// the outcome. Failures are logged and swallowed, the caller never sees them.
pub struct RoomControlClient {
    transport: Arc<dyn RoomControlTransport>,
    camera_policy: CameraTogglePolicy,
    next_camera_token: u64,
    last_committed_camera_token: Option<RequestToken>,
}

impl RoomControlClient {
    pub fn new(transport: Arc<dyn RoomControlTransport>, camera_policy: CameraTogglePolicy) -> Self {
        Self {
            transport,
            camera_policy,
            next_camera_token: 0,
            last_committed_camera_token: None,
        }
    }

    /// Starts flipping the camera relative to the current flag.
    ///
    /// Returns `None` when there is nothing to await, which is always the case
    /// with [CameraTogglePolicy::Optimistic].
    pub fn begin_toggle_camera(&mut self, device: &mut DeviceState) -> Option<PendingCall> {
        let desired = !device.camera_on();

        match self.camera_policy {
            CameraTogglePolicy::Optimistic => {
                device.set_camera_state(desired);
                info!(camera_on = desired, "camera toggled locally");

                None
            }
            CameraTogglePolicy::ConfirmThenCommit => {
                let token = RequestToken(self.next_camera_token);
                self.next_camera_token += 1;

                let transport = self.transport.clone();
                info!(%token, camera_on = desired, "requesting camera toggle");

                Some(Box::pin(async move {
                    let response = transport
                        .toggle_camera(&ToggleCameraRequest::new(desired))
                        .await;

                    Completion::Camera {
                        token,
                        desired,
                        response,
                    }
                }))
            }
        }
    }

    /// Starts accepting the pending meeting.
    /// Returns `None` once the meeting is accepted, there is no way back from it.
    pub fn begin_accept_meeting(&mut self, device: &DeviceState) -> Option<PendingCall> {
        if device.meeting_accepted() {
            warn!("meeting is already accepted, not sending another request");
            return None;
        }

        let transport = self.transport.clone();
        info!("requesting meeting acceptance");

        Some(Box::pin(async move {
            let response = transport.accept_meeting().await;

            Completion::MeetingAccept { response }
        }))
    }

    /// Writes the outcome of a finished call into the device state
    pub fn reconcile(&mut self, device: &mut DeviceState, completion: Completion) -> Reconciled {
        match completion {
            Completion::Camera {
                token,
                desired,
                response,
            } => self.reconcile_camera(device, token, desired, response),
            Completion::MeetingAccept { response } => reconcile_meeting_accept(device, response),
        }
    }

    fn reconcile_camera(
        &mut self,
        device: &mut DeviceState,
        token: RequestToken,
        desired: bool,
        response: RemoteResponse,
    ) -> Reconciled {
        match response.into_result() {
            Ok(payload) => {
                if self
                    .last_committed_camera_token
                    .is_some_and(|last_committed| token < last_committed)
                {
                    warn!(%token, %payload, "dropping camera toggle response, a newer request already committed");
                    return Reconciled::Superseded;
                }

                info!(%token, %payload, camera_on = desired, "camera toggle confirmed");
                self.last_committed_camera_token = Some(token);
                device.set_camera_state(desired);

                Reconciled::Committed
            }
            Err(failure) => {
                log_failure("error toggling camera", &failure);

                Reconciled::Unchanged
            }
        }
    }
}

fn reconcile_meeting_accept(device: &mut DeviceState, response: RemoteResponse) -> Reconciled {
    match response.into_result() {
        Ok(payload) if device.meeting_accepted() => {
            info!(%payload, "meeting acceptance confirmed again");

            Reconciled::Unchanged
        }
        Ok(payload) => {
            info!(%payload, "meeting accepted");
            device.set_meeting_accepted(true);

            Reconciled::Committed
        }
        Err(failure) => {
            log_failure("error joining meeting", &failure);

            Reconciled::Unchanged
        }
    }
}

fn log_failure(message: &str, failure: &RemoteCallFailure) {
    match failure {
        RemoteCallFailure::Unexpected { status, payload } => {
            warn!(status, %payload, "{}: backend answered without the success signal", message)
        }
        RemoteCallFailure::Network(err) => error!(error = %format!("{:#}", err), "{}", message),
    }
}
