/// DeviceState holds the last confirmed state of the room device.
///
/// Both flags start as `false` on every run and are written only by the
/// [crate::client::RoomControlClient].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceState {
    camera_on: bool,
    meeting_accepted: bool,
}

impl DeviceState {
    pub fn camera_on(&self) -> bool {
        self.camera_on
    }

    pub fn meeting_accepted(&self) -> bool {
        self.meeting_accepted
    }

    pub fn set_camera_state(&mut self, camera_on: bool) {
        self.camera_on = camera_on;
    }

    /// Once the meeting is accepted there is nothing that reverts it within a run
    pub fn set_meeting_accepted(&mut self, meeting_accepted: bool) {
        self.meeting_accepted = meeting_accepted;
    }
}

/// State holds the state of the application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Display name of the controlled room
    pub room_name: String,
    /// State of the room device
    pub device: DeviceState,
}

impl State {
    pub fn new(room_name: impl Into<String>) -> Self {
        State {
            room_name: room_name.into(),
            device: DeviceState::default(),
        }
    }
}
