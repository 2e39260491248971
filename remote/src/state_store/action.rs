/// Actions the UI sends to the state store, one per user interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleCamera,
    AcceptMeeting,
    Exit,
}
