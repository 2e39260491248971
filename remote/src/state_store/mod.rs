pub mod action;
mod state;
mod state_store;

pub use self::state::{DeviceState, State};
pub use self::state_store::StateStore;
