/// HTTP transport for a client to be able to drive the room-control backend
#[cfg(feature = "client")]
pub mod client;
/// Paths of the calls the room-control backend serves
pub mod endpoint;
