/// Request bodies the room-control backend accepts
pub mod request;
/// Responses of the room-control backend, classified by the success signal of each call
pub mod response;
/// Endpoint paths of the room-control backend and, with the 'client' feature,
/// the HTTP transport which will bring in reqwest alongside with other dependencies
pub mod transport;
