//! Network layer - contact API calls and the CV download
//!
//! The Network actor receives commands from the App actor and sends back responses.

pub mod actor;
pub mod client;
pub mod cv;
#[cfg(test)]
pub(crate) mod test_server;

pub use actor::NetworkActor;
