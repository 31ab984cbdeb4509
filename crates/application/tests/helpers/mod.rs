mod mock_forwarder;
mod messages;

pub use messages::*;
pub use mock_forwarder::*;
