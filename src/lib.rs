//! Client for the SA-MP server query protocol.
//!
//! A [`QuerySession`] is bound to one server and fetches its state over UDP:
//! summary info, the rule list, and the player roster in either of the two
//! shapes the protocol offers. Only IPv4 servers are supported, like the
//! protocol itself.

pub mod client;
pub mod errors;
pub mod net;
pub mod protocol;
pub mod query;
pub mod text;

pub use errors::{MalformedResponse, QueryError, TransportError};
pub use protocol::{QueryType, info::ServerInfo, players::Player};
pub use query::QuerySession;
pub use text::TextCodePage;
