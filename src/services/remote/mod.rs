/// Remote session error types
pub mod error;
/// OS media-session capability seam
pub mod media_session;
/// Session event loop
mod monitoring;
/// Position extrapolation between snapshots
pub mod position;
/// Wire protocol: intents, commands and updates
pub mod protocol;
/// Inbound snapshot reduction
mod reducer;
/// Synchronization session
pub mod session;
/// Duplex channel transport seam
pub mod transport;
/// Domain types
pub mod types;

pub use error::*;
pub use media_session::*;
pub use position::*;
pub use protocol::*;
pub use session::*;
pub use transport::*;
pub use types::*;
