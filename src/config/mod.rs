pub mod protocols;
pub mod settings;

pub use protocols::{KnownProtocols, ProtocolAddresses};
pub use settings::{AppSettings, BatchSettings, ExplorerSettings, Settings};
