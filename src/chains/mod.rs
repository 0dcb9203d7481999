pub mod client;
pub mod explorer;
pub mod fixture;
pub mod resilience;

pub use client::TransactionSource;
pub use explorer::ExplorerClient;
pub use fixture::FixtureSource;
pub use resilience::{retry_with_backoff, RetryConfig};
