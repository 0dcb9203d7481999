pub mod address;

pub use address::{normalize_address, validate_address};
