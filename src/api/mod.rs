mod client;
pub use client::{Client, DHCP_TABLE_PATH};

mod error;
pub use error::FetchError;

pub mod retry;
