pub mod api;
pub mod config;
pub mod dhcp;
pub mod display;
pub mod logger;

pub use api::{Client, FetchError};
pub use config::RouterConfig;
pub use dhcp::{ExtractError, Lease, LeaseTable, FIELDS_PER_RECORD};
pub use display::Style;
