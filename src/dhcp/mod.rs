mod extract;
pub use extract::ExtractError;

mod lease;
pub use lease::{Lease, LeaseTable, FIELDS_PER_RECORD};
