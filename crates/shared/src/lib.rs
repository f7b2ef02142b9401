mod error;
mod scope;

pub use error::*;
pub use scope::*;

use ulid::Ulid;

/// New ULID identifier, the id format used for every table.
pub fn new_id() -> String {
    Ulid::new().to_string()
}

/// Current Unix timestamp in seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
