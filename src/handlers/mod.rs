pub mod redirect;
pub mod shorten;

use crate::error::Error;

/// Anything that isn't a known route.
pub async fn not_found() -> Error {
    Error::NotFound
}
