pub mod config;
pub mod logging;

pub mod artifact;
pub mod error;
pub mod http;
pub mod ini;
pub mod locator;
pub mod store;
pub mod sync;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ErrorKind, Result, SyncError};
