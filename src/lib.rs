pub mod api;
pub mod config;
pub(crate) mod error;
pub mod extract;
pub mod upstream;

pub use error::{RelayError, Result};
