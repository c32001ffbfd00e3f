pub mod config;
pub mod core;
pub mod utils;

pub use config::{CachePaths, CliConfig};
pub use crate::core::{OuiIndex, QuerySession, RegistryStore};
pub use utils::error::{LookupError, Result};
