pub mod catalog;
pub mod category;
pub mod config;
pub mod descriptor;
pub mod install;
pub mod markdown;
pub mod query;
pub mod types;

pub use catalog::{Catalog, LoadError, WriteError};
pub use category::{categorize, Category};
pub use config::{Config, ConfigError};
pub use descriptor::{parse_descriptor, Descriptor};
pub use types::*;
