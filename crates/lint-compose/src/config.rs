mod fragment;
pub mod loader;
pub(crate) mod matcher;
mod types;

/// Base configuration looked up in the root directory when none is given.
pub const DEFAULT_BASE_CONFIG_FILENAME: &str = "lint.base.json";

pub use fragment::ConfigFragment;
pub use loader::{load_fragments, parse_fragments, ConfigError};
pub use types::{RuleLevel, RuleSetting};
