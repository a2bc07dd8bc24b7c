mod composer;
pub mod config;
mod project;
mod provider;

pub use composer::{compose, ComposeError, ComposedConfig, Composer, ResolvedConfig};
pub use config::{
    ConfigError, ConfigFragment, RuleLevel, RuleSetting, DEFAULT_BASE_CONFIG_FILENAME,
};
pub use project::{project_config, project_overrides, DOCUMENTATION_FILES, NO_TABS_RULE};
pub use provider::{
    FnProvider, JsonFileProvider, ProviderError, ProviderOptions, RuleProvider, StaticProvider,
};
