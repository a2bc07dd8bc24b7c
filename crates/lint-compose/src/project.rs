//! Lint configuration of this repository: the provider's rule set, with tab
//! indentation allowed in the prose documents.

use std::path::PathBuf;

use crate::{
    composer::{ComposeError, ComposedConfig, Composer},
    config::{ConfigFragment, RuleLevel},
    provider::RuleProvider,
};

pub const NO_TABS_RULE: &str = "style/no-tabs";

pub const DOCUMENTATION_FILES: [&str; 2] = ["README.md", "SPEC.md"];

pub fn project_overrides() -> Vec<ConfigFragment> {
    vec![ConfigFragment::for_files(DOCUMENTATION_FILES)
        .named("project/documentation")
        .with_level(NO_TABS_RULE, RuleLevel::Off)]
}

/// Build the configuration once at startup and share it from there.
pub fn project_config<P>(
    provider: &P,
    root: impl Into<PathBuf>,
) -> Result<ComposedConfig, ComposeError>
where
    P: RuleProvider + ?Sized,
{
    Composer::new()
        .root(root)
        .extend(project_overrides())
        .build(provider)
}
