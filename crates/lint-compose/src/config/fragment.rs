use std::collections::BTreeMap;

use serde::Serialize;

use super::{RuleLevel, RuleSetting};

/// One entry of a flat configuration.
///
/// An empty `files` list targets every path. A fragment carrying nothing
/// but `ignores` removes the matching paths from linting altogether.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleSetting>,
}

impl ConfigFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ignoring<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_rule(
        mut self,
        rule_id: impl Into<String>,
        setting: impl Into<RuleSetting>,
    ) -> Self {
        self.rules.insert(rule_id.into(), setting.into());
        self
    }

    pub fn with_level(self, rule_id: impl Into<String>, level: RuleLevel) -> Self {
        self.with_rule(rule_id, RuleSetting::new(level))
    }

    pub fn is_global_ignore(&self) -> bool {
        self.files.is_empty() && self.rules.is_empty() && !self.ignores.is_empty()
    }

    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
