use std::{
    collections::BTreeMap,
    env,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;

use crate::{
    config::{matcher::FragmentMatcher, ConfigFragment, RuleLevel, RuleSetting},
    provider::{ProviderError, ProviderOptions, RuleProvider},
};

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("invalid glob pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Effective rules for one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    pub rules: BTreeMap<String, RuleSetting>,
}

impl ResolvedConfig {
    pub fn setting(&self, rule_id: &str) -> Option<&RuleSetting> {
        self.rules.get(rule_id)
    }

    pub fn level(&self, rule_id: &str) -> Option<RuleLevel> {
        self.setting(rule_id).map(|setting| setting.level)
    }

    /// Rules that are switched on, with their level.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, RuleLevel)> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.level.is_enabled())
            .map(|(name, setting)| (name.as_str(), setting.level))
    }
}

/// Base fragments followed by overrides, in application order.
#[derive(Debug, Clone)]
pub struct ComposedConfig {
    root_dir: PathBuf,
    fragments: Vec<ConfigFragment>,
    matchers: Vec<FragmentMatcher>,
    /// `root_dir` made absolute, compared against absolute files.
    anchor: PathBuf,
    /// `root_dir` as written, stripped from relative files that carry it.
    relative_root: Option<PathBuf>,
}

impl PartialEq for ComposedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.root_dir == other.root_dir && self.fragments == other.fragments
    }
}

impl ComposedConfig {
    fn new(root_dir: PathBuf, fragments: Vec<ConfigFragment>) -> Result<Self, ComposeError> {
        let matchers = fragments
            .iter()
            .map(|fragment| {
                FragmentMatcher::compile(fragment)
                    .map_err(|(pattern, source)| ComposeError::Glob { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let relative_root = if root_dir.is_relative() {
            normalize(&root_dir)
        } else {
            None
        };
        let anchor = absolute_root(&root_dir);
        tracing::debug!("matching files against {}", anchor.display());

        Ok(Self {
            root_dir,
            fragments,
            matchers,
            anchor,
            relative_root,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn fragments(&self) -> &[ConfigFragment] {
        &self.fragments
    }

    pub fn resolve(&self, file: &Path) -> ResolvedConfig {
        let rel_path = self.relative(file);
        let mut rules: BTreeMap<String, RuleSetting> = BTreeMap::new();

        // 後勝ち
        for (fragment, matcher) in self.fragments.iter().zip(&self.matchers) {
            if !matcher.applies_to(rel_path.as_deref()) {
                continue;
            }
            tracing::trace!("{} applies to {}", fragment.label(), file.display());

            for (name, setting) in &fragment.rules {
                rules
                    .entry(name.clone())
                    .and_modify(|current| current.overlay(setting))
                    .or_insert_with(|| setting.clone());
            }
        }

        ResolvedConfig { rules }
    }

    pub fn setting_for(&self, file: &Path, rule_id: &str) -> Option<RuleSetting> {
        self.resolve(file).rules.remove(rule_id)
    }

    pub fn level_for(&self, file: &Path, rule_id: &str) -> Option<RuleLevel> {
        self.setting_for(file, rule_id).map(|setting| setting.level)
    }

    pub fn is_ignored(&self, file: &Path) -> bool {
        match self.relative(file) {
            Some(rel_path) => self
                .matchers
                .iter()
                .any(|matcher| matcher.ignores_globally(&rel_path)),
            None => false,
        }
    }

    /// Path of `file` relative to the root, `None` when it lies outside.
    ///
    /// Relative files that start with the root as written (`sub/README.md`
    /// for root `sub`) are stripped; other relative files are taken as
    /// relative to the root already.
    fn relative(&self, file: &Path) -> Option<PathBuf> {
        let file = normalize(file)?;
        if file.is_absolute() {
            return file.strip_prefix(&self.anchor).ok().map(Path::to_path_buf);
        }

        match &self.relative_root {
            Some(root) => match file.strip_prefix(root) {
                Ok(rel_path) => Some(rel_path.to_path_buf()),
                Err(_) => Some(file),
            },
            None => Some(file),
        }
    }
}

fn absolute_root(root_dir: &Path) -> PathBuf {
    let joined = if root_dir.is_absolute() {
        root_dir.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(root_dir),
            Err(err) => {
                tracing::warn!("failed to get cwd, absolute paths will not match: {err}");
                root_dir.to_path_buf()
            }
        }
    };
    normalize(&joined).unwrap_or(joined)
}

/// Lexically drop `.` and fold `..`. Returns `None` when a relative path
/// climbs above its starting point.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    if path.is_absolute() {
                        continue;
                    }
                    return None;
                }
                normalized.pop();
                depth -= 1;
            }
            Component::Normal(name) => {
                normalized.push(name);
                depth += 1;
            }
        }
    }

    Some(normalized)
}

/// Builder that calls a provider and appends overrides to its output.
#[derive(Debug, Clone)]
pub struct Composer {
    root_dir: PathBuf,
    options: ProviderOptions,
    overrides: Vec<ConfigFragment>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            options: ProviderOptions::default(),
            overrides: Vec::new(),
        }
    }

    /// Directory that `files` patterns are relative to.
    pub fn root(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn options(mut self, options: ProviderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn append(mut self, fragment: ConfigFragment) -> Self {
        self.overrides.push(fragment);
        self
    }

    pub fn extend(mut self, fragments: impl IntoIterator<Item = ConfigFragment>) -> Self {
        self.overrides.extend(fragments);
        self
    }

    pub fn build<P>(&self, provider: &P) -> Result<ComposedConfig, ComposeError>
    where
        P: RuleProvider + ?Sized,
    {
        let mut fragments = provider.base_config(&self.options)?;
        tracing::debug!(
            "{} returned {} base fragment(s), appending {} override(s)",
            provider.name(),
            fragments.len(),
            self.overrides.len()
        );
        fragments.extend(self.overrides.iter().cloned());

        ComposedConfig::new(self.root_dir.clone(), fragments)
    }
}

/// Call `base` and append `overrides` to what it returns.
pub fn compose<P>(
    base: &P,
    overrides: impl IntoIterator<Item = ConfigFragment>,
) -> Result<ComposedConfig, ComposeError>
where
    P: RuleProvider + ?Sized,
{
    Composer::new().extend(overrides).build(base)
}
