use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::ConfigFragment;

/// Compiled `files` / `ignores` of a fragment.
#[derive(Debug, Clone)]
pub(crate) struct FragmentMatcher {
    files: Option<GlobSet>,
    ignores: Option<GlobSet>,
    global_ignore: bool,
}

impl FragmentMatcher {
    pub(crate) fn compile(fragment: &ConfigFragment) -> Result<Self, (String, globset::Error)> {
        Ok(Self {
            files: build_globset(&fragment.files)?,
            ignores: build_globset(&fragment.ignores)?,
            global_ignore: fragment.is_global_ignore(),
        })
    }

    /// `rel_path` is the path relative to the config root, or `None` when
    /// the file lives outside of it.
    pub(crate) fn applies_to(&self, rel_path: Option<&Path>) -> bool {
        if self.global_ignore {
            return false;
        }

        match (&self.files, rel_path) {
            (None, None) => true,
            (None, Some(path)) => !self.is_excluded(path),
            (Some(_), None) => false,
            (Some(files), Some(path)) => files.is_match(path) && !self.is_excluded(path),
        }
    }

    pub(crate) fn ignores_globally(&self, rel_path: &Path) -> bool {
        self.global_ignore && self.is_excluded(rel_path)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.ignores
            .as_ref()
            .map_or(false, |ignores| ignores.is_match(path))
    }
}

// `*` stops at `/` like minimatch does, so `README.md` only hits the root file.
fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, (String, globset::Error)> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|err| (pattern.clone(), err))?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|err| (patterns.join(", "), err))
}
