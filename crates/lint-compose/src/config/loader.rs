use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{ConfigFragment, RuleSetting};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
    #[error("invalid rule setting for {rule}: {value}")]
    InvalidRuleSetting { rule: String, value: Value },
}

/// Fragment as written in JSON. Rule values are validated afterwards so the
/// error can name the offending rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FragmentObject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    files: Vec<String>,
    #[serde(default)]
    ignores: Vec<String>,
    #[serde(default)]
    rules: Map<String, Value>,
}

/// Parse either a single fragment object or an array of them.
pub fn parse_fragments(json: &str) -> Result<Vec<ConfigFragment>, ConfigError> {
    parse_source(json, Path::new("<inline>"))
}

pub fn load_fragments(path: &Path) -> Result<Vec<ConfigFragment>, ConfigError> {
    let content =
        fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
    let fragments = parse_source(&content, path)?;
    tracing::debug!(
        "loaded {} fragment(s) from {}",
        fragments.len(),
        path.display()
    );
    Ok(fragments)
}

// 配列なら複数 fragment、オブジェクトなら 1 つ
fn parse_source(json: &str, origin: &Path) -> Result<Vec<ConfigFragment>, ConfigError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| ConfigError::Json(origin.to_path_buf(), err))?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| resolve_fragment(item, origin))
            .collect(),
        other => Ok(vec![resolve_fragment(other, origin)?]),
    }
}

fn resolve_fragment(value: Value, origin: &Path) -> Result<ConfigFragment, ConfigError> {
    let object: FragmentObject =
        serde_json::from_value(value).map_err(|err| ConfigError::Json(origin.to_path_buf(), err))?;
    Ok(ConfigFragment {
        name: object.name,
        files: object.files,
        ignores: object.ignores,
        rules: parse_rules_map(object.rules)?,
    })
}

fn parse_rules_map(
    rules: Map<String, Value>,
) -> Result<BTreeMap<String, RuleSetting>, ConfigError> {
    let mut parsed = BTreeMap::new();
    for (name, value) in rules {
        let setting =
            RuleSetting::from_value(&value).ok_or_else(|| ConfigError::InvalidRuleSetting {
                rule: name.clone(),
                value: value.clone(),
            })?;
        parsed.insert(name, setting);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleLevel;
    use serde_json::json;

    #[test]
    fn parses_single_object() {
        let fragments = parse_fragments(
            r#"{
                "files": ["README.md", "SPEC.md"],
                "rules": { "style/no-tabs": "off" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            fragments,
            vec![ConfigFragment::for_files(["README.md", "SPEC.md"])
                .with_level("style/no-tabs", RuleLevel::Off)]
        );
    }

    #[test]
    fn parses_array_in_order() {
        let fragments = parse_fragments(
            r#"[
                { "name": "base", "rules": { "style/no-tabs": 2, "style/indent": ["error", 2] } },
                { "ignores": ["dist/**"] }
            ]"#,
        )
        .unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].name.as_deref(), Some("base"));
        assert_eq!(
            fragments[0].rules["style/indent"],
            RuleSetting::with_options(RuleLevel::Error, vec![json!(2)])
        );
        assert!(fragments[1].is_global_ignore());
    }

    #[test]
    fn rejects_invalid_rule_value() {
        let err = parse_fragments(r#"{ "rules": { "style/no-tabs": "loud" } }"#).unwrap_err();
        match err {
            ConfigError::InvalidRuleSetting { rule, value } => {
                assert_eq!(rule, "style/no-tabs");
                assert_eq!(value, json!("loud"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_fragments(r#"{ "file": ["README.md"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(..)));
        assert!(err.to_string().contains("unknown field `file`"), "{err}");

        let err = parse_fragments(r#"[{ "files": ["a.md"] }, { "rule": {} }]"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `rule`"), "{err}");
    }

    #[test]
    fn reports_first_invalid_rule_by_name() {
        for _ in 0..8 {
            let err = parse_fragments(
                r#"{ "rules": { "z/last": "nope", "a/first": "loud", "m/middle": true } }"#,
            )
            .unwrap_err();
            match err {
                ConfigError::InvalidRuleSetting { rule, .. } => assert_eq!(rule, "a/first"),
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
