use serde::{ser::SerializeSeq, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, RuleLevel::Off)
    }

    pub(crate) fn from_value(value: &Value) -> Option<RuleLevel> {
        match value {
            Value::String(text) => match text.as_str() {
                "off" | "0" => Some(RuleLevel::Off),
                "warn" | "warning" | "1" => Some(RuleLevel::Warn),
                "error" | "2" => Some(RuleLevel::Error),
                _ => None,
            },
            Value::Number(num) => match num.as_i64()? {
                0 => Some(RuleLevel::Off),
                1 => Some(RuleLevel::Warn),
                2 => Some(RuleLevel::Error),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Serialize for RuleLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Level of a rule plus the rule-specific options that follow it,
/// e.g. `["error", { "ignoreComments": true }]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub level: RuleLevel,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(level: RuleLevel) -> Self {
        Self {
            level,
            options: Vec::new(),
        }
    }

    pub fn off() -> Self {
        Self::new(RuleLevel::Off)
    }

    pub fn warn() -> Self {
        Self::new(RuleLevel::Warn)
    }

    pub fn error() -> Self {
        Self::new(RuleLevel::Error)
    }

    pub fn with_options(level: RuleLevel, options: Vec<Value>) -> Self {
        Self { level, options }
    }

    /// Apply a later setting on top of this one.
    ///
    /// A setting without options only changes the level; options set by an
    /// earlier fragment are kept.
    pub fn overlay(&mut self, later: &RuleSetting) {
        self.level = later.level;
        if !later.options.is_empty() {
            self.options = later.options.clone();
        }
    }

    /// Parse a setting as it appears in a `rules` map.
    pub(crate) fn from_value(value: &Value) -> Option<RuleSetting> {
        match value {
            Value::Array(items) => {
                let (level, options) = items.split_first()?;
                Some(RuleSetting::with_options(
                    RuleLevel::from_value(level)?,
                    options.to_vec(),
                ))
            }
            other => RuleLevel::from_value(other).map(RuleSetting::new),
        }
    }
}

impl From<RuleLevel> for RuleSetting {
    fn from(level: RuleLevel) -> Self {
        RuleSetting::new(level)
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            return self.level.serialize(serializer);
        }

        let mut seq = serializer.serialize_seq(Some(self.options.len() + 1))?;
        seq.serialize_element(&self.level)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}
