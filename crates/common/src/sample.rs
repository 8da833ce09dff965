//! Exposition samples.

use crate::status::ComponentStatus;

/// The value half of an exposition line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    /// Rendered as `1.0`.
    Up,
    /// Rendered as `0.0`.
    Down,
    /// A numeric leaf, rendered with six fractional digits.
    Number(f64),
}

impl std::fmt::Display for SampleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "1.0"),
            Self::Down => write!(f, "0.0"),
            Self::Number(n) => write!(f, "{n:.6}"),
        }
    }
}

/// A single `<name> <value>` exposition line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub value: SampleValue,
}

impl Sample {
    /// Creates a numeric sample.
    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: SampleValue::Number(value),
        }
    }

    /// Creates a status sample. An unknown status has no sample.
    pub fn status(name: impl Into<String>, status: ComponentStatus) -> Option<Self> {
        let value = match status {
            ComponentStatus::Up => SampleValue::Up,
            ComponentStatus::Down => SampleValue::Down,
            ComponentStatus::Unknown => return None,
        };
        Some(Self {
            name: name.into(),
            value,
        })
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.value)
    }
}
