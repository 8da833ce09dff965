/// Status reported by a SpringXD health indicator.
///
/// Only the exact spellings `Up`/`UP` and `Down`/`DOWN` are recognised.
/// Anything else, including `up` or `OUT_OF_SERVICE`, is [`ComponentStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentStatus {
    Up,
    Down,
    Unknown,
}

impl ComponentStatus {
    /// Parses a raw status string without case folding.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Up" | "UP" => Self::Up,
            "Down" | "DOWN" => Self::Down,
            _ => Self::Unknown,
        }
    }

    /// Returns the gauge value for this status, or `None` when unknown.
    pub fn as_sample_value(&self) -> Option<f64> {
        match self {
            Self::Up => Some(1.0),
            Self::Down => Some(0.0),
            Self::Unknown => None,
        }
    }
}
