use std::fmt;

use serde::{Deserialize, Serialize};

/// A family of mutually convertible units.
///
/// Temperature is the odd one out: its units are related by affine formulas,
/// so it is never converted through a factor table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Volume,
    Speed,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Length,
        Self::Mass,
        Self::Temperature,
        Self::Volume,
        Self::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Temperature => "temperature",
            Self::Volume => "volume",
            Self::Speed => "speed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Some(Self::Length),
            "mass" | "weight" => Some(Self::Mass),
            "temperature" | "temp" => Some(Self::Temperature),
            "volume" => Some(Self::Volume),
            "speed" => Some(Self::Speed),
            _ => None,
        }
    }

    pub fn is_linear(&self) -> bool {
        !matches!(self, Self::Temperature)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
