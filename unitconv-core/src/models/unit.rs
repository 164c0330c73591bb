use std::fmt;

use serde::{Deserialize, Serialize};

/// A temperature scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "°C" | "℃" => return Some(Self::Celsius),
            "°F" | "℉" => return Some(Self::Fahrenheit),
            "K" => return Some(Self::Kelvin),
            _ => {}
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "degc" | "celsius" => Some(Self::Celsius),
            "f" | "degf" | "fahrenheit" => Some(Self::Fahrenheit),
            "k" | "kelvin" => Some(Self::Kelvin),
            _ => None,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a unit relates to the rest of its category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitKind {
    /// Multiplier converting one of this unit into the category base unit.
    Linear(f64),
    /// Temperature units have no factor; they convert by formula.
    Scale(Scale),
}

/// One entry of the unit table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    /// Lookup key, also used as the display symbol.
    pub id: &'static str,
    pub name: &'static str,
    pub kind: UnitKind,
    /// Alternate spellings accepted on lookup (matched case-insensitively).
    pub aliases: &'static [&'static str],
}

impl UnitDefinition {
    pub const fn linear(
        id: &'static str,
        name: &'static str,
        factor: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            name,
            kind: UnitKind::Linear(factor),
            aliases,
        }
    }

    pub const fn scale(
        id: &'static str,
        name: &'static str,
        scale: Scale,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            name,
            kind: UnitKind::Scale(scale),
            aliases,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.id
    }

    /// The linear factor, or `None` for temperature units.
    pub fn factor(&self) -> Option<f64> {
        match self.kind {
            UnitKind::Linear(factor) => Some(factor),
            UnitKind::Scale(_) => None,
        }
    }

    pub fn is_base(&self) -> bool {
        self.factor() == Some(1.0)
    }

    /// Whether `key` names this unit, by id, name or alias.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        if key == self.id {
            return true;
        }
        self.keys().any(|k| k.eq_ignore_ascii_case(key))
    }

    /// Every identifier this unit answers to.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        [self.id, self.name]
            .into_iter()
            .chain(self.aliases.iter().copied())
    }
}
