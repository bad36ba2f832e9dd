//! Background color palette

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::DomainError;

/// Colors offered when creating an item, in the order they are offered.
pub const PRESET_COLORS: [&str; 6] = [
    "rgba(43, 45, 66, 0.8)",
    "rgba(217, 4, 41, 0.8)",
    "rgba(141, 153, 174, 0.8)",
    "rgba(45, 106, 79, 0.8)",
    "rgba(230, 140, 30, 0.8)",
    "rgba(100, 60, 180, 0.8)",
];

/// Color preselected for new items
pub fn default_color() -> &'static str {
    PRESET_COLORS[0]
}

pub fn is_preset(color: &str) -> bool {
    PRESET_COLORS.contains(&color)
}

/// Parsed `rgba(r, g, b, a)` color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 ..= 1.0
    pub a: f32,
}

impl FromStr for Rgba {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidInput(format!("not an rgba() color: {}", s));

        let inner = s
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        // Whitespace is allowed only after a comma
        let parts: Vec<&str> = inner
            .split(',')
            .enumerate()
            .map(|(i, part)| if i == 0 { part } else { part.trim_start() })
            .collect();
        let [r, g, b, a] = *parts.as_slice() else {
            return Err(invalid());
        };

        let digits = |v: &str, allow_dot: bool| {
            !v.is_empty() && v.chars().all(|c| c.is_ascii_digit() || (allow_dot && c == '.'))
        };
        if ![r, g, b].iter().all(|v| digits(v, false)) || !digits(a, true) {
            return Err(invalid());
        }

        let channel = |v: &str| v.parse::<u8>().map_err(|_| invalid());
        let alpha: f32 = a.parse().map_err(|_| invalid())?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid());
        }

        Ok(Rgba {
            r: channel(r)?,
            g: channel(g)?,
            b: channel(b)?,
            a: alpha,
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
