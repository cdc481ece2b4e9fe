use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DataError;

/// A `#RRGGBB` colour as it appears in the data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn mix(self, other: HexColor, t: f64) -> HexColor {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        HexColor::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

impl FromStr for HexColor {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| DataError::BadColor(s.to_string()))?;
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| DataError::BadColor(s.to_string()))
        };
        Ok(HexColor::new(byte(0)?, byte(2)?, byte(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_cases() {
        assert_eq!("#8A2BE2".parse::<HexColor>().unwrap(), HexColor::new(0x8a, 0x2b, 0xe2));
        assert_eq!("#ffd700".parse::<HexColor>().unwrap(), HexColor::new(255, 215, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["8A2BE2", "#8A2BE", "#GGGGGG", "", "#8A2BE2FF"] {
            assert!(bad.parse::<HexColor>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_mix_endpoints() {
        let a = HexColor::new(0, 0, 0);
        let b = HexColor::new(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), HexColor::new(100, 50, 25));
    }
}
