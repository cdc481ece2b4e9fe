use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::DataError;

/// Icon tags accepted by the data feed. Anything else is rejected at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Icon {
    Star,
    Trophy,
    Target,
    Flame,
    Calculator,
    Atom,
    Scroll,
    Book,
    Clock,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Star => "star",
            Icon::Trophy => "trophy",
            Icon::Target => "target",
            Icon::Flame => "flame",
            Icon::Calculator => "calculator",
            Icon::Atom => "atom",
            Icon::Scroll => "scroll",
            Icon::Book => "book",
            Icon::Clock => "clock",
        }
    }

    /// Single-cell glyph used by the terminal renderers.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Star => "★",
            Icon::Trophy => "♛",
            Icon::Target => "◎",
            Icon::Flame => "♨",
            Icon::Calculator => "∑",
            Icon::Atom => "⚛",
            Icon::Scroll => "§",
            Icon::Book => "❡",
            Icon::Clock => "◷",
        }
    }
}

impl FromStr for Icon {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "star" => Ok(Icon::Star),
            "trophy" => Ok(Icon::Trophy),
            "target" => Ok(Icon::Target),
            "flame" => Ok(Icon::Flame),
            "calculator" => Ok(Icon::Calculator),
            "atom" => Ok(Icon::Atom),
            "scroll" => Ok(Icon::Scroll),
            "book" => Ok(Icon::Book),
            "clock" => Ok(Icon::Clock),
            _ => Err(DataError::UnknownIcon(s.to_string())),
        }
    }
}

impl TryFrom<String> for Icon {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Icon> for &'static str {
    fn from(icon: Icon) -> Self {
        icon.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(matches!("rocket".parse::<Icon>(), Err(DataError::UnknownIcon(t)) if t == "rocket"));
        let err = serde_json::from_str::<Icon>("\"rocket\"").unwrap_err();
        assert!(err.to_string().contains("unknown icon tag 'rocket'"));
    }

    #[test]
    fn test_serde_matches_as_str() {
        let icon: Icon = serde_json::from_str("\"calculator\"").unwrap();
        assert_eq!(icon, Icon::Calculator);
        assert_eq!(icon.as_str().parse::<Icon>().unwrap(), icon);
    }
}
