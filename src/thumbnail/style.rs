//! Render style selection

use std::fmt;
use std::str::FromStr;

/// Visual layout used for generated thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbStyle {
    /// Dark gradient card with rounded cover and play badge
    Card,
    /// Blurred cover backdrop with circular art and ring
    Vinyl,
}

impl ThumbStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbStyle::Card => "card",
            ThumbStyle::Vinyl => "vinyl",
        }
    }
}

impl fmt::Display for ThumbStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThumbStyle {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(ThumbStyle::Card),
            "vinyl" => Ok(ThumbStyle::Vinyl),
            other => Err(format!("unknown thumbnail style: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parsing() {
        assert_eq!("card".parse::<ThumbStyle>(), Ok(ThumbStyle::Card));
        assert_eq!(" Vinyl ".parse::<ThumbStyle>(), Ok(ThumbStyle::Vinyl));
        assert!("disco".parse::<ThumbStyle>().is_err());
    }

    #[test]
    fn test_style_round_trip() {
        for style in [ThumbStyle::Card, ThumbStyle::Vinyl] {
            assert_eq!(style.as_str().parse::<ThumbStyle>(), Ok(style));
        }
    }
}
