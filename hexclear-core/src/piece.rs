//! Piece colors, modifiers, and rule summaries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece colors; each color carries its own removal rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Orange,
    Yellow,
    Purple,
    White,
    Gray,
    Black,
}

/// Every color, in rule-listing order
pub const ALL_COLORS: [Color; 9] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Orange,
    Color::Yellow,
    Color::Purple,
    Color::White,
    Color::Gray,
    Color::Black,
];

impl Color {
    /// Lowercase name, matching the level file encoding
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Black => "black",
        }
    }

    /// Single-letter code for grid sketches (lowercase where the initial
    /// collides with another color)
    pub const fn code(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
            Color::White => 'W',
            Color::Gray => 'g',
            Color::Black => 'k',
        }
    }

    /// One-line removal rule summary, surfaced as hover text by UIs
    pub const fn rule_summary(self) -> &'static str {
        match self {
            Color::Red => "at least one matched neighbor, at least one open slot",
            Color::Blue => "no matched neighbors at all",
            Color::Green => "two or more matched neighbors in one unbroken arc",
            Color::Orange => "every neighbor slot matched",
            Color::Yellow => "exactly three matched neighbors, no opposite pair",
            Color::Purple => "exactly two matched neighbors, directly opposite",
            Color::White => "hand must hold no conflicting color",
            Color::Gray => "mimics the last removed piece's rule",
            Color::Black => "board must hold no conflicting color",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece: its rule color plus an optional modifier narrowing which
/// neighbor colors count as matches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Color>,
}

impl Piece {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            modifier: None,
        }
    }

    pub const fn with_modifier(color: Color, modifier: Color) -> Self {
        Self {
            color,
            modifier: Some(modifier),
        }
    }

    /// Kind token ("color" or "color+modifier") used by fingerprints and
    /// hand deduplication output
    pub fn kind_token(&self) -> String {
        match self.modifier {
            Some(m) => format!("{}+{}", self.color.name(), m.name()),
            None => self.color.name().to_string(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Some(m) => write!(f, "{}+{}", self.color.name(), m.name()),
            None => f.write_str(self.color.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_serde_names() {
        let json = serde_json::to_string(&Color::Orange).unwrap();
        assert_eq!(json, "\"orange\"");
        let back: Color = serde_json::from_str("\"gray\"").unwrap();
        assert_eq!(back, Color::Gray);
    }

    #[test]
    fn test_piece_kind_token() {
        assert_eq!(Piece::new(Color::Red).kind_token(), "red");
        assert_eq!(
            Piece::with_modifier(Color::Gray, Color::Blue).kind_token(),
            "gray+blue"
        );
    }

    #[test]
    fn test_piece_serde_modifier_optional() {
        let plain: Piece = serde_json::from_str(r#"{"color":"red"}"#).unwrap();
        assert_eq!(plain, Piece::new(Color::Red));
        let modified: Piece =
            serde_json::from_str(r#"{"color":"white","modifier":"black"}"#).unwrap();
        assert_eq!(modified, Piece::with_modifier(Color::White, Color::Black));
        // plain pieces serialize without a modifier key
        assert_eq!(
            serde_json::to_string(&Piece::new(Color::Blue)).unwrap(),
            r#"{"color":"blue"}"#
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        for (i, a) in ALL_COLORS.iter().enumerate() {
            for b in &ALL_COLORS[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
