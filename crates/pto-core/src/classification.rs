//! Categorical tags attached to a break when it is committed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// What kind of break it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BreakCategory {
    Ghost,
    #[default]
    Normal,
    Sticky,
    Explosive,
    Quick,
    Marathon,
}

impl BreakCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Ghost,
        Self::Normal,
        Self::Sticky,
        Self::Explosive,
        Self::Quick,
        Self::Marathon,
    ];

    /// Canonical name, as persisted.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ghost => "Ghost",
            Self::Normal => "Normal",
            Self::Sticky => "Sticky",
            Self::Explosive => "Explosive",
            Self::Quick => "Quick",
            Self::Marathon => "Marathon",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Ghost => "👻",
            Self::Normal => "💩",
            Self::Sticky => "🍯",
            Self::Explosive => "💥",
            Self::Quick => "⚡",
            Self::Marathon => "🏃",
        }
    }
}

impl fmt::Display for BreakCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses case-insensitively, so `quick` and `Quick` both work.
impl FromStr for BreakCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory {
                value: s.to_string(),
            })
    }
}

/// How the break felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mood {
    Relieved,
    #[default]
    Satisfied,
    Struggling,
    Victorious,
    Rushed,
    Zen,
}

impl Mood {
    /// Every mood, in display order.
    pub const ALL: [Self; 6] = [
        Self::Relieved,
        Self::Satisfied,
        Self::Struggling,
        Self::Victorious,
        Self::Rushed,
        Self::Zen,
    ];

    /// Canonical name, as persisted.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relieved => "Relieved",
            Self::Satisfied => "Satisfied",
            Self::Struggling => "Struggling",
            Self::Victorious => "Victorious",
            Self::Rushed => "Rushed",
            Self::Zen => "Zen",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Relieved => "😌",
            Self::Satisfied => "😊",
            Self::Struggling => "😣",
            Self::Victorious => "💪",
            Self::Rushed => "😰",
            Self::Zen => "🧘",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownMood {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            "quick".parse::<BreakCategory>().unwrap(),
            BreakCategory::Quick
        );
        assert_eq!(
            " MARATHON ".parse::<BreakCategory>().unwrap(),
            BreakCategory::Marathon
        );
    }

    #[test]
    fn unknown_category_errors() {
        let err = "speedy".parse::<BreakCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown break category: speedy");
    }

    #[test]
    fn unknown_mood_errors() {
        let err = "grumpy".parse::<Mood>().unwrap_err();
        assert_eq!(err.to_string(), "unknown mood: grumpy");
    }

    #[test]
    fn persisted_names_match_display() {
        for category in BreakCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
        for mood in Mood::ALL {
            let json = serde_json::to_string(&mood).unwrap();
            assert_eq!(json, format!("\"{mood}\""));
        }
    }

    #[test]
    fn defaults_match_completion_form() {
        assert_eq!(BreakCategory::default(), BreakCategory::Normal);
        assert_eq!(Mood::default(), Mood::Satisfied);
    }
}
