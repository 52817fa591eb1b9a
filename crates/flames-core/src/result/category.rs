//! Relationship category produced by the FLAMES game.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of FLAMES outcomes.
///
/// The backend has historically used two spellings for some labels.
/// `Married` is read as [`RelationshipCategory::Marriage`] and `Sisters` as
/// [`RelationshipCategory::Siblings`]; the client always writes the canonical
/// spelling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum RelationshipCategory {
    Friends,
    Lovers,
    Affectionate,
    #[serde(alias = "Married")]
    #[strum(to_string = "Marriage", serialize = "Married")]
    Marriage,
    Enemies,
    #[serde(alias = "Sisters")]
    #[strum(to_string = "Siblings", serialize = "Sisters")]
    Siblings,
}

impl RelationshipCategory {
    /// Whether the outcome deserves the celebration flourish.
    pub fn is_romantic(&self) -> bool {
        matches!(self, Self::Lovers | Self::Marriage)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Friends => "👫",
            Self::Lovers => "❤️",
            Self::Affectionate => "🥰",
            Self::Marriage => "💍",
            Self::Enemies => "😤",
            Self::Siblings => "👭",
        }
    }

    /// One-line description of the outcome for the two names.
    pub fn message(&self, name_one: &str, name_two: &str) -> String {
        match self {
            Self::Friends => format!("{name_one} and {name_two} are destined to be best friends! 🌟"),
            Self::Lovers => format!("{name_one} and {name_two} are meant to be lovers! 💕"),
            Self::Affectionate => {
                format!("{name_one} and {name_two} share a sweet, affectionate bond! 🌸")
            }
            Self::Marriage => format!("{name_one} and {name_two} are destined for marriage! 💒"),
            Self::Enemies => {
                format!("{name_one} and {name_two} might face some challenges... 🌩️")
            }
            Self::Siblings => format!("{name_one} and {name_two} have a sibling bond! 👭"),
        }
    }
}
