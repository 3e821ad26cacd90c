//! Mini-game definitions - static catalog data.
//!
//! `MiniGameDefinition` holds the immutable properties of a mini-game:
//! its title, description, difficulty and optional time limit.
//!
//! Everything that changes during play lives in the widget instance
//! (`crate::widgets`) or in the session (`crate::session`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::UnknownGameId;

/// Identifier of a mini-game.
///
/// A closed set: adding a game means adding a variant here, a catalog
/// entry and a widget factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MiniGameId {
    BasicAgree,
    EscapeButton,
    TimingGame,
    RapidClick,
    SlotMachine,
    SlidePuzzle,
    Maze,
    MemoryGame,
    ReflexTest,
    MathQuiz,
    LongPress,
    TwoChoiceQuiz,
    ColorMatch,
    WordSearch,
    DragDrop,
    RhythmGame,
    DodgeGame,
    Clicker,
    ChessBoard,
    FinalChallenge,
}

impl MiniGameId {
    /// Every identifier, in catalog order.
    pub const ALL: [MiniGameId; 20] = [
        MiniGameId::BasicAgree,
        MiniGameId::EscapeButton,
        MiniGameId::TimingGame,
        MiniGameId::RapidClick,
        MiniGameId::SlotMachine,
        MiniGameId::SlidePuzzle,
        MiniGameId::Maze,
        MiniGameId::MemoryGame,
        MiniGameId::ReflexTest,
        MiniGameId::MathQuiz,
        MiniGameId::LongPress,
        MiniGameId::TwoChoiceQuiz,
        MiniGameId::ColorMatch,
        MiniGameId::WordSearch,
        MiniGameId::DragDrop,
        MiniGameId::RhythmGame,
        MiniGameId::DodgeGame,
        MiniGameId::Clicker,
        MiniGameId::ChessBoard,
        MiniGameId::FinalChallenge,
    ];

    /// The kebab-case key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MiniGameId::BasicAgree => "basic-agree",
            MiniGameId::EscapeButton => "escape-button",
            MiniGameId::TimingGame => "timing-game",
            MiniGameId::RapidClick => "rapid-click",
            MiniGameId::SlotMachine => "slot-machine",
            MiniGameId::SlidePuzzle => "slide-puzzle",
            MiniGameId::Maze => "maze",
            MiniGameId::MemoryGame => "memory-game",
            MiniGameId::ReflexTest => "reflex-test",
            MiniGameId::MathQuiz => "math-quiz",
            MiniGameId::LongPress => "long-press",
            MiniGameId::TwoChoiceQuiz => "two-choice-quiz",
            MiniGameId::ColorMatch => "color-match",
            MiniGameId::WordSearch => "word-search",
            MiniGameId::DragDrop => "drag-drop",
            MiniGameId::RhythmGame => "rhythm-game",
            MiniGameId::DodgeGame => "dodge-game",
            MiniGameId::Clicker => "clicker",
            MiniGameId::ChessBoard => "chess-board",
            MiniGameId::FinalChallenge => "final-challenge",
        }
    }
}

impl std::fmt::Display for MiniGameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MiniGameId {
    type Err = UnknownGameId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MiniGameId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownGameId(s.to_string()))
    }
}

/// Difficulty tier, serialized as 1–3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(format!("difficulty must be 1-3, got {other}")),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value as u8
    }
}

/// Static mini-game definition.
///
/// ## Example
///
/// ```
/// use consent_gate::catalog::{Difficulty, MiniGameDefinition, MiniGameId};
///
/// let quiz = MiniGameDefinition::new(MiniGameId::MathQuiz, "Math Quiz", Difficulty::Easy)
///     .with_description("Type the answer")
///     .with_time_limit(20);
///
/// assert_eq!(quiz.time_limit, Some(20));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameDefinition {
    /// Unique key.
    pub id: MiniGameId,

    /// Display title.
    pub name: String,

    /// One-line instructions.
    pub description: String,

    /// Difficulty tier.
    pub difficulty: Difficulty,

    /// Time limit in seconds, if the game has one.
    pub time_limit: Option<u32>,
}

impl MiniGameDefinition {
    /// Create a new definition.
    #[must_use]
    pub fn new(id: MiniGameId, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            difficulty,
            time_limit: None,
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the time limit in seconds (builder pattern).
    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = Some(seconds);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip_through_str() {
        for id in MiniGameId::ALL {
            assert_eq!(id.as_str().parse::<MiniGameId>(), Ok(id));
        }
        assert!("not-a-game".parse::<MiniGameId>().is_err());
    }

    #[test]
    fn test_id_serde_matches_display() {
        let json = serde_json::to_string(&MiniGameId::TwoChoiceQuiz).unwrap();
        assert_eq!(json, "\"two-choice-quiz\"");
        assert_eq!(format!("{}", MiniGameId::TwoChoiceQuiz), "two-choice-quiz");
    }

    #[test]
    fn test_difficulty_bounds() {
        assert_eq!(Difficulty::try_from(2), Ok(Difficulty::Medium));
        assert!(Difficulty::try_from(0).is_err());
        assert!(Difficulty::try_from(4).is_err());
        assert!(serde_json::from_str::<Difficulty>("5").is_err());
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "3");
    }

    #[test]
    fn test_definition_builder() {
        let def = MiniGameDefinition::new(MiniGameId::Maze, "Maze", Difficulty::Medium)
            .with_description("Reach the goal")
            .with_time_limit(45);

        assert_eq!(def.id, MiniGameId::Maze);
        assert_eq!(def.description, "Reach the goal");
        assert_eq!(def.time_limit, Some(45));
    }
}
