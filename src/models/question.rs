use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How hard a question is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Fields supplied when adding a question. The id and `completed = false`
/// are filled in by the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub link: String,
}

impl NewQuestion {
    pub fn new(title: impl Into<String>, difficulty: Difficulty, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            difficulty,
            link: link.into(),
        }
    }
}

/// Input for editing a question. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub link: Option<String>,
}

impl QuestionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.difficulty.is_none() && self.link.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_difficulty_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("MEDIUM".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let err = "brutal".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, ParseDifficultyError("brutal".to_string()));
    }

    #[test]
    fn difficulty_serializes_as_capitalized_name() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(QuestionPatch::default().is_empty());
        let patch = QuestionPatch {
            link: Some(String::new()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
