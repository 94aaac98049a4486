use serde::{Deserialize, Serialize};

use super::{Difficulty, Progress};

/// The root document: an ordered collection of topics.
///
/// Exactly one sheet exists on each side of the wire. Every edit produces a
/// new `Sheet` value which then replaces the stored one wholesale, so the
/// types here are plain values compared by structural equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Sheet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// Progress across every question in the sheet.
    pub fn progress(&self) -> Progress {
        self.topics.iter().map(Topic::progress).sum()
    }
}

/// A named grouping of sub-topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sub_topics: Vec<SubTopic>,
}

impl Topic {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sub_topics: Vec::new(),
        }
    }

    pub fn sub_topic(&self, sub_id: &str) -> Option<&SubTopic> {
        self.sub_topics.iter().find(|s| s.id == sub_id)
    }

    /// Completed/total questions across all sub-topics. Derived on every call.
    pub fn progress(&self) -> Progress {
        self.sub_topics.iter().map(SubTopic::progress).sum()
    }
}

/// A named grouping of questions inside a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTopic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl SubTopic {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.questions.iter().filter(|q| q.completed).count(),
            total: self.questions.len(),
        }
    }
}

/// A leaf item of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    /// URL of the problem, or empty.
    #[serde(default)]
    pub link: String,
    /// Only ever flipped by an explicit toggle.
    #[serde(default)]
    pub completed: bool,
}
