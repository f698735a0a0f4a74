use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

/// The logged-in user. At most one exists at a time; it is the only state
/// that survives a restart. The serialized form keeps the legacy field name
/// `type` for the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "type")]
    pub role: Role,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// One message in a chat transcript. Turns are append-only and ids are
/// allocated from a per-session counter, so rapid successive turns never
/// collide.
#[derive(Debug, Clone)]
pub struct Turn {
    pub id: u64,
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub mood_tag: Option<MoodCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Happy,
    Sad,
    Angry,
    Anxious,
    Confused,
    Tired,
}

impl MoodCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Happy => "happy",
            MoodCategory::Sad => "sad",
            MoodCategory::Angry => "angry",
            MoodCategory::Anxious => "anxious",
            MoodCategory::Confused => "confused",
            MoodCategory::Tired => "tired",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodCategory::Happy => "😊",
            MoodCategory::Sad => "😢",
            MoodCategory::Angry => "😠",
            MoodCategory::Anxious => "😰",
            MoodCategory::Confused => "🤔",
            MoodCategory::Tired => "😴",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub date: NaiveDate,
    pub mood: MoodCategory,
    pub score: i32,
}

/// Per-student mood log, records in chronological order.
#[derive(Debug, Clone)]
pub struct StudentHistory {
    pub id: String,
    pub name: String,
    pub records: Vec<MoodRecord>,
}

/// Derived summary for one student; computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateView {
    pub mean_score: f64,
    pub needs_attention: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    High,
    MidHigh,
    MidLow,
    Low,
}

impl MoodBand {
    pub fn label(&self) -> &'static str {
        match self {
            MoodBand::High => "high",
            MoodBand::MidHigh => "mid-high",
            MoodBand::MidLow => "mid-low",
            MoodBand::Low => "low",
        }
    }
}
