//! Core data model types for mypgrade.
//!
//! A [`Subject`] carries exactly four criterion score lists. The four lists
//! are named fields rather than map entries so that the shape cannot drift.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted score entry.
pub const MIN_SCORE: u8 = 0;
/// Highest accepted score entry.
pub const MAX_SCORE: u8 = 8;

/// One of the four MYP assessment criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criterion {
    A,
    B,
    C,
    D,
}

impl Criterion {
    /// All criteria in display and CSV column order.
    pub const ALL: [Criterion; 4] = [Criterion::A, Criterion::B, Criterion::C, Criterion::D];
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::A => write!(f, "A"),
            Criterion::B => write!(f, "B"),
            Criterion::C => write!(f, "C"),
            Criterion::D => write!(f, "D"),
        }
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Criterion::A),
            "B" => Ok(Criterion::B),
            "C" => Ok(Criterion::C),
            "D" => Ok(Criterion::D),
            other => Err(format!("unknown criterion: {other} (expected A, B, C or D)")),
        }
    }
}

/// Raw score entries for the four criteria of one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    #[serde(rename = "A", default, deserialize_with = "deserialize_entries")]
    pub a: Vec<u8>,
    #[serde(rename = "B", default, deserialize_with = "deserialize_entries")]
    pub b: Vec<u8>,
    #[serde(rename = "C", default, deserialize_with = "deserialize_entries")]
    pub c: Vec<u8>,
    #[serde(rename = "D", default, deserialize_with = "deserialize_entries")]
    pub d: Vec<u8>,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> &[u8] {
        match criterion {
            Criterion::A => &self.a,
            Criterion::B => &self.b,
            Criterion::C => &self.c,
            Criterion::D => &self.d,
        }
    }

    pub fn get_mut(&mut self, criterion: Criterion) -> &mut Vec<u8> {
        match criterion {
            Criterion::A => &mut self.a,
            Criterion::B => &mut self.b,
            Criterion::C => &mut self.c,
            Criterion::D => &mut self.d,
        }
    }

    /// Iterate `(criterion, entries)` in A..D order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, &[u8])> + '_ {
        Criterion::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Number of entries across all four criteria.
    pub fn entry_count(&self) -> usize {
        self.a.len() + self.b.len() + self.c.len() + self.d.len()
    }

    /// `true` when no criterion holds an entry.
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

/// Stored form of a criterion. Older documents kept a single number (or
/// nothing) per criterion instead of a list; anything else is unreadable.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntries {
    List(Vec<serde_json::Value>),
    Single(i64),
    Other(serde_json::Value),
}

fn stored_score(value: i64) -> Option<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| (MIN_SCORE..=MAX_SCORE).contains(v))
}

/// Loads one criterion without ever failing the whole document. Entries that
/// are not integers in `[0, 8]` are dropped with a warning.
fn deserialize_entries<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredEntries>::deserialize(deserializer)?;
    Ok(match stored {
        None => Vec::new(),
        Some(StoredEntries::List(values)) => {
            let entries: Vec<u8> = values
                .iter()
                .filter_map(|v| v.as_i64().and_then(stored_score))
                .collect();
            if entries.len() != values.len() {
                tracing::warn!(
                    dropped = values.len() - entries.len(),
                    "ignoring saved score entries outside 0-8"
                );
            }
            entries
        }
        Some(StoredEntries::Single(value)) => match stored_score(value) {
            Some(score) => vec![score],
            None => {
                tracing::warn!(value, "ignoring saved score outside 0-8");
                Vec::new()
            }
        },
        Some(StoredEntries::Other(value)) => {
            tracing::warn!(%value, "ignoring unreadable saved criterion");
            Vec::new()
        }
    })
}

/// A tracked academic subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Short stable identifier, e.g. `"math"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Raw score entries per criterion.
    #[serde(default)]
    pub scores: CriterionScores,
}

impl Subject {
    /// A subject with four empty criterion lists.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores: CriterionScores::default(),
        }
    }

    /// Upper-cased id, used as the compact chart/table label.
    pub fn short_name(&self) -> String {
        self.id.to_uppercase()
    }
}

/// The roster used on first run and after a reset.
pub fn default_roster() -> Vec<Subject> {
    [
        ("chn", "Chinese"),
        ("eng", "English"),
        ("math", "Mathematics"),
        ("bio", "Biology"),
        ("phys", "Physics"),
        ("dd", "Digital Design"),
        ("pd", "Product Design"),
        ("mus", "Music"),
        ("phe", "PHE"),
    ]
    .into_iter()
    .map(|(id, name)| Subject::new(id, name))
    .collect()
}
