//! Domain DTOs for the holiday planner API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Only the `startDate`/`endDate` schema is modelled. Every field except `id`
//! defaults when the backend omits it, so partially populated records still
//! load into the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a planner record.
///
/// The backend owns the format. Numbers and strings are both accepted and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlannerId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PlannerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerId::Number(n) => write!(f, "{n}"),
            PlannerId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for PlannerId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => PlannerId::Number(n),
            Err(_) => PlannerId::Text(s.to_string()),
        })
    }
}

impl From<u64> for PlannerId {
    fn from(n: u64) -> Self {
        PlannerId::Number(n)
    }
}

/// A single holiday planner record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRecord {
    pub id: PlannerId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl fmt::Display for PlannerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.id, self.title)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        writeln!(f, "  Dates: {} -> {}", self.start_date, self.end_date)?;
        writeln!(f, "  Location: {}", self.location)?;
        write!(f, "  Participants: {}", self.participants.join(", "))
    }
}

/// Request payload for creating or fully replacing a planner record.
///
/// Same shape as [`PlannerRecord`] minus `id`. Also serves as the editable
/// draft held by [`crate::form::PlannerForm`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl DraftForm {
    /// All-blank template with one empty participant slot.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            location: String::new(),
            participants: vec![String::new()],
        }
    }
}

impl Default for DraftForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl From<&PlannerRecord> for DraftForm {
    fn from(record: &PlannerRecord) -> Self {
        let participants = if record.participants.is_empty() {
            vec![String::new()]
        } else {
            record.participants.clone()
        };
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            start_date: record.start_date.clone(),
            end_date: record.end_date.clone(),
            location: record.location.clone(),
            participants,
        }
    }
}
