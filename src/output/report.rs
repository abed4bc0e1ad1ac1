use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ScoreSource;
use crate::scoring::{GroupBy, ParticipantScore, StatisticalDataPoint};

/// Machine-readable report written by `--format json` / `--out`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Report {
    pub generated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_phase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ScoreSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<StatisticalDataPoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<ParticipantScore>,
}

impl Report {
    pub fn new(course_phase: Option<String>, source: Option<ScoreSource>) -> Self {
        Self {
            generated_at: Utc::now(),
            course_phase,
            source,
            group_by: None,
            groups: Vec::new(),
            participants: Vec::new(),
        }
    }

    pub fn with_groups(mut self, group_by: GroupBy, groups: Vec<StatisticalDataPoint>) -> Self {
        self.group_by = Some(group_by);
        self.groups = groups;
        self
    }

    pub fn with_participants(mut self, participants: Vec<ParticipantScore>) -> Self {
        self.participants = participants;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
