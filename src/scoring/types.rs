use serde::{Deserialize, Serialize};

use super::level::ScoreLevel;

/// A single score given for one competency of one participant.
///
/// Several records may exist for the same competency and participant
/// (e.g. peer evaluations with multiple authors).
///
/// Example JSON:
/// ```json
/// {
///   "competencyID": "c-1",
///   "courseParticipationID": "p-1",
///   "coursePhaseID": "phase-1",
///   "scoreLevel": "good",
///   "author": "tutor@example.edu"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompetencyScore {
    #[serde(rename = "competencyID")]
    pub competency_id: String,

    #[serde(rename = "courseParticipationID")]
    pub course_participation_id: String,

    #[serde(rename = "coursePhaseID", default)]
    pub course_phase_id: String,

    #[serde(rename = "scoreLevel")]
    pub score_level: ScoreLevel,

    /// Who gave the score (assessor or evaluating peer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// A competency inside a category, with its relative weight.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
    pub id: String,

    #[serde(rename = "categoryID")]
    pub category_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Weight relative to the other scored competencies of the same category
    pub weight: f64,

    #[serde(default)]
    pub description_very_good: String,
    #[serde(default)]
    pub description_good: String,
    #[serde(default)]
    pub description_ok: String,
    #[serde(default)]
    pub description_bad: String,
    #[serde(default)]
    pub description_very_bad: String,
}

impl Competency {
    /// Text describing what the given level means for this competency
    pub fn level_description(&self, level: ScoreLevel) -> &str {
        match level {
            ScoreLevel::VeryGood => &self.description_very_good,
            ScoreLevel::Good => &self.description_good,
            ScoreLevel::Ok => &self.description_ok,
            ScoreLevel::Bad => &self.description_bad,
            ScoreLevel::VeryBad => &self.description_very_bad,
        }
    }
}

/// A group of competencies with a weight relative to other categories.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub weight: f64,

    #[serde(default)]
    pub competencies: Vec<Competency>,
}

/// A course participant, as far as grouping needs to know.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(rename = "courseParticipationID")]
    pub course_participation_id: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub nationality: Option<String>,
}

impl Participant {
    /// "First Last", falling back to the participation id when both are empty
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.course_participation_id.clone()
        } else {
            name.to_string()
        }
    }
}
