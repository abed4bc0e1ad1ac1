pub mod client;

pub use client::{ApiClient, ApiError};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scoring::{Category, CompetencyScore, Participant};

/// Which kind of score records to load for a course phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    /// Instructor assessments of students
    #[default]
    Assessment,
    /// Self and peer evaluations
    Evaluation,
}

impl ScoreSource {
    pub fn path(self, course_phase_id: &str) -> String {
        match self {
            ScoreSource::Assessment => format!("/course_phase/{}/student-assessment", course_phase_id),
            ScoreSource::Evaluation => format!("/course_phase/{}/evaluation", course_phase_id),
        }
    }
}

pub fn categories_path(course_phase_id: &str) -> String {
    format!("/course_phase/{}/competency", course_phase_id)
}

pub fn participants_path(course_phase_id: &str) -> String {
    format!("/course_phase/{}/participations", course_phase_id)
}

pub async fn fetch_scores(
    client: &ApiClient,
    course_phase_id: &str,
    source: ScoreSource,
) -> Result<Vec<CompetencyScore>, ApiError> {
    client.get_json(&source.path(course_phase_id)).await
}

/// Categories with their competencies nested
pub async fn fetch_categories(
    client: &ApiClient,
    course_phase_id: &str,
) -> Result<Vec<Category>, ApiError> {
    client.get_json(&categories_path(course_phase_id)).await
}

pub async fn fetch_participants(
    client: &ApiClient,
    course_phase_id: &str,
) -> Result<Vec<Participant>, ApiError> {
    client.get_json(&participants_path(course_phase_id)).await
}
