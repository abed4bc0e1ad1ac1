use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{self, ApiClient, ScoreSource};
use crate::scoring::{Category, CompetencyScore, Participant};

/// Everything the reports need for one course phase.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Dataset {
    pub scores: Vec<CompetencyScore>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Dataset {
    /// Keep only scores belonging to the given course phase.
    /// Records without a phase id are kept.
    pub fn retain_phase(&mut self, course_phase_id: &str) {
        self.scores
            .retain(|s| s.course_phase_id.is_empty() || s.course_phase_id == course_phase_id);
    }
}

/// Fetch scores, categories and participants of a course phase concurrently.
///
/// Scores and categories are required. A failing participant request only
/// degrades grouping, so it is reported and replaced by an empty list.
pub async fn fetch_dataset(
    client: &ApiClient,
    course_phase_id: &str,
    source: ScoreSource,
    verbose: bool,
) -> Result<Dataset> {
    if verbose {
        eprintln!(
            "Fetching {:?} scores for phase {} from {}",
            source,
            course_phase_id,
            client.base_url()
        );
    }

    let (scores, categories, participants) = futures::join!(
        api::fetch_scores(client, course_phase_id, source),
        api::fetch_categories(client, course_phase_id),
        api::fetch_participants(client, course_phase_id),
    );

    let scores = scores.context("Failed to fetch scores")?;
    let categories = categories.context("Failed to fetch competency categories")?;
    let participants = match participants {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Participants unavailable, gender/nationality groups will be empty: {}", e);
            Vec::new()
        }
    };

    if verbose {
        eprintln!(
            "  Found {} scores, {} categories, {} participants",
            scores.len(),
            categories.len(),
            participants.len()
        );
    }

    Ok(Dataset {
        scores,
        categories,
        participants,
    })
}
