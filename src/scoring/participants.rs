use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::level::{number_to_score_level, ScoreLevel};
use super::rollup::{scored_competency_count, weighted_score};
use super::types::{Category, CompetencyScore, Participant};

/// Weighted rollup of one participant.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ParticipantScore {
    pub course_participation_id: String,
    pub name: String,
    /// Rollup on the 1..=5 scale, 0 when there is no data
    pub score: f64,
    /// None when there is no data
    pub level: Option<ScoreLevel>,
    pub scored_competencies: usize,
}

impl ParticipantScore {
    pub fn has_data(&self) -> bool {
        self.level.is_some()
    }
}

/// Ordering used for rankings.
///
/// Rows with data come first, ascending by score (lower is better). Ties
/// fall back to name, then participation id, so the order is total.
pub fn compare_ranked(a: &ParticipantScore, b: &ParticipantScore) -> Ordering {
    match (a.has_data(), b.has_data()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    a.score
        .partial_cmp(&b.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.course_participation_id.cmp(&b.course_participation_id))
}

/// Roll up every participant and return them ranked.
///
/// Participants come from the participant list and from the scores; a
/// scored participant missing from the list is named by its id.
pub fn rank_participants(
    scores: &[CompetencyScore],
    categories: &[Category],
    participants: &[Participant],
) -> Vec<ParticipantScore> {
    let mut by_participant: BTreeMap<&str, Vec<CompetencyScore>> = BTreeMap::new();
    for participant in participants {
        by_participant.entry(participant.course_participation_id.as_str()).or_default();
    }
    for score in scores {
        by_participant
            .entry(score.course_participation_id.as_str())
            .or_default()
            .push(score.clone());
    }

    let names: BTreeMap<&str, String> = participants
        .iter()
        .map(|p| (p.course_participation_id.as_str(), p.display_name()))
        .collect();

    let mut ranked: Vec<ParticipantScore> = by_participant
        .into_iter()
        .map(|(id, own_scores)| {
            let score = weighted_score(&own_scores, categories);
            ParticipantScore {
                course_participation_id: id.to_string(),
                name: names.get(id).cloned().unwrap_or_else(|| id.to_string()),
                score,
                level: if score == 0.0 {
                    None
                } else {
                    Some(number_to_score_level(score))
                },
                scored_competencies: scored_competency_count(&own_scores),
            }
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
}
