use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::level::ScoreLevel;
use super::rollup::weighted_level;
use super::stats::{summarize, StatisticalDataPoint};
use super::types::{Category, CompetencyScore, Participant};

const UNCATEGORIZED: &str = "Uncategorized";
const UNKNOWN: &str = "Unknown";

/// Attribute used to split score observations into chart groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One group per category, observations are individual scores
    Category,
    /// One group per competency, observations are individual scores
    Competency,
    /// One group per score author
    Author,
    /// One group per gender, observations are participant rollups
    Gender,
    /// One group per nationality, observations are participant rollups
    Nationality,
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroupBy::Category => "category",
            GroupBy::Competency => "competency",
            GroupBy::Author => "author",
            GroupBy::Gender => "gender",
            GroupBy::Nationality => "nationality",
        };
        f.write_str(s)
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Group labels keyed by id.
///
/// Items are `(id, name, qualifier)`. A name shared by several ids becomes
/// "name (qualifier)"; if that still collides the id is appended as well.
fn unique_labels<'a>(items: Vec<(&'a str, &'a str, &'a str)>) -> HashMap<&'a str, String> {
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for &(_, name, _) in &items {
        *name_counts.entry(name).or_insert(0) += 1;
    }

    let qualified: Vec<(&str, String)> = items
        .iter()
        .map(|&(id, name, qualifier)| {
            if name_counts[name] > 1 {
                (id, format!("{} ({})", name, qualifier))
            } else {
                (id, name.to_string())
            }
        })
        .collect();

    let mut label_counts: HashMap<&str, usize> = HashMap::new();
    for (_, label) in &qualified {
        *label_counts.entry(label.as_str()).or_insert(0) += 1;
    }

    qualified
        .iter()
        .map(|(id, label)| {
            if label_counts[label.as_str()] > 1 {
                (*id, format!("{} [{}]", label, id))
            } else {
                (*id, label.clone())
            }
        })
        .collect()
}

fn push_labelled(groups: &mut BTreeMap<String, Vec<ScoreLevel>>, label: Option<&String>, level: ScoreLevel) {
    let key = label.cloned().unwrap_or_else(|| UNCATEGORIZED.to_string());
    groups.entry(key).or_default().push(level);
}

/// Split observations into named groups.
///
/// Score-based groupings (category, competency, author) use each score
/// record as one observation. Participant-based groupings (gender,
/// nationality) use each participant's weighted rollup, mapped back to a
/// level; participants without any rollup are skipped.
pub fn group_observations(
    group_by: GroupBy,
    scores: &[CompetencyScore],
    categories: &[Category],
    participants: &[Participant],
) -> BTreeMap<String, Vec<ScoreLevel>> {
    let mut groups: BTreeMap<String, Vec<ScoreLevel>> = BTreeMap::new();

    match group_by {
        GroupBy::Category => {
            let labels = unique_labels(
                categories
                    .iter()
                    .map(|cat| (cat.id.as_str(), cat.name.as_str(), cat.id.as_str()))
                    .collect(),
            );
            // competency id -> category id
            let category_of: HashMap<&str, &str> = categories
                .iter()
                .flat_map(|cat| cat.competencies.iter().map(move |c| (c.id.as_str(), cat.id.as_str())))
                .collect();

            for score in scores {
                let label = category_of
                    .get(score.competency_id.as_str())
                    .and_then(|category_id| labels.get(category_id));
                push_labelled(&mut groups, label, score.score_level);
            }
        }
        GroupBy::Competency => {
            let labels = unique_labels(
                categories
                    .iter()
                    .flat_map(|cat| {
                        cat.competencies
                            .iter()
                            .map(move |c| (c.id.as_str(), c.name.as_str(), cat.name.as_str()))
                    })
                    .collect(),
            );

            for score in scores {
                let label = labels.get(score.competency_id.as_str());
                push_labelled(&mut groups, label, score.score_level);
            }
        }
        GroupBy::Author => {
            for score in scores {
                let key = non_empty_or_unknown(score.author.as_deref());
                groups.entry(key).or_default().push(score.score_level);
            }
        }
        GroupBy::Gender | GroupBy::Nationality => {
            let mut by_participant: HashMap<&str, Vec<CompetencyScore>> = HashMap::new();
            for score in scores {
                by_participant
                    .entry(score.course_participation_id.as_str())
                    .or_default()
                    .push(score.clone());
            }

            for participant in participants {
                let Some(own_scores) = by_participant.get(participant.course_participation_id.as_str())
                else {
                    continue;
                };
                let Some(level) = weighted_level(own_scores, categories) else {
                    continue;
                };
                let attribute = if group_by == GroupBy::Gender {
                    participant.gender.as_deref()
                } else {
                    participant.nationality.as_deref()
                };
                groups
                    .entry(non_empty_or_unknown(attribute))
                    .or_default()
                    .push(level);
            }
        }
    }

    groups
}

/// Group observations and summarize every group, ordered by group name.
pub fn summarize_groups(
    group_by: GroupBy,
    scores: &[CompetencyScore],
    categories: &[Category],
    participants: &[Participant],
) -> Vec<StatisticalDataPoint> {
    group_observations(group_by, scores, categories, participants)
        .iter()
        .map(|(name, levels)| summarize(name, levels))
        .collect()
}
