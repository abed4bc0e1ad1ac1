use super::level::ScoreLevel;
use super::types::{Category, CompetencyScore};

/// Mean numeric level of all scores given for one competency.
///
/// Returns None when the competency has no scores.
pub fn competency_average(scores: &[CompetencyScore], competency_id: &str) -> Option<f64> {
    let (sum, count) = scores
        .iter()
        .filter(|s| s.competency_id == competency_id)
        .fold((0u32, 0u32), |(sum, count), s| {
            (sum + u32::from(s.score_level.to_number()), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(f64::from(sum) / f64::from(count))
    }
}

fn has_scores(scores: &[CompetencyScore], competency_id: &str) -> bool {
    scores.iter().any(|s| s.competency_id == competency_id)
}

/// Weighted average of one category over its scored competencies.
///
/// Returns None when no competency of the category is scored, or when the
/// scored competencies carry no weight at all.
pub fn category_average(scores: &[CompetencyScore], category: &Category) -> Option<f64> {
    let competency_weight_sum: f64 = category
        .competencies
        .iter()
        .filter(|c| has_scores(scores, &c.id))
        .map(|c| c.weight)
        .sum();

    if competency_weight_sum == 0.0 {
        return None;
    }

    let average = category
        .competencies
        .iter()
        .map(|c| match competency_average(scores, &c.id) {
            Some(avg) => avg * c.weight / competency_weight_sum,
            None => 0.0,
        })
        .sum();

    Some(average)
}

/// Weighted score over the category hierarchy, on the 1..=5 level scale.
///
/// Only categories with at least one scored competency count towards the
/// total weight, so unscored categories neither help nor hurt. Returns 0
/// ("no data") for empty input or when no active category carries weight.
pub fn weighted_score(scores: &[CompetencyScore], categories: &[Category]) -> f64 {
    if scores.is_empty() || categories.is_empty() {
        return 0.0;
    }

    let total_weight: f64 = categories
        .iter()
        .filter(|cat| cat.competencies.iter().any(|c| has_scores(scores, &c.id)))
        .map(|cat| cat.weight)
        .sum();

    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted_sum: f64 = categories
        .iter()
        .filter_map(|cat| category_average(scores, cat).map(|avg| avg * cat.weight))
        .sum();

    weighted_sum / total_weight
}

/// Count the distinct competencies that received at least one score
pub fn scored_competency_count(scores: &[CompetencyScore]) -> usize {
    let mut ids: Vec<&str> = scores.iter().map(|s| s.competency_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

/// Helper used by grouping and ranking: rollup mapped back to a level.
/// None means there was nothing to roll up.
pub fn weighted_level(scores: &[CompetencyScore], categories: &[Category]) -> Option<ScoreLevel> {
    let score = weighted_score(scores, categories);
    if score == 0.0 {
        None
    } else {
        Some(super::level::number_to_score_level(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Competency;

    fn competency(id: &str, category_id: &str, weight: f64) -> Competency {
        Competency {
            id: id.to_string(),
            category_id: category_id.to_string(),
            name: id.to_string(),
            description: String::new(),
            weight,
            description_very_good: String::new(),
            description_good: String::new(),
            description_ok: String::new(),
            description_bad: String::new(),
            description_very_bad: String::new(),
        }
    }

    fn category(id: &str, weight: f64, competencies: Vec<Competency>) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            weight,
            competencies,
        }
    }

    fn score(competency_id: &str, level: ScoreLevel) -> CompetencyScore {
        CompetencyScore {
            competency_id: competency_id.to_string(),
            course_participation_id: "p-1".to_string(),
            course_phase_id: "phase-1".to_string(),
            score_level: level,
            author: None,
        }
    }

    #[test]
    fn test_empty_scores_returns_zero() {
        let categories = vec![category("cat", 1.0, vec![competency("c1", "cat", 1.0)])];
        assert_eq!(weighted_score(&[], &categories), 0.0);
    }

    #[test]
    fn test_empty_categories_returns_zero() {
        let scores = vec![score("c1", ScoreLevel::Good)];
        assert_eq!(weighted_score(&scores, &[]), 0.0);
    }

    #[test]
    fn test_single_competency() {
        let categories = vec![category("cat", 1.0, vec![competency("c1", "cat", 1.0)])];
        let scores = vec![score("c1", ScoreLevel::Ok)];
        assert_eq!(weighted_score(&scores, &categories), 3.0);
    }

    #[test]
    fn test_multiple_scorers_are_averaged() {
        let categories = vec![category("cat", 1.0, vec![competency("c1", "cat", 1.0)])];
        let scores = vec![
            score("c1", ScoreLevel::VeryGood),
            score("c1", ScoreLevel::Ok),
            score("c1", ScoreLevel::Ok),
        ];
        // (1 + 3 + 3) / 3
        assert!((weighted_score(&scores, &categories) - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_competency_weights_within_category() {
        let categories = vec![category(
            "cat",
            1.0,
            vec![competency("c1", "cat", 3.0), competency("c2", "cat", 1.0)],
        )];
        let scores = vec![score("c1", ScoreLevel::VeryGood), score("c2", ScoreLevel::VeryBad)];
        // (1 * 3 + 5 * 1) / 4 = 2
        assert_eq!(weighted_score(&scores, &categories), 2.0);
    }

    #[test]
    fn test_unscored_competency_does_not_dilute_category() {
        let categories = vec![category(
            "cat",
            1.0,
            vec![competency("c1", "cat", 1.0), competency("c2", "cat", 10.0)],
        )];
        let scores = vec![score("c1", ScoreLevel::Bad)];
        assert_eq!(weighted_score(&scores, &categories), 4.0);
    }

    #[test]
    fn test_category_weights() {
        let categories = vec![
            category("tech", 3.0, vec![competency("c1", "tech", 1.0)]),
            category("soft", 1.0, vec![competency("c2", "soft", 1.0)]),
        ];
        let scores = vec![score("c1", ScoreLevel::VeryGood), score("c2", ScoreLevel::VeryBad)];
        // (1 * 3 + 5 * 1) / 4 = 2
        assert_eq!(weighted_score(&scores, &categories), 2.0);
    }

    #[test]
    fn test_unscored_category_is_ignored() {
        let categories = vec![
            category("scored", 5.0, vec![competency("c1", "scored", 1.0)]),
            category("unscored", 10.0, vec![competency("c2", "unscored", 1.0)]),
        ];
        let scores = vec![score("c1", ScoreLevel::Good), score("c1", ScoreLevel::Ok)];
        let own_average = category_average(&scores, &categories[0]).unwrap();
        assert_eq!(weighted_score(&scores, &categories), own_average);
        assert_eq!(own_average, 2.5);
    }

    #[test]
    fn test_order_of_scores_does_not_matter() {
        let categories = vec![
            category("tech", 2.0, vec![competency("c1", "tech", 1.0), competency("c2", "tech", 2.0)]),
            category("soft", 1.0, vec![competency("c3", "soft", 1.0)]),
        ];
        let mut scores = vec![
            score("c1", ScoreLevel::VeryGood),
            score("c2", ScoreLevel::Bad),
            score("c3", ScoreLevel::Ok),
            score("c2", ScoreLevel::Good),
        ];
        let forward = weighted_score(&scores, &categories);
        scores.reverse();
        let backward = weighted_score(&scores, &categories);
        scores.swap(0, 2);
        let shuffled = weighted_score(&scores, &categories);
        assert!((forward - backward).abs() < 1e-9);
        assert!((forward - shuffled).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_competency_is_ignored() {
        let categories = vec![category(
            "cat",
            1.0,
            vec![competency("c1", "cat", 1.0), competency("c2", "cat", 0.0)],
        )];
        let scores = vec![score("c1", ScoreLevel::Good), score("c2", ScoreLevel::VeryBad)];
        assert_eq!(weighted_score(&scores, &categories), 2.0);
    }

    #[test]
    fn test_category_with_only_zero_weight_competencies_keeps_its_weight() {
        let categories = vec![
            category("a", 1.0, vec![competency("c1", "a", 1.0)]),
            category("b", 1.0, vec![competency("c2", "b", 0.0)]),
        ];
        let scores = vec![score("c1", ScoreLevel::Good), score("c2", ScoreLevel::Good)];
        // "b" is active but contributes nothing: 2 * 1 / 2
        assert_eq!(weighted_score(&scores, &categories), 1.0);
        assert!(category_average(&scores, &categories[1]).is_none());
    }

    #[test]
    fn test_zero_category_weight_returns_zero() {
        let categories = vec![category("cat", 0.0, vec![competency("c1", "cat", 1.0)])];
        let scores = vec![score("c1", ScoreLevel::Good)];
        assert_eq!(weighted_score(&scores, &categories), 0.0);
    }

    #[test]
    fn test_scores_for_unknown_competencies_are_ignored() {
        let categories = vec![category("cat", 1.0, vec![competency("c1", "cat", 1.0)])];
        let scores = vec![score("c1", ScoreLevel::Ok), score("ghost", ScoreLevel::VeryGood)];
        assert_eq!(weighted_score(&scores, &categories), 3.0);
    }

    #[test]
    fn test_competency_average_none_without_scores() {
        let scores = vec![score("c1", ScoreLevel::Ok)];
        assert!(competency_average(&scores, "c2").is_none());
        assert_eq!(competency_average(&scores, "c1"), Some(3.0));
    }

    #[test]
    fn test_weighted_level() {
        let categories = vec![category("cat", 1.0, vec![competency("c1", "cat", 1.0)])];
        let scores = vec![score("c1", ScoreLevel::Good), score("c1", ScoreLevel::Ok)];
        // 2.5 bins to Good
        assert_eq!(weighted_level(&scores, &categories), Some(ScoreLevel::Good));
        assert_eq!(weighted_level(&[], &categories), None);
    }

    #[test]
    fn test_scored_competency_count() {
        let scores = vec![
            score("c1", ScoreLevel::Good),
            score("c2", ScoreLevel::Ok),
            score("c1", ScoreLevel::Bad),
        ];
        assert_eq!(scored_competency_count(&scores), 2);
    }
}
