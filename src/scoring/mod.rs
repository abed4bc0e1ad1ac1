pub mod groups;
pub mod level;
pub mod participants;
pub mod rollup;
pub mod stats;
pub mod types;
pub mod validation;

pub use groups::{group_observations, summarize_groups, GroupBy};
pub use level::{number_to_score_level, score_level_to_number, ScoreLevel};
pub use participants::{rank_participants, ParticipantScore};
pub use rollup::{category_average, competency_average, weighted_level, weighted_score};
pub use stats::{quartile, summarize, StatisticalDataPoint};
pub use types::*;
pub use validation::validate_categories;
