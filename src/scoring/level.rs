use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-step score level used by assessments and evaluations.
///
/// Ordered best to worst. The numeric position runs the same way:
/// `VeryGood` is 1 and `VeryBad` is 5, so a lower number is a better score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreLevel {
    VeryGood,
    Good,
    Ok,
    Bad,
    VeryBad,
}

impl ScoreLevel {
    /// All levels in numeric order (1..=5)
    pub const ALL: [ScoreLevel; 5] = [
        ScoreLevel::VeryGood,
        ScoreLevel::Good,
        ScoreLevel::Ok,
        ScoreLevel::Bad,
        ScoreLevel::VeryBad,
    ];

    pub fn to_number(self) -> u8 {
        match self {
            ScoreLevel::VeryGood => 1,
            ScoreLevel::Good => 2,
            ScoreLevel::Ok => 3,
            ScoreLevel::Bad => 4,
            ScoreLevel::VeryBad => 5,
        }
    }

    /// Human-readable label, e.g. "Very Good"
    pub fn label(self) -> &'static str {
        match self {
            ScoreLevel::VeryGood => "Very Good",
            ScoreLevel::Good => "Good",
            ScoreLevel::Ok => "Ok",
            ScoreLevel::Bad => "Bad",
            ScoreLevel::VeryBad => "Very Bad",
        }
    }

    /// Wire name used by the backend ("veryGood", "ok", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLevel::VeryGood => "veryGood",
            ScoreLevel::Good => "good",
            ScoreLevel::Ok => "ok",
            ScoreLevel::Bad => "bad",
            ScoreLevel::VeryBad => "veryBad",
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoreLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "verygood" => Ok(ScoreLevel::VeryGood),
            "good" => Ok(ScoreLevel::Good),
            "ok" => Ok(ScoreLevel::Ok),
            "bad" => Ok(ScoreLevel::Bad),
            "verybad" => Ok(ScoreLevel::VeryBad),
            _ => bail!("Unknown score level: {}", s),
        }
    }
}

/// Numeric position of a level, or 0 when there is no level.
///
/// Callers must read 0 as "no data", never as a score.
pub fn score_level_to_number(level: Option<ScoreLevel>) -> u8 {
    level.map_or(0, ScoreLevel::to_number)
}

/// Map a (possibly fractional) numeric score back onto a level.
///
/// Bins are centred on the integer positions: `<= 1.5` is `VeryGood`,
/// `<= 2.5` is `Good` and so on. Anything above 4.5 (including NaN) is `VeryBad`.
pub fn number_to_score_level(value: f64) -> ScoreLevel {
    if value <= 1.5 {
        ScoreLevel::VeryGood
    } else if value <= 2.5 {
        ScoreLevel::Good
    } else if value <= 3.5 {
        ScoreLevel::Ok
    } else if value <= 4.5 {
        ScoreLevel::Bad
    } else {
        ScoreLevel::VeryBad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_cover_one_to_five() {
        let numbers: Vec<u8> = ScoreLevel::ALL.iter().map(|l| l.to_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_round_trip_through_bin_centres() {
        for level in ScoreLevel::ALL {
            let n = score_level_to_number(Some(level));
            assert_eq!(number_to_score_level(n as f64), level);
        }
    }

    #[test]
    fn test_missing_level_is_zero() {
        assert_eq!(score_level_to_number(None), 0);
    }

    #[test]
    fn test_bin_boundaries() {
        assert_eq!(number_to_score_level(1.5), ScoreLevel::VeryGood);
        assert_eq!(number_to_score_level(1.51), ScoreLevel::Good);
        assert_eq!(number_to_score_level(2.5), ScoreLevel::Good);
        assert_eq!(number_to_score_level(3.5), ScoreLevel::Ok);
        assert_eq!(number_to_score_level(4.5), ScoreLevel::Bad);
        assert_eq!(number_to_score_level(4.51), ScoreLevel::VeryBad);
    }

    #[test]
    fn test_out_of_range_values_still_bin() {
        assert_eq!(number_to_score_level(0.0), ScoreLevel::VeryGood);
        assert_eq!(number_to_score_level(-3.0), ScoreLevel::VeryGood);
        assert_eq!(number_to_score_level(9.0), ScoreLevel::VeryBad);
        assert_eq!(number_to_score_level(f64::NAN), ScoreLevel::VeryBad);
    }

    #[test]
    fn test_parse_wire_and_loose_names() {
        assert_eq!("veryGood".parse::<ScoreLevel>().unwrap(), ScoreLevel::VeryGood);
        assert_eq!("very_bad".parse::<ScoreLevel>().unwrap(), ScoreLevel::VeryBad);
        assert_eq!("Very Good".parse::<ScoreLevel>().unwrap(), ScoreLevel::VeryGood);
        assert_eq!("OK".parse::<ScoreLevel>().unwrap(), ScoreLevel::Ok);
        assert!("excellent".parse::<ScoreLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_backend_names() {
        let json = serde_json::to_string(&ScoreLevel::VeryGood).unwrap();
        assert_eq!(json, "\"veryGood\"");
        let parsed: ScoreLevel = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(parsed, ScoreLevel::Bad);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for level in ScoreLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }
}
