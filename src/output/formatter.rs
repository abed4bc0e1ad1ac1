use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{ParticipantScore, ScoreLevel, StatisticalDataPoint};

/// Width of the level column ("Very Good" is the longest label)
const LEVEL_WIDTH: usize = 9;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width available for the name column given the fixed columns around it
fn name_width(names: &[&str], fixed_width: usize) -> usize {
    let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        // Very narrow terminal
        Some(_) => longest.min(20),
        None => longest,
    }
}

fn pad_name(name: &str, width: usize) -> String {
    let truncated = truncate_name(name, width);
    let pad = width.saturating_sub(truncated.chars().count());
    format!("{}{}", truncated, " ".repeat(pad))
}

/// Level label padded to a fixed width, colored green (best) to red (worst)
pub fn format_level(level: ScoreLevel, use_colors: bool) -> String {
    let padded = format!("{:<width$}", level.label(), width = LEVEL_WIDTH);
    if !use_colors {
        return padded;
    }
    match level {
        ScoreLevel::VeryGood => padded.green().bold().to_string(),
        ScoreLevel::Good => padded.green().to_string(),
        ScoreLevel::Ok => padded.yellow().to_string(),
        ScoreLevel::Bad => padded.red().to_string(),
        ScoreLevel::VeryBad => padded.red().bold().to_string(),
    }
}

/// Numeric score with two decimals; the 0 "no data" sentinel shows as "-"
pub fn format_average(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Per-level counts as "VG/G/O/B/VB"
fn format_counts(point: &StatisticalDataPoint) -> String {
    ScoreLevel::ALL
        .iter()
        .map(|&level| point.count_of(level).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Format group statistics as an aligned table with a header row
/// Columns: Group, N, Avg, Median, Q1, Q3, counts per level (best first)
pub fn format_summary_table(points: &[StatisticalDataPoint], use_colors: bool) -> String {
    if points.is_empty() {
        return "No scores found.".to_string();
    }

    // N(5) Avg(6) Median(9) Q1(5) Q3(5) counts(~14) plus separators
    let fixed_width = 5 + 6 + LEVEL_WIDTH + 5 + 5 + 14 + 2 * 6;
    let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
    let width = name_width(&names, fixed_width).max("Group".len());

    let header = format!(
        "{}  {:>5}  {:>6}  {:<lw$}  {:>5}  {:>5}  {}",
        pad_name("Group", width),
        "N",
        "Avg",
        "Median",
        "Q1",
        "Q3",
        "VG/G/O/B/VB",
        lw = LEVEL_WIDTH
    );

    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];

    for point in points {
        let median = if point.count == 0 {
            format!("{:<width$}", "-", width = LEVEL_WIDTH)
        } else {
            format_level(point.median, use_colors)
        };
        lines.push(format!(
            "{}  {:>5}  {:>6}  {}  {:>5}  {:>5}  {}",
            pad_name(&point.name, width),
            point.count,
            format_average(point.average),
            median,
            format_average(point.lower_quartile),
            format_average(point.upper_quartile),
            format_counts(point)
        ));
    }

    lines.join("\n")
}

/// Format group statistics as tab-separated values for scripting
/// Columns: name, count, average, median, q1, q3, then counts from very good to very bad
pub fn format_summary_tsv(points: &[StatisticalDataPoint]) -> String {
    points
        .iter()
        .map(|point| {
            let counts = ScoreLevel::ALL
                .iter()
                .map(|&level| point.count_of(level).to_string())
                .collect::<Vec<_>>()
                .join("\t");
            format!(
                "{}\t{}\t{:.2}\t{}\t{:.2}\t{:.2}\t{}",
                point.name,
                point.count,
                point.average,
                point.median.as_str(),
                point.lower_quartile,
                point.upper_quartile,
                counts
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked participants, one per line, best first
/// Columns: Index, Score, Level, Name, scored competency count
pub fn format_ranking_table(rows: &[ParticipantScore], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No participants found.".to_string();
    }

    // Index(4) Score(6) Level(9) Count(~16) plus separators
    let fixed_width = 4 + 6 + LEVEL_WIDTH + 16 + 2 * 4;
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let width = name_width(&names, fixed_width);

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!("{:>6}", format_average(row.score));
            let level = match row.level {
                Some(level) => format_level(level, use_colors),
                None => format!("{:<width$}", "no data", width = LEVEL_WIDTH),
            };
            let count = format!("{} competencies", row.scored_competencies);

            if use_colors {
                format!(
                    "{}  {}  {}  {}  {}",
                    index_str.dimmed(),
                    score_str.bold(),
                    level,
                    pad_name(&row.name, width),
                    count.dimmed()
                )
            } else {
                format!(
                    "{}  {}  {}  {}  {}",
                    index_str,
                    score_str,
                    level,
                    pad_name(&row.name, width),
                    count
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked participants as tab-separated values for scripting
/// Columns: participation id, name, score, level ("" when no data), scored competencies
pub fn format_ranking_tsv(rows: &[ParticipantScore]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{:.2}\t{}\t{}",
                row.course_participation_id,
                row.name,
                row.score,
                row.level.map(ScoreLevel::as_str).unwrap_or(""),
                row.scored_competencies
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::summarize;

    fn sample_row(name: &str, score: f64, level: Option<ScoreLevel>) -> ParticipantScore {
        ParticipantScore {
            course_participation_id: format!("id-{}", name),
            name: name.to_string(),
            score,
            level,
            scored_competencies: 3,
        }
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("a very long group name", 10), "a very ...");
        assert_eq!(truncate_name("abcdef", 3), "abc");
    }

    #[test]
    fn test_pad_name() {
        assert_eq!(pad_name("ab", 4), "ab  ");
        assert_eq!(pad_name("äöü", 4), "äöü ");
    }

    #[test]
    fn test_format_level_plain() {
        assert_eq!(format_level(ScoreLevel::VeryGood, false), "Very Good");
        assert_eq!(format_level(ScoreLevel::Ok, false), "Ok       ");
    }

    #[test]
    fn test_format_level_colored_keeps_label() {
        let colored = format_level(ScoreLevel::Bad, true);
        assert!(colored.contains("Bad"));
        assert_ne!(colored, format_level(ScoreLevel::Bad, false));
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(0.0), "-");
        assert_eq!(format_average(2.2), "2.20");
        assert_eq!(format_average(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_summary_table_empty() {
        assert_eq!(format_summary_table(&[], false), "No scores found.");
    }

    #[test]
    fn test_summary_table_contents() {
        use ScoreLevel::*;
        let points = vec![summarize("Technical", &[Good, Ok, VeryGood, Bad, VeryGood])];
        let table = format_summary_table(&points, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Group"));
        assert!(lines[1].starts_with("Technical"));
        assert!(lines[1].contains("2.20"));
        assert!(lines[1].contains("Good"));
        assert!(lines[1].contains("2/1/1/1/0"));
    }

    #[test]
    fn test_summary_table_empty_group_has_no_median() {
        let points = vec![summarize("Nobody", &[])];
        let table = format_summary_table(&points, false);
        assert!(!table.lines().nth(1).unwrap().contains("Very Good"));
    }

    #[test]
    fn test_summary_tsv() {
        use ScoreLevel::*;
        let points = vec![summarize("Technical", &[Good, Bad])];
        assert_eq!(
            format_summary_tsv(&points),
            "Technical\t2\t3.00\tbad\t2.50\t3.50\t0\t1\t0\t1\t0"
        );
    }

    #[test]
    fn test_ranking_table() {
        let rows = vec![
            sample_row("Ada", 1.25, Some(ScoreLevel::VeryGood)),
            sample_row("Bob", 0.0, None),
        ];
        let table = format_ranking_table(&rows, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[0].contains("1.25"));
        assert!(lines[0].contains("Very Good"));
        assert!(lines[1].contains("no data"));
        assert!(lines[1].contains("     -"));
    }

    #[test]
    fn test_ranking_table_empty() {
        assert_eq!(format_ranking_table(&[], false), "No participants found.");
    }

    #[test]
    fn test_ranking_tsv() {
        let rows = vec![
            sample_row("Ada", 2.5, Some(ScoreLevel::Good)),
            sample_row("Bob", 0.0, None),
        ];
        assert_eq!(
            format_ranking_tsv(&rows),
            "id-Ada\tAda\t2.50\tgood\t3\nid-Bob\tBob\t0.00\t\t3"
        );
    }
}
