//! User-facing output for stored results
//!
//! The lookup mode answers the question the whole crawl exists for: "what
//! are the words for level N?". This module formats a stored record (or its
//! absence) for the terminal.

use crate::storage::LevelRecord;

/// Formats a level lookup result for printing
///
/// A found record lists the main words and, when present, the bonus words.
/// A missing level yields a single not-found line.
pub fn format_level_report(level: u32, record: Option<&LevelRecord>) -> String {
    match record {
        None => format!("Level {} not found.\n", level),
        Some(record) => {
            let mut out = format!("Level {}\n", record.level);
            out.push_str(&format!("Main words: {}\n", record.main_words.join(", ")));
            if !record.bonus_words.is_empty() {
                out.push_str(&format!("Bonus words: {}\n", record.bonus_words.join(", ")));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: u32, main: &[&str], bonus: &[&str]) -> LevelRecord {
        LevelRecord {
            level,
            main_words: main.iter().map(|s| s.to_string()).collect(),
            bonus_words: bonus.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_report_with_bonus_words() {
        let record = record(3, &["CAT", "DOG"], &["BONUS1", "BONUS2"]);
        let report = format_level_report(3, Some(&record));
        assert_eq!(
            report,
            "Level 3\nMain words: CAT, DOG\nBonus words: BONUS1, BONUS2\n"
        );
    }

    #[test]
    fn test_report_without_bonus_words() {
        let record = record(4, &["BIRD"], &[]);
        let report = format_level_report(4, Some(&record));
        assert_eq!(report, "Level 4\nMain words: BIRD\n");
        assert!(!report.contains("Bonus"));
    }

    #[test]
    fn test_report_for_missing_level() {
        let report = format_level_report(999, None);
        assert_eq!(report, "Level 999 not found.\n");
    }
}
