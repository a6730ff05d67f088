//! Classification of scdl output lines for colored display
//!
//! The classification is a keyword heuristic over the raw text, not a parser
//! of scdl's output format.

use crate::data_structures::{LineCategory, LogLine};

/// Utilities for tagging tool output with a display category
pub struct LineClassifier;

impl LineClassifier {
    /// Classify one line of tool output.
    ///
    /// Checks run case-insensitively, first match wins:
    /// "error"/"failed", then "warning", then "downloaded"/"complete",
    /// then "downloading".
    pub fn classify(line: &str) -> LineCategory {
        let lower = line.to_lowercase();
        if lower.contains("error") || lower.contains("failed") {
            LineCategory::Error
        } else if lower.contains("warning") {
            LineCategory::Warning
        } else if lower.contains("downloaded") || lower.contains("complete") {
            LineCategory::Success
        } else if lower.contains("downloading") {
            LineCategory::Info
        } else {
            LineCategory::Plain
        }
    }

    /// Marker placed in front of classified tool output
    pub fn prefix(category: LineCategory) -> &'static str {
        match category {
            LineCategory::Error => "❌ ",
            LineCategory::Warning => "⚠️ ",
            LineCategory::Success => "✅ ",
            LineCategory::Info => "⬇️ ",
            LineCategory::Plain => "",
        }
    }

    /// Turn a raw line of tool output into a decorated log line
    pub fn to_log_line(line: &str) -> LogLine {
        let category = Self::classify(line);
        LogLine::new(format!("{}{}", Self::prefix(category), line), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sample_lines() {
        assert_eq!(LineClassifier::classify("ERROR: network failed"), LineCategory::Error);
        assert_eq!(LineClassifier::classify("Downloading track.mp3"), LineCategory::Info);
        assert_eq!(LineClassifier::classify("Track Downloaded"), LineCategory::Success);
        assert_eq!(LineClassifier::classify("WARNING: slow connection"), LineCategory::Warning);
        assert_eq!(LineClassifier::classify("Track 3 of 10"), LineCategory::Plain);
    }

    #[test]
    fn test_classify_priority_order() {
        // error beats everything else
        assert_eq!(LineClassifier::classify("Warning: download failed"), LineCategory::Error);
        assert_eq!(LineClassifier::classify("warning: track downloaded twice"), LineCategory::Warning);
        // "downloaded" is checked before "downloading"
        assert_eq!(LineClassifier::classify("downloading done, 3 downloaded"), LineCategory::Success);
        assert_eq!(LineClassifier::classify("Playlist complete"), LineCategory::Success);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(LineClassifier::classify("HTTPError 404"), LineCategory::Error);
        assert_eq!(LineClassifier::classify("DOWNLOADING 1/2"), LineCategory::Info);
    }

    #[test]
    fn test_to_log_line_prefixes_by_category() {
        let line = LineClassifier::to_log_line("Downloading track.mp3");
        assert_eq!(line.category, LineCategory::Info);
        assert_eq!(line.text, "⬇️ Downloading track.mp3");

        let line = LineClassifier::to_log_line("ERROR: network failed");
        assert_eq!(line.text, "❌ ERROR: network failed");

        let line = LineClassifier::to_log_line("Track 3 of 10");
        assert_eq!(line.category, LineCategory::Plain);
        assert_eq!(line.text, "Track 3 of 10");
    }
}
