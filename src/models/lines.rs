//! Subway line directory
//!
//! Static line data (id, display name, color, ordered station names) used
//! by the line, station and destination pickers. The built-in directory is
//! embedded at compile time and can be replaced with a JSON file of the
//! same shape.

use std::path::Path;

use serde::Deserialize;

use crate::error::DirectoryError;

/// Embedded default directory
const EMBEDDED_LINES: &str = include_str!("../../data/lines.json");

/// A subway line and its stations
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LineInfo {
    pub id: String,
    pub name: String,
    /// Hex color such as "#00A84D"
    pub color: String,
    pub stations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineDirectory {
    pub lines: Vec<LineInfo>,
}

impl LineDirectory {
    /// Load the directory compiled into the binary
    pub fn embedded() -> Result<Self, DirectoryError> {
        Self::parse(EMBEDDED_LINES)
    }

    /// Load a directory from a JSON file
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, DirectoryError> {
        let directory: LineDirectory = serde_json::from_str(content)?;
        if directory.lines.is_empty() {
            return Err(DirectoryError::Empty);
        }
        Ok(directory)
    }

    pub fn get(&self, line_id: &str) -> Option<&LineInfo> {
        self.lines.iter().find(|l| l.id == line_id)
    }
}

/// Display label for a line id, covering lines beyond the numbered ones
pub fn line_label(line_id: &str) -> &'static str {
    match line_id {
        "1001" => "1호선",
        "1002" => "2호선",
        "1003" => "3호선",
        "1004" => "4호선",
        "1005" => "5호선",
        "1006" => "6호선",
        "1007" => "7호선",
        "1008" => "8호선",
        "1009" => "9호선",
        "1063" => "경의중앙선",
        "1065" => "공항철도",
        "1067" => "경춘선",
        "1075" => "수인분당선",
        "1077" => "신분당선",
        "1032" => "GTX-A",
        _ => "Subway",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_directory_has_nine_lines() {
        let directory = LineDirectory::embedded().unwrap();
        assert_eq!(directory.lines.len(), 9);
        let line2 = directory.get("1002").unwrap();
        assert_eq!(line2.name, "2호선");
        assert!(line2.stations.iter().any(|s| s == "신도림"));
    }

    #[test]
    fn test_embedded_labels_agree_with_line_label() {
        let directory = LineDirectory::embedded().unwrap();
        for line in &directory.lines {
            assert_eq!(line_label(&line.id), line.name);
        }
    }

    #[test]
    fn test_line_label_unknown() {
        assert_eq!(line_label("1065"), "공항철도");
        assert_eq!(line_label("9999"), "Subway");
    }

    #[test]
    fn test_parse_rejects_empty_directory() {
        let result = LineDirectory::parse(r#"{"lines": []}"#);
        assert!(matches!(result, Err(DirectoryError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.json");
        std::fs::write(
            &path,
            r##"{"lines": [{"id": "1077", "name": "신분당선", "color": "#D4003B", "stations": ["강남", "양재"]}]}"##,
        )
        .unwrap();

        let directory = LineDirectory::load(&path).unwrap();
        assert_eq!(directory.get("1077").unwrap().stations, vec!["강남", "양재"]);
        assert!(directory.get("1002").is_none());
    }
}
