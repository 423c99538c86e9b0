//! Row Type
//!
//! A row is one record from the spreadsheet endpoint: a JSON object whose
//! keys are the column headers of the sheet tab. The summary pipeline only
//! ever reads the diagnosis column; everything else is carried opaquely.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder label for rows whose diagnosis cell is missing or blank.
pub const UNSPECIFIED_LABEL: &str = "-";

/// A single spreadsheet row, keyed by column header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Map<String, Value>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Get a cell as text. Non-string cells are treated as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Extract the diagnosis label for this row.
    ///
    /// The cell value is trimmed; a missing, blank, or non-text cell
    /// normalizes to [`UNSPECIFIED_LABEL`]. This is never an error.
    pub fn label(&self, diagnosis_key: &str) -> &str {
        self.get(diagnosis_key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNSPECIFIED_LABEL)
    }
}

impl From<Map<String, Value>> for Row {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_label_trims_whitespace() {
        let r = row(json!({"การวินิจฉัย": " Flu "}));
        assert_eq!(r.label("การวินิจฉัย"), "Flu");
    }

    #[test]
    fn test_blank_cell_is_unspecified() {
        let r = row(json!({"การวินิจฉัย": ""}));
        assert_eq!(r.label("การวินิจฉัย"), UNSPECIFIED_LABEL);

        let r = row(json!({"การวินิจฉัย": "   "}));
        assert_eq!(r.label("การวินิจฉัย"), UNSPECIFIED_LABEL);
    }

    #[test]
    fn test_missing_cell_is_unspecified() {
        let r = row(json!({"other": "value"}));
        assert_eq!(r.label("การวินิจฉัย"), UNSPECIFIED_LABEL);

        let r = Row::new();
        assert_eq!(r.label("การวินิจฉัย"), UNSPECIFIED_LABEL);
    }

    #[test]
    fn test_non_text_cell_is_unspecified() {
        let r = row(json!({"การวินิจฉัย": 42}));
        assert_eq!(r.label("การวินิจฉัย"), UNSPECIFIED_LABEL);
    }

    #[test]
    fn test_deserialize_array() {
        let rows: Vec<Row> =
            serde_json::from_str(r#"[{"a": "1"}, {"a": "2", "b": "x"}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("b"), Some("x"));
    }
}
