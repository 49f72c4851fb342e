use serde::{Deserialize, Serialize};
use chrono::{Local, TimeZone};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// A single blood pressure measurement supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureReading {
    /// Client-side identifier for the reading
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: f64,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: f64,

    /// When the reading was taken, in epoch milliseconds
    pub timestamp: i64,

    /// Optional notes about the reading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BloodPressureReading {
    /// Format the reading as `YYYY-MM-DD: systolic/diastolic` in local time
    pub fn summary_line(&self) -> String {
        let date = Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        format!("{}: {}/{}", date, self.systolic, self.diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(systolic: f64, diastolic: f64, timestamp: i64) -> BloodPressureReading {
        BloodPressureReading {
            id: "r1".to_string(),
            systolic,
            diastolic,
            timestamp,
            note: None,
        }
    }

    #[test]
    fn test_summary_line_prints_whole_numbers() {
        let line = reading(128.0, 84.0, 1_700_000_000_000).summary_line();
        assert!(line.ends_with(": 128/84"), "unexpected line: {}", line);
    }

    #[test]
    fn test_summary_line_out_of_range_timestamp() {
        let line = reading(120.0, 80.0, i64::MAX).summary_line();
        assert_eq!(line, "unknown date: 120/80");
    }

    #[test]
    fn test_reading_note_is_optional() {
        let parsed: BloodPressureReading = serde_json::from_str(
            r#"{"id":"a","systolic":121,"diastolic":79,"timestamp":1700000000000}"#,
        )
        .unwrap();
        assert_eq!(parsed.note, None);
        assert_eq!(parsed.systolic, 121.0);
    }
}
