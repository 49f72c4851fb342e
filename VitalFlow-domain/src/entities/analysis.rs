use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::lenient;

/// Coach's reading of a blood pressure trend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthAnalysis {
    /// One-line summary of the trend
    pub trend: String,

    /// Actionable advice
    pub advice: String,

    /// Epoch milliseconds at which the analysis was produced
    pub generated_at: i64,
}

impl HealthAnalysis {
    pub fn new(trend: impl Into<String>, advice: impl Into<String>, generated_at: i64) -> Self {
        Self {
            trend: trend.into(),
            advice: advice.into(),
            generated_at,
        }
    }
}

/// Shape the model is asked to return before it is stamped
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisDraft {
    #[serde(default, deserialize_with = "lenient::string")]
    pub trend: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub advice: String,
}

impl AnalysisDraft {
    /// Stamp the draft with the time it was produced
    pub fn stamp(self, generated_at: i64) -> HealthAnalysis {
        HealthAnalysis::new(self.trend, self.advice, generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_tolerates_null_and_non_string_fields() {
        let draft: AnalysisDraft =
            serde_json::from_str(r#"{"trend":null,"advice":["少盐","多走路"]}"#).unwrap();

        assert_eq!(draft.trend, "");
        assert_eq!(draft.advice, "少盐\n多走路");
    }

    #[test]
    fn test_stamp_keeps_draft_text() {
        let draft: AnalysisDraft = serde_json::from_str(r#"{"trend":"平稳"}"#).unwrap();
        let analysis = draft.stamp(42);

        assert_eq!(analysis, HealthAnalysis::new("平稳", "", 42));
    }
}
