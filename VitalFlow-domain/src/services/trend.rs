use chrono::Utc;
use tracing::warn;

use crate::entities::{AnalysisDraft, BloodPressureReading, HealthAnalysis};
use crate::llm::{ChatMessage, ChatOptions, LlmClient, LlmError};
use crate::parser::parse_structured;

/// Number of most recent readings sent to the model
pub const MAX_READINGS: usize = 10;

const ANALYSIS_TEMPERATURE: f32 = 0.4;

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Analysis returned when there is nothing to analyse
pub fn no_data_analysis() -> HealthAnalysis {
    HealthAnalysis::new("暂无数据", "请先记录几条血压数据再试。", now_millis())
}

/// Analysis returned when the model cannot produce one
pub fn unavailable_analysis() -> HealthAnalysis {
    HealthAnalysis::new("AI 服务暂不可用", "稍后再试，或继续保持良好生活方式。", now_millis())
}

/// One line per reading, oldest first, limited to the latest [`MAX_READINGS`]
pub fn format_readings(readings: &[BloodPressureReading]) -> String {
    let mut ordered: Vec<&BloodPressureReading> = readings.iter().collect();
    ordered.sort_by_key(|reading| reading.timestamp);

    let start = ordered.len().saturating_sub(MAX_READINGS);
    ordered[start..]
        .iter()
        .map(|reading| reading.summary_line())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analysis_prompt(data: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("你是一名心血管健康教练，只能返回 JSON，对血压趋势给出积极的分析和建议。"),
        ChatMessage::user(format!(
            "请根据下面的血压记录，输出 trend 和 advice 两个字段：\n{}",
            data
        )),
    ]
}

async fn request_analysis<L>(llm: &L, data: &str) -> Result<AnalysisDraft, LlmError>
where
    L: LlmClient + ?Sized,
{
    let text = llm
        .complete_chat(&analysis_prompt(data), ChatOptions::json(ANALYSIS_TEMPERATURE))
        .await?;
    Ok(parse_structured(&text)?)
}

/// Summarise the trend of `readings` with advice.
///
/// Empty input short-circuits without contacting the model; any failure
/// yields [`unavailable_analysis`].
pub async fn analyze_trend<L>(llm: &L, readings: &[BloodPressureReading]) -> HealthAnalysis
where
    L: LlmClient + ?Sized,
{
    if readings.is_empty() {
        return no_data_analysis();
    }

    let data = format_readings(readings);
    match request_analysis(llm, &data).await {
        Ok(draft) => draft.stamp(now_millis()),
        Err(e) => {
            warn!(error = %e, readings = readings.len(), "analyze_trend fallback");
            unavailable_analysis()
        }
    }
}
