use tracing::{debug, warn};

use crate::entities::{Difficulty, ExerciseSuggestion};
use crate::llm::{ChatMessage, ChatOptions, LlmClient, LlmError};
use crate::parser::parse_structured;

/// Audience assumed when the caller gives no context
pub const DEFAULT_CONTEXT: &str = "office worker";

const EXERCISE_TEMPERATURE: f32 = 0.7;

/// Exercise returned whenever the model cannot produce one
pub fn default_exercise() -> ExerciseSuggestion {
    ExerciseSuggestion {
        name: "隐形椅子".to_string(),
        description: "背靠墙壁下蹲，像坐在一把隐形的椅子上，坚持 45 秒后缓慢站起，重复 3 组。"
            .to_string(),
        duration_seconds: 90,
        difficulty: Difficulty::Medium,
        fun_fact: "激活腿部最大肌群，迅速提升血液循环。".to_string(),
        image_url: None,
    }
}

pub fn exercise_prompt(context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("你是一名擅长设计工位微运动的健身教练，只能用简体中文输出 JSON 对象。"),
        ChatMessage::user(format!(
            "为一位{}生成一个可以在工位完成的趣味微运动。字段需包含 name、description、durationSeconds、difficulty、funFact，且时长控制在 60-120 秒。",
            context
        )),
    ]
}

pub fn illustration_prompt(exercise: &ExerciseSuggestion) -> String {
    format!(
        "Draw a clean flat illustration that shows \"{}\" ({}). Style: memphis, white background, indigo accent, no Chinese text.",
        exercise.name, exercise.description
    )
}

async fn request_exercise<L>(llm: &L, context: &str) -> Result<ExerciseSuggestion, LlmError>
where
    L: LlmClient + ?Sized,
{
    let text = llm
        .complete_chat(&exercise_prompt(context), ChatOptions::json(EXERCISE_TEMPERATURE))
        .await?;
    Ok(parse_structured(&text)?)
}

async fn attach_illustration<L>(llm: &L, exercise: &mut ExerciseSuggestion)
where
    L: LlmClient + ?Sized,
{
    match llm.generate_image(&illustration_prompt(exercise)).await {
        Ok(Some(image_url)) => exercise.image_url = Some(image_url),
        Ok(None) => debug!("No illustration returned for '{}'", exercise.name),
        Err(e) => warn!(error = %e, "suggest_exercise illustration failed"),
    }
}

/// Suggest a desk-friendly micro-exercise for `context`.
///
/// Falls back to [`default_exercise`] when the chat call or parse fails.
/// The illustration is best effort and never triggers the fallback.
pub async fn suggest_exercise<L>(llm: &L, context: &str) -> ExerciseSuggestion
where
    L: LlmClient + ?Sized,
{
    let context = match context.trim() {
        "" => DEFAULT_CONTEXT,
        trimmed => trimmed,
    };

    match request_exercise(llm, context).await {
        Ok(mut exercise) => {
            attach_illustration(llm, &mut exercise).await;
            exercise
        }
        Err(e) => {
            warn!(error = %e, "suggest_exercise fallback");
            default_exercise()
        }
    }
}
