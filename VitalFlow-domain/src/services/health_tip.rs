use tracing::{debug, warn};

use crate::llm::{ChatMessage, ChatOptions, LlmClient};

/// Tip returned when the model is unavailable or silent
pub const FALLBACK_TIP: &str = "每隔 1 小时站起来伸展 2 分钟，血液就会感谢你。";

const TIP_TEMPERATURE: f32 = 0.8;

pub fn tip_prompt() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("你是一名活泼幽默的健康教练，回答要简短、鼓励性、用简体中文。"),
        ChatMessage::user("请给出一句 30 字以内、关于降低血压或减少久坐的小贴士，语气轻松。"),
    ]
}

/// One short motivating tip about blood pressure or sitting less
pub async fn tip_for_healthy_habits<L>(llm: &L) -> String
where
    L: LlmClient + ?Sized,
{
    match llm.complete_chat(&tip_prompt(), ChatOptions::text(TIP_TEMPERATURE)).await {
        Ok(tip) => match tip.trim() {
            "" => {
                debug!("Empty tip returned, using fallback");
                FALLBACK_TIP.to_string()
            }
            tip => tip.to_string(),
        },
        Err(e) => {
            warn!(error = %e, "tip_for_healthy_habits fallback");
            FALLBACK_TIP.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockLlmClient, MockReply};

    #[tokio::test]
    async fn test_tip_is_trimmed() {
        let llm = MockLlmClient::new().with_chat(MockReply::text("  少坐多站，血压更稳！ \n"));

        assert_eq!(tip_for_healthy_habits(&llm).await, "少坐多站，血压更稳！");
        assert_eq!(llm.last_chat_options(), Some(ChatOptions::text(0.8)));
    }

    #[tokio::test]
    async fn test_tip_falls_back_on_timeout() {
        let llm = MockLlmClient::new().with_chat(MockReply::Timeout);

        assert_eq!(tip_for_healthy_habits(&llm).await, FALLBACK_TIP);
        assert_eq!(llm.chat_call_count(), 1);
    }

    #[tokio::test]
    async fn test_tip_falls_back_on_blank_text() {
        let llm = MockLlmClient::new().with_chat(MockReply::text("   "));

        assert_eq!(tip_for_healthy_habits(&llm).await, FALLBACK_TIP);
    }
}
