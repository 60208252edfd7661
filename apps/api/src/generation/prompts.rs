// Prompt template for knowledge-card generation.
// The content-category labels below must stay in sync with `ContentType`.

/// Card generation prompt template. `{content}` is the final token and is
/// replaced with the user's text verbatim.
pub const CARD_PROMPT_TEMPLATE: &str = r#"你好，你是一个“图文知识卡片策划与结构化输出”助手。你的任务是把用户输入的文本，转成用于知识卡片展示的结构化 JSON。

硬性规则：
1) 只输出 JSON，不要输出任何解释、注释、Markdown 代码块、前后缀文字。
2) 输出必须是一个 JSON 对象，字段名必须与 schema 一致，不能新增字段，不能缺字段。
3) cards 数组长度必须等于 suggestedCards；strategy 数组长度也必须等于 suggestedCards。
4) suggestedCards 只能是 1 到 4 的整数。
5) 每张卡片必须包含 title（1 行）和 points（2 到 4 条）。
6) 不要编造用户未提供的具体事实或数据；只做概括、提炼、结构化。

内容类型定义（contentType 只能取以下三个值之一，原样输出）：
- "金句 / 观点型"：一句或几句强观点、结论、态度。
- "笔记 / 知识型"：信息点、概念解释、框架摘录、知识总结。
- "思考 / 方法论型"：推理链、方法步骤、可行动建议、复盘总结。

输出 JSON schema：
{
  "contentType": string,
  "suggestedCards": number,
  "strategy": string[],
  "cards": [
    {
      "title": string,
      "points": string[]
    }
  ]
}

生成要求：
- 先判断 contentType。
- 决定 suggestedCards（1-4）并给出 strategy（每张卡片的功能定位）。
- 生成 cards：title 贴合定位；points 为短句，2-4 条。
- 输出使用简体中文。title 不超过 18 个字，points 每条不超过 28 个字。
- 输出前请自检：cards.length == suggestedCards 且 strategy.length == suggestedCards。

用户输入：
{content}"#;

/// Builds the full instruction string for one generation call.
///
/// The content is appended as-is: no trimming, no escaping.
pub fn build_card_prompt(content: &str) -> String {
    CARD_PROMPT_TEMPLATE.replace("{content}", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::models::ContentType;

    fn instruction_block() -> &'static str {
        CARD_PROMPT_TEMPLATE
            .strip_suffix("{content}")
            .expect("template must end with the content placeholder")
    }

    #[test]
    fn test_prompt_is_instruction_block_followed_by_content() {
        let content = "复利的本质是时间和耐心。";
        let prompt = build_card_prompt(content);
        assert!(prompt.ends_with(content));
        assert_eq!(prompt, format!("{}{}", instruction_block(), content));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let content = "Some notes about Rust ownership.\nSecond line.";
        assert_eq!(build_card_prompt(content), build_card_prompt(content));
    }

    #[test]
    fn test_content_is_not_trimmed_or_escaped() {
        let content = "  \"quoted\" {braces} ```fence```\n\n";
        let prompt = build_card_prompt(content);
        assert!(prompt.ends_with(content));
    }

    #[test]
    fn test_placeholder_inside_content_is_left_alone() {
        let content = "literal {content} marker";
        assert_eq!(
            build_card_prompt(content),
            format!("{}{}", instruction_block(), content)
        );
    }

    #[test]
    fn test_instruction_block_has_no_other_placeholder() {
        assert!(!instruction_block().contains("{content}"));
    }

    #[test]
    fn test_prompt_lists_every_content_type_label() {
        let block = instruction_block();
        for content_type in ContentType::ALL {
            assert!(
                block.contains(&format!("\"{}\"", content_type.label())),
                "prompt is missing label {}",
                content_type.label()
            );
        }
    }

    #[test]
    fn test_prompt_declares_schema_fields_and_self_check() {
        let block = instruction_block();
        for field in ["\"contentType\"", "\"suggestedCards\"", "\"strategy\"", "\"cards\"", "\"title\"", "\"points\""] {
            assert!(block.contains(field), "schema is missing {field}");
        }
        assert!(block.contains("只输出 JSON"));
        assert!(block.contains("1 到 4"));
        assert!(block.contains("cards.length == suggestedCards 且 strategy.length == suggestedCards"));
    }
}
