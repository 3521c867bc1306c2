//! Prompt templates that steer clients toward the search tool.
//!
//! Templates substitute their arguments verbatim. A missing or blank
//! required argument is replaced by a bracketed placeholder instead of
//! failing the request.

use rmcp::model::{
    GetPromptResult, JsonObject, ListPromptsResult, Prompt, PromptArgument, PromptMessage,
    PromptMessageRole,
};
use serde_json::Value;

use crate::mcp::request::SEARCH_TOOL;
use crate::{AppError, Result};

/// Research a topic from several angles.
pub const RESEARCH_TOPIC_PROMPT: &str = "research_topic";
/// Verify a claim against web sources.
pub const FACT_CHECK_PROMPT: &str = "fact_check";

fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.into(),
        description: Some(description.into()),
        required: Some(required),
    }
}

/// Static catalog of every registered prompt.
#[must_use]
pub fn list_prompts() -> ListPromptsResult {
    ListPromptsResult::with_all_items(vec![
        Prompt::new(
            RESEARCH_TOPIC_PROMPT,
            Some("Research a topic using Gemini web search and summarize the findings"),
            Some(vec![
                argument("topic", "Topic to research", true),
                argument("focus", "Aspect of the topic to concentrate on", false),
            ]),
        ),
        Prompt::new(
            FACT_CHECK_PROMPT,
            Some("Fact-check a claim using Gemini web search"),
            Some(vec![argument("claim", "Claim to verify", true)]),
        ),
    ])
}

/// Read a string argument; `None` when absent or blank.
fn lookup<'a>(arguments: Option<&'a JsonObject>, key: &str) -> Option<&'a str> {
    arguments
        .and_then(|args| args.get(key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Render a prompt template by name.
///
/// # Errors
///
/// Returns `AppError::UnknownOperation` if `name` is not a registered prompt.
pub fn get_prompt(name: &str, arguments: Option<&JsonObject>) -> Result<GetPromptResult> {
    let (description, text) = match name {
        RESEARCH_TOPIC_PROMPT => {
            let topic = lookup(arguments, "topic").unwrap_or("[topic]");
            let focus = lookup(arguments, "focus")
                .map(|focus| format!(" Focus especially on: {focus}."))
                .unwrap_or_default();
            (
                format!("Research \"{topic}\""),
                format!(
                    "Use the {SEARCH_TOOL} tool to research \"{topic}\".{focus} \
                     Search from several angles, compare what the sources say, and \
                     summarize the key findings with links to the sources you used."
                ),
            )
        }
        FACT_CHECK_PROMPT => {
            let claim = lookup(arguments, "claim").unwrap_or("[claim]");
            (
                "Fact-check a claim".to_owned(),
                format!(
                    "Use the {SEARCH_TOOL} tool to verify the following claim: \"{claim}\". \
                     Look for both supporting and contradicting evidence from reliable \
                     sources, then state whether the claim is true, false, or unverified, \
                     citing the sources you relied on."
                ),
            )
        }
        other => {
            return Err(AppError::UnknownOperation(format!(
                "prompt '{other}' is not registered"
            )))
        }
    };

    Ok(GetPromptResult {
        description: Some(description),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}
