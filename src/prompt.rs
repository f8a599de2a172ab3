use serde_json::{Value, json};

/// System instruction sent with every todo summarization request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that summarizes to-do lists concisely.";

/// Leading instruction of the user prompt, placed before the task list.
pub const SUMMARY_INSTRUCTION: &str = "Summarize the to-do list meaningfully, don't simulate or mock this. \
Don't use asterisks to bold anything, but you can use emojis, and phrase it as a friendly heads-up \
telling me what I still have pending.";

/// Max length for a single task line inside the prompt
pub const MAX_TASK_LEN: usize = 500;

/// Remove control characters and hard-truncate a task for prompt use.
/// Newlines inside a task would break the bulleted list, so they go too.
pub fn sanitize_task(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(MAX_TASK_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Builds the single prompt covering every task, one `- task` line each.
pub fn build_prompt_text(tasks: &[String]) -> String {
    let list = tasks
        .iter()
        .map(|task| format!("- {}", sanitize_task(task)))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{SUMMARY_INSTRUCTION}\n{list}")
}

/// Wraps the prompt in the `generateContent` envelope. A blank system
/// instruction is left out entirely.
pub fn build_request_body(system_instruction: Option<&str>, prompt_text: &str) -> Value {
    let mut body = json!({
        "contents": [
            { "parts": [ { "text": prompt_text } ] }
        ]
    });

    if let Some(instruction) = system_instruction.filter(|s| !s.trim().is_empty()) {
        body["systemInstruction"] = json!({
            "parts": [ { "text": instruction } ]
        });
    }

    body
}
