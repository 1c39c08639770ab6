pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful, respectful and honest assistant. Always answer as helpfully as possible, while being safe. Keep your answers short.";

const SUMMARY_TEMPLATE: &str =
    r#"
<<SYS>>
You are a bot that generates short summaries for conversations given a conversation history between a user and an AI assistant. The summaries should be as concise as possible
<</SYS>>
Follow the pattern of the following examples:
[INST]
PROMPTS
User: When was da Vinci born?
Assistant: Leonardo da Vinci was born on April 15, 1452.
User: how old was he when he painted the Mona Lisa?
SUMMARY: The life and career of Leonardo da Vinci
[/INST]
[INST]
PROMPTS
User: What is the climate in California?
Assistant: The climate in California is generally mild, with cool, wet winters and dry summers. The state's diverse geography and coastal location result in a wide range of climates.
SUMMARY: The climate of California
[/INST]
PROMPTS
{HISTORY}
SUMMARY:
"#;

pub fn get_summary_prompt(history: &str) -> String {
    SUMMARY_TEMPLATE.replace("{HISTORY}", history)
}
