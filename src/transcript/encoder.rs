use super::{ BOS, EOS, INST_CLOSE, INST_OPEN, SYS_CLOSE, SYS_OPEN };
use crate::error::ChatError;
use crate::models::chat::{ ChatMessage, Role };

/// Renders an ordered transcript into a single Llama-2-chat prompt.
///
/// The instruction delimiters wrap the whole transcript once; every assistant
/// turn closes the open instruction, emits its reply and the turn boundary, and
/// reopens an instruction for whatever follows. A system message is only valid
/// at index 0. Nothing is returned unless every message encodes.
pub fn encode(messages: &[ChatMessage]) -> Result<String, ChatError> {
    if messages.is_empty() {
        return Err(ChatError::InvalidRoleSequence("transcript is empty".to_string()));
    }

    let mut prompt = String::from(BOS);
    prompt.push_str(INST_OPEN);

    for (index, message) in messages.iter().enumerate() {
        match message.role {
            Role::System if index == 0 => {
                prompt.push_str(SYS_OPEN);
                prompt.push_str(message.content.trim());
                prompt.push_str(SYS_CLOSE);
            }
            Role::System => {
                return Err(
                    ChatError::InvalidRoleSequence(
                        format!("system message at position {}", index)
                    )
                );
            }
            Role::User => {
                prompt.push_str(message.content.trim());
            }
            Role::Assistant => {
                prompt.push_str(INST_CLOSE);
                prompt.push(' ');
                prompt.push_str(&message.content);
                prompt.push(' ');
                prompt.push_str(EOS);
                prompt.push_str(BOS);
                prompt.push_str(INST_OPEN);
            }
        }
    }

    prompt.push_str(INST_CLOSE);
    Ok(prompt)
}
