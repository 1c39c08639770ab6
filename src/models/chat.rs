use crate::error::ChatError;
use serde::{ Serialize, Deserialize };
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "System" => Ok(Role::System),
            "User" => Ok(Role::User),
            "Assistant" => Ok(Role::Assistant),
            other => Err(ChatError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// The synthetic system turn carries an empty conversation id.
    pub fn system(content: impl Into<String>) -> Self {
        Self { id: String::new(), role: Role::System, content: content.into() }
    }

    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), role: Role::User, content: content.into() }
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), role: Role::Assistant, content: content.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Starts a conversation seeded with its single system message.
    pub fn new(id: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
