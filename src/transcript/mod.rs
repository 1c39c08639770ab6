//! Llama-2-chat transcript protocol.
//!
//! A conversation is flattened into one prompt string using the instruction
//! delimiters the chat-tuned model was trained on, and the model's raw
//! continuation is cleaned of the turn markers it tends to emit after its answer.

mod encoder;
mod sanitizer;

pub use encoder::encode;
pub use sanitizer::{ sanitize, CONTINUATION_SUFFIXES };

pub const BOS: &str = "<s>";
/// Turn-boundary marker: closes an assistant turn.
pub const EOS: &str = "</s>";
pub const INST_OPEN: &str = "[INST] ";
pub const INST_CLOSE: &str = " [/INST]";
pub const SYS_OPEN: &str = "<<SYS>>\n";
pub const SYS_CLOSE: &str = "\n<</SYS>>\n\n";
