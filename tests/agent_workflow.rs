//! End-to-end tests of the generate / lookup / clear / summary workflow.

mod common;

use common::{ setup_test_env, ScriptedChatClient, UnavailableStore, VanishingStore, SYSTEM_PROMPT };
use llama_chat::agent::ChatAgent;
use llama_chat::error::ChatError;
use llama_chat::history::{ decode_history, ConversationStore };
use llama_chat::models::chat::Role;
use std::sync::Arc;

#[tokio::test]
async fn test_first_generate_seeds_system_message() {
    let env = setup_test_env(ScriptedChatClient::new().reply("Hello there</s><s>["));

    let reply = env.agent.generate("c1", "  Hi ").await.expect("generate failed");
    assert_eq!(reply, "Hello there");

    let conversation = decode_history("c1", &env.store.get("c1").await.unwrap()).unwrap();
    let roles: Vec<Role> = conversation.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
    assert_eq!(conversation.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(conversation.messages[0].id, "");
    assert_eq!(conversation.messages[1].id, "c1");
    assert_eq!(conversation.messages[1].content, "  Hi ");
    // the raw model output is what gets persisted
    assert_eq!(conversation.messages[2].content, "Hello there</s><s>[");
}

#[tokio::test]
async fn test_first_prompt_is_exact_transcript() {
    let env = setup_test_env(ScriptedChatClient::new().reply("Hello"));
    env.agent.generate("c1", "Hi").await.unwrap();

    let calls = env.client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "<s>[INST] <<SYS>>\nBe concise.\n<</SYS>>\n\nHi [/INST]");
    assert_eq!(calls[0].1.max_tokens, 50);
}

#[tokio::test]
async fn test_two_generates_store_five_messages_in_order() {
    let env = setup_test_env(
        ScriptedChatClient::new().reply("Hello!").reply("Rust is a language.</s>")
    );

    env.agent.generate("c1", "Hi").await.unwrap();
    let second = env.agent.generate("c1", "What is Rust?").await.unwrap();
    assert_eq!(second, "Rust is a language.");

    let conversation = env.agent.get_conversation("c1").await.unwrap();
    let roles: Vec<Role> = conversation.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
    );

    let calls = env.client.calls();
    assert_eq!(calls[1].0.matches("</s>").count(), 1);
    assert!(calls[1].0.ends_with("Hi [/INST] Hello! </s><s>[INST] What is Rust? [/INST]"));
}

#[tokio::test]
async fn test_conversations_are_isolated_by_id() {
    let env = setup_test_env(ScriptedChatClient::new().reply("one").reply("two"));
    env.agent.generate("a", "first").await.unwrap();
    env.agent.generate("b", "second").await.unwrap();

    assert_eq!(env.agent.get_conversation("a").await.unwrap().len(), 3);
    assert_eq!(env.agent.get_conversation("b").await.unwrap().len(), 3);
    assert!(!env.client.calls()[1].0.contains("first"));
}

#[tokio::test]
async fn test_failed_inference_does_not_persist_new_conversation() {
    let env = setup_test_env(
        ScriptedChatClient::new().fail(ChatError::InferenceUnavailable("backend down".into()))
    );

    let err = env.agent.generate("c1", "Hi").await.unwrap_err();
    assert!(matches!(err, ChatError::InferenceUnavailable(_)));
    assert!(!env.store.exists("c1").await.unwrap());
}

#[tokio::test]
async fn test_failed_inference_leaves_existing_history_untouched() {
    let env = setup_test_env(
        ScriptedChatClient::new()
            .reply("Hello!")
            .fail(ChatError::InferenceTimeout("deadline exceeded".into()))
    );
    env.agent.generate("c1", "Hi").await.unwrap();
    let before = env.store.get("c1").await.unwrap();

    let err = env.agent.generate("c1", "Still there?").await.unwrap_err();
    assert!(matches!(err, ChatError::InferenceTimeout(_)));
    assert_eq!(env.store.get("c1").await.unwrap(), before);
}

#[tokio::test]
async fn test_stored_unknown_role_aborts_before_inference() {
    let env = setup_test_env(ScriptedChatClient::new().reply("unused"));
    let corrupt = br#"{"id":"c1","prompts":[{"id":"","role":"Narrator","content":"x"}]}"#;
    env.store.set("c1", corrupt).await.unwrap();

    let err = env.agent.generate("c1", "Hi").await.unwrap_err();
    assert!(matches!(err, ChatError::InvalidRole(_)));
    assert!(env.client.calls().is_empty());
    assert_eq!(env.store.get("c1").await.unwrap(), corrupt.to_vec());
}

#[tokio::test]
async fn test_store_failure_aborts_before_inference() {
    let client = Arc::new(ScriptedChatClient::new().reply("unused"));
    let agent = ChatAgent::new(Arc::new(UnavailableStore), client.clone(), common::settings());

    let err = agent.generate("c1", "Hi").await.unwrap_err();
    assert!(matches!(err, ChatError::StoreUnavailable(_)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_lookup_unknown_conversation_is_not_found() {
    let env = setup_test_env(ScriptedChatClient::new());
    assert!(env.agent.get_history("missing").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_clear_removes_conversation() {
    let env = setup_test_env(ScriptedChatClient::new().reply("Hello!"));
    env.agent.generate("c1", "Hi").await.unwrap();

    env.agent.clear("c1").await.expect("clear failed");
    assert!(!env.store.exists("c1").await.unwrap());
    assert!(env.agent.clear("c1").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_summary_uses_history_without_mutating_it() {
    let env = setup_test_env(
        ScriptedChatClient::new().reply("Hello!").reply("  Greetings </s><s>[INST]")
    );
    env.agent.generate("c1", "Hi").await.unwrap();
    let before = env.store.get("c1").await.unwrap();

    let summary = env.agent.summarize("c1").await.unwrap();
    assert_eq!(summary.id, "c1");
    assert_eq!(summary.summary, "Greetings");

    let calls = env.client.calls();
    assert!(calls[1].0.contains("PROMPTS\nSystem: Be concise.\nUser: Hi\nAssistant: Hello!\nSUMMARY:"));
    assert_eq!(calls[1].1.max_tokens, 24);
    assert_eq!(env.store.get("c1").await.unwrap(), before);
}

#[tokio::test]
async fn test_summary_of_unknown_conversation_is_not_found() {
    let env = setup_test_env(ScriptedChatClient::new());
    assert!(env.agent.summarize("missing").await.unwrap_err().is_not_found());
    assert!(env.client.calls().is_empty());
}

#[tokio::test]
async fn test_value_cleared_after_existence_check_starts_new_conversation() {
    let store = Arc::new(VanishingStore::default());
    let client = Arc::new(ScriptedChatClient::new().reply("Hello!"));
    let agent = ChatAgent::new(store.clone(), client.clone(), common::settings());

    let reply = agent.generate("c1", "Hi").await.expect("generate failed");
    assert_eq!(reply, "Hello!");

    let conversation = decode_history("c1", &store.inner.get("c1").await.unwrap()).unwrap();
    let roles: Vec<Role> = conversation.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
}

#[tokio::test]
async fn test_mismatched_stored_id_is_repaired_on_save() {
    let env = setup_test_env(ScriptedChatClient::new().reply("Hello!"));
    let stored = br#"{"id":"other","prompts":[{"id":"","role":"System","content":"Be concise."}]}"#;
    env.store.set("c1", stored).await.unwrap();

    env.agent.generate("c1", "Hi").await.unwrap();

    let value: serde_json::Value = serde_json::from_slice(&env.store.get("c1").await.unwrap()).unwrap();
    assert_eq!(value["id"], "c1");
    assert_eq!(value["prompts"].as_array().unwrap().len(), 3);
}
