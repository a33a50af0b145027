use super::*;
use serde_json::json;

#[test]
fn request_defaults_model_and_disables_stream() {
    let messages = vec![ChatMessage::user("hi")];
    let options = ChatOptions { api_key: "sk-test".into(), ..ChatOptions::default() };
    let body = serde_json::to_value(ChatCompletionRequest::new(&messages, &options)).unwrap();

    assert_eq!(body["model"], DEFAULT_CHAT_MODEL);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(body.get("temperature").is_none());
    assert!(body.get("max_tokens").is_none());
}

#[test]
fn request_carries_overrides() {
    let messages = vec![ChatMessage::system("be terse"), ChatMessage::user("hi")];
    let options = ChatOptions {
        api_key: "sk-test".into(),
        model: Some("gpt-4".into()),
        temperature: Some(0.5),
        max_tokens: Some(64),
    };
    let body = serde_json::to_value(ChatCompletionRequest::new(&messages, &options)).unwrap();

    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["temperature"], 0.5);
    assert_eq!(body["max_tokens"], 64);
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
}

#[test]
fn completion_first_content() {
    let completion: ChatCompletion = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "model": "gpt-3.5-turbo",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": "hello" }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4 }
    }))
    .unwrap();

    assert_eq!(completion.first_content(), Some("hello"));
    assert_eq!(completion.usage.map(|u| u.total_tokens), Some(4));
}

#[test]
fn completion_without_choices_has_no_content() {
    let completion: ChatCompletion = serde_json::from_value(json!({ "id": "x" })).unwrap();
    assert_eq!(completion.first_content(), None);
}
