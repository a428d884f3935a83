//! Exercises the HTTP clients against a local mock server.

use folio_core::{GenerateRequest, InterfaceFormat, Message, ModelConfig};
use folio_interface::FolioDriver;
use folio_models::{GeminiClient, OpenAICompatibleClient, create_driver};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(format: InterfaceFormat, base_url: &str, max_retries: usize) -> ModelConfig {
    ModelConfig::builder()
        .interface_format(format)
        .base_url(base_url)
        .model_name("mock-model")
        .api_key("sk-mock")
        .max_retries(max_retries)
        .timeout_secs(5u64)
        .build()
        .unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_invoke_sends_bearer_and_body() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-mock"))
        .and(body_partial_json(json!({
            "model": "mock-model",
            "max_tokens": 2048,
            "messages": [{ "role": "user", "content": "Audit this chapter." }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("No issues found.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAICompatibleClient::new(&config(InterfaceFormat::DeepSeek, &server.uri(), 0))?;
    let text = client.invoke("Audit this chapter.").await?;

    assert_eq!(text, "No issues found.");
    Ok(())
}

#[tokio::test]
async fn test_think_blocks_are_removed_from_answer() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("<think>\nlet me compare\n</think>\n\nTimeline is fine.")),
        )
        .mount(&server)
        .await;

    let driver = create_driver(&config(InterfaceFormat::Ollama, &server.uri(), 0))?;
    assert_eq!(driver.invoke("check").await?, "Timeline is fine.");
    Ok(())
}

#[tokio::test]
async fn test_transient_error_is_retried() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream hiccup"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Recovered.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAICompatibleClient::new(&config(InterfaceFormat::OpenAI, &server.uri(), 2))?;
    assert_eq!(client.invoke("check").await?, "Recovered.");
    Ok(())
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAICompatibleClient::new(&config(InterfaceFormat::OpenAI, &server.uri(), 3))?;
    let err = client.invoke("check").await.unwrap_err();

    assert!(err.to_string().contains("401"));
    Ok(())
}

#[tokio::test]
async fn test_hash_suffix_uses_url_verbatim() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gateway/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/gateway#", server.uri());
    let client = OpenAICompatibleClient::new(&config(InterfaceFormat::LmStudio, &base, 0))?;
    assert_eq!(client.invoke("check").await?, "ok");
    Ok(())
}

#[tokio::test]
async fn test_gemini_generate_content() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/mock-model:generateContent"))
        .and(header("x-goog-api-key", "sk-mock"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": "You audit novels." }] },
            "contents": [{ "role": "user", "parts": [{ "text": "check" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Consistent." }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(InterfaceFormat::Gemini, "", 0))?
        .with_api_base(format!("{}/v1beta", server.uri()));
    let request = GenerateRequest::builder()
        .messages(vec![Message::system("You audit novels."), Message::user("check")])
        .build()?;
    let response = client.generate(&request).await?;

    assert_eq!(response.text(), "Consistent.");
    Ok(())
}
