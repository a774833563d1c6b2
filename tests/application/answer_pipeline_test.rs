use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use finsight::application::ports::{LlmClient, LlmClientError};
use finsight::application::services::{AnalyzeError, AnswerPipeline, DEFAULT_SYSTEM_PROMPT};
use finsight::domain::ServiceResponse;
use finsight::infrastructure::llm::MockLlmClient;
use serde_json::json;

/// Counts calls and captures the prompts it was given.
struct CountingLlmClient {
    calls: AtomicUsize,
    prompts: std::sync::Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl CountingLlmClient {
    fn new(fail: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: std::sync::Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait]
impl LlmClient for CountingLlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<ServiceResponse, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        if self.fail {
            Err(LlmClientError::RateLimited)
        } else {
            Ok(ServiceResponse::from("- Liquidity is adequate."))
        }
    }
}

fn pipeline(client: MockLlmClient) -> AnswerPipeline<MockLlmClient> {
    AnswerPipeline::new(Arc::new(client), DEFAULT_SYSTEM_PROMPT)
}

#[tokio::test]
async fn given_chat_payload_when_analyzing_then_returns_cleaned_content() {
    let pipeline = pipeline(MockLlmClient::returning(json!({
        "choices": [{ "message": { "content": "  • Revenue grew 4% year over year." } }]
    })));

    let answer = pipeline.analyze("How did revenue move?").await.unwrap();

    assert_eq!(answer, "Revenue grew 4% year over year.");
}

#[tokio::test]
async fn given_blank_prompt_when_analyzing_then_client_is_never_called() {
    let client = Arc::new(CountingLlmClient::new(false));
    let pipeline = AnswerPipeline::new(Arc::clone(&client), DEFAULT_SYSTEM_PROMPT);

    let result = pipeline.analyze("   \n").await;

    assert!(matches!(result, Err(AnalyzeError::EmptyPrompt)));
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_padded_prompt_when_analyzing_then_sends_trimmed_text_with_system_prompt() {
    let client = Arc::new(CountingLlmClient::new(false));
    let pipeline = AnswerPipeline::new(Arc::clone(&client), "Be brief.");

    let answer = pipeline.analyze("  Summarize Q3  ").await.unwrap();

    assert_eq!(answer, "Liquidity is adequate.");
    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.as_slice(), &[("Be brief.".to_string(), "Summarize Q3".to_string())]);
}

#[tokio::test]
async fn given_failing_client_when_analyzing_then_fails_once_without_retry() {
    let client = Arc::new(CountingLlmClient::new(true));
    let pipeline = AnswerPipeline::new(Arc::clone(&client), DEFAULT_SYSTEM_PROMPT);

    let result = pipeline.analyze("Summarize").await;

    assert!(matches!(
        result,
        Err(AnalyzeError::CollaboratorFailure(LlmClientError::RateLimited))
    ));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_unknown_payload_when_analyzing_then_returns_empty_or_unknown() {
    let pipeline = pipeline(MockLlmClient::returning(json!({ "status": "ok" })));

    let result = pipeline.analyze("Summarize").await;

    assert!(matches!(result, Err(AnalyzeError::EmptyOrUnknownPayload)));
}

#[tokio::test]
async fn given_decoration_only_answer_when_analyzing_then_returns_empty_or_unknown() {
    let pipeline = pipeline(MockLlmClient::returning(json!({ "generated_text": " - * " })));

    let result = pipeline.analyze("Summarize").await;

    assert!(matches!(result, Err(AnalyzeError::EmptyOrUnknownPayload)));
}

#[test]
fn given_results_payload_when_answering_then_normalizes_and_cleans() {
    let raw = ServiceResponse::new(json!({ "results": [{ "generated_text": ": Net income rose." }] }));

    assert_eq!(AnswerPipeline::<MockLlmClient>::answer(&raw).unwrap(), "Net income rose.");
}

#[test]
fn given_errors_when_displayed_then_messages_are_stable() {
    assert_eq!(AnalyzeError::EmptyPrompt.to_string(), "Empty prompt");
    assert_eq!(
        AnalyzeError::EmptyOrUnknownPayload.to_string(),
        "Empty/unknown model payload"
    );
    assert_eq!(
        AnalyzeError::CollaboratorFailure(LlmClientError::RateLimited).to_string(),
        "rate limited"
    );
}
