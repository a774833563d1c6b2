mod mock_llm_client;
mod watsonx_client;

pub use mock_llm_client::MockLlmClient;
pub use watsonx_client::WatsonxClient;
