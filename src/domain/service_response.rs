use serde_json::Value;

/// Untyped payload returned by the inference service.
///
/// The service does not commit to a schema: depending on the endpoint and the
/// model, generated text arrives as a chat completion, a `results` list, a flat
/// key, a `completions` list, or a bare string.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse(Value);

impl ServiceResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses a response body, keeping non-JSON bodies as a plain string payload.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self(value),
            Err(_) => Self(Value::String(body.to_string())),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Generated text under the first matching shape, trimmed.
    pub fn normalize(&self) -> Option<String> {
        ResponseShape::PRIORITY
            .iter()
            .find_map(|shape| shape.probe(&self.0))
    }
}

impl From<Value> for ServiceResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for ServiceResponse {
    fn from(text: &str) -> Self {
        Self(Value::String(text.to_string()))
    }
}

impl From<String> for ServiceResponse {
    fn from(text: String) -> Self {
        Self(Value::String(text))
    }
}

impl std::fmt::Display for ServiceResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const CANDIDATE_KEYS: [&str; 3] = ["generated_text", "text", "output_text"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `choices[0].message.content`
    Chat,
    /// `results[0]` probed for the candidate keys
    ResultsList,
    /// candidate keys at the top level
    FlatKey,
    /// top-level `model_output`
    ModelOutput,
    /// `completions[0].text`
    Completions,
    /// the payload itself is a string
    PlainString,
}

impl ResponseShape {
    /// Chat completions are the deployment's primary shape; the rest are fallbacks.
    pub const PRIORITY: [ResponseShape; 6] = [
        ResponseShape::Chat,
        ResponseShape::ResultsList,
        ResponseShape::FlatKey,
        ResponseShape::ModelOutput,
        ResponseShape::Completions,
        ResponseShape::PlainString,
    ];

    pub fn probe(&self, payload: &Value) -> Option<String> {
        match self {
            Self::Chat => non_blank(payload.get("choices")?.get(0)?.get("message")?.get("content")?),
            Self::ResultsList => first_candidate(payload.get("results")?.get(0)?),
            Self::FlatKey => first_candidate(payload),
            Self::ModelOutput => non_blank(payload.get("model_output")?),
            Self::Completions => non_blank(payload.get("completions")?.get(0)?.get("text")?),
            Self::PlainString => non_blank(payload),
        }
    }
}

fn first_candidate(object: &Value) -> Option<String> {
    CANDIDATE_KEYS
        .iter()
        .find_map(|key| object.get(key).and_then(non_blank))
}

fn non_blank(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
