use finsight::domain::{ResponseShape, ServiceResponse};
use serde_json::json;

fn normalize(value: serde_json::Value) -> Option<String> {
    ServiceResponse::new(value).normalize()
}

#[test]
fn given_chat_and_results_when_normalizing_then_chat_wins() {
    let raw = json!({
        "choices": [{ "message": { "content": "A" } }],
        "results": [{ "generated_text": "B" }]
    });
    assert_eq!(normalize(raw), Some("A".to_string()));
}

#[test]
fn given_results_list_with_text_key_when_normalizing_then_returns_text() {
    let raw = json!({ "results": [{ "text": "Net income rose." }] });
    assert_eq!(normalize(raw), Some("Net income rose.".to_string()));
}

#[test]
fn given_results_entry_with_several_keys_when_normalizing_then_prefers_generated_text() {
    let raw = json!({ "results": [{ "output_text": "C", "generated_text": "G" }] });
    assert_eq!(normalize(raw), Some("G".to_string()));
}

#[test]
fn given_flat_key_when_normalizing_then_returns_it() {
    assert_eq!(
        normalize(json!({ "output_text": "Flat" })),
        Some("Flat".to_string())
    );
}

#[test]
fn given_model_output_when_normalizing_then_returns_it() {
    assert_eq!(
        normalize(json!({ "model_output": "  Margins widened.  " })),
        Some("Margins widened.".to_string())
    );
}

#[test]
fn given_completions_list_when_normalizing_then_returns_first_text() {
    let raw = json!({ "completions": [{ "text": "first" }, { "text": "second" }] });
    assert_eq!(normalize(raw), Some("first".to_string()));
}

#[test]
fn given_plain_string_when_normalizing_then_returns_itself() {
    assert_eq!(
        ServiceResponse::from("plain string").normalize(),
        Some("plain string".to_string())
    );
}

#[test]
fn given_empty_object_when_normalizing_then_returns_none() {
    assert_eq!(normalize(json!({})), None);
}

#[test]
fn given_blank_chat_content_when_normalizing_then_falls_through_to_next_shape() {
    let raw = json!({
        "choices": [{ "message": { "content": "   " } }],
        "results": [{ "generated_text": "B" }]
    });
    assert_eq!(normalize(raw), Some("B".to_string()));
}

#[test]
fn given_wrong_types_when_normalizing_then_returns_none() {
    let raw = json!({
        "choices": [],
        "results": "not a list",
        "text": 42,
        "completions": [{ "text": null }]
    });
    assert_eq!(normalize(raw), None);
}

#[test]
fn given_non_json_body_when_parsed_then_kept_as_plain_string() {
    let response = ServiceResponse::from_body("Revenue grew 4%.");
    assert_eq!(response.as_value(), &json!("Revenue grew 4%."));
    assert_eq!(response.normalize(), Some("Revenue grew 4%.".to_string()));
}

#[test]
fn given_json_body_when_parsed_then_structure_is_kept() {
    let response = ServiceResponse::from_body(r#"{"results":[{"generated_text":"ok"}]}"#);
    assert_eq!(response.normalize(), Some("ok".to_string()));
}

#[test]
fn given_priority_order_when_inspected_then_chat_first_and_plain_string_last() {
    assert_eq!(ResponseShape::PRIORITY.first(), Some(&ResponseShape::Chat));
    assert_eq!(ResponseShape::PRIORITY.last(), Some(&ResponseShape::PlainString));
}

#[test]
fn given_chat_payload_when_probing_other_shapes_then_they_do_not_match() {
    let raw = json!({ "choices": [{ "message": { "content": "A" } }] });
    assert_eq!(ResponseShape::Chat.probe(&raw), Some("A".to_string()));
    assert_eq!(ResponseShape::ResultsList.probe(&raw), None);
    assert_eq!(ResponseShape::PlainString.probe(&raw), None);
}
