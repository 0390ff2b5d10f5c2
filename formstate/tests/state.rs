use std::collections::HashMap;

use formstate::node::FieldDescriptor;
use formstate::prelude::*;

fn field(name: &str, validations: Validations) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        validations,
    }
}

fn signup_fields() -> Vec<FieldDescriptor> {
    vec![
        field("title", Validations::new().required()),
        field("email", Validations::new().required().email()),
        field("notes", Validations::new()),
    ]
}

fn initial() -> FormState {
    FormState::initialize(&signup_fields(), &HashMap::new(), Locale::En).unwrap()
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_initial_records() {
    let state = initial();
    assert_eq!(state.names(), ["title", "email", "notes"]);

    for (_, record) in state.iter() {
        assert_eq!(record.value, "");
        assert!(!record.touched);
        assert!(!record.valid);
        assert!(record.errors.is_empty());
    }
    assert_eq!(
        state.get("email").unwrap().validations,
        Validations::new().required().email()
    );
}

#[test]
fn test_preset_value_takes_precedence() {
    let presets = HashMap::from([("title".to_string(), "Hello".to_string())]);
    let state = FormState::initialize(&signup_fields(), &presets, Locale::En).unwrap();

    let title = state.get("title").unwrap();
    assert_eq!(title.value, "Hello");
    assert!(!title.touched);
    assert!(!title.valid);
    assert_eq!(state.get("email").unwrap().value, "");
}

#[test]
fn test_preset_for_unknown_field_is_ignored() {
    let presets = HashMap::from([("nope".to_string(), "x".to_string())]);
    let state = FormState::initialize(&signup_fields(), &presets, Locale::En).unwrap();
    assert_eq!(state.len(), 3);
    assert!(state.get("nope").is_none());
}

#[test]
fn test_initialize_rejects_duplicates() {
    let fields = vec![field("a", Validations::new()), field("a", Validations::new())];
    assert!(matches!(
        FormState::initialize(&fields, &HashMap::new(), Locale::En),
        Err(FormError::DuplicateField(name)) if name == "a"
    ));
}

// ============================================================================
// Changes
// ============================================================================

#[test]
fn test_change_updates_only_that_field() {
    let state = initial();
    let (next, result) = state.apply_change("email", "someone@example.com").unwrap();

    assert!(result.valid);
    let email = next.get("email").unwrap();
    assert_eq!(email.value, "someone@example.com");
    assert!(email.touched);
    assert!(email.valid);

    for name in ["title", "notes"] {
        assert_eq!(next.get(name), state.get(name), "{name} changed");
    }
}

#[test]
fn test_change_leaves_previous_state_intact() {
    let state = initial();
    let snapshot = state.clone();
    let _ = state.apply_change("title", "x").unwrap();
    assert_eq!(state, snapshot);
}

#[test]
fn test_change_unknown_field() {
    assert!(matches!(
        initial().apply_change("missing", "x"),
        Err(FormError::UnknownField(name)) if name == "missing"
    ));
}

#[test]
fn test_unvalidated_versus_zero_rules() {
    let state = initial();
    assert!(!state.get("notes").unwrap().valid);

    let (next, _) = state.apply_change("notes", "").unwrap();
    let notes = next.get("notes").unwrap();
    assert!(notes.valid);
    assert!(notes.errors.is_empty());
}

#[test]
fn test_isolation_across_many_edits() {
    let mut state = initial();
    for value in ["a", "", "b@c.de", "bad"] {
        let before_title = state.get("title").cloned();
        let (next, _) = state.apply_change("email", value).unwrap();
        assert_eq!(next.get("title").cloned(), before_title);
        state = next;
    }
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_touches_and_validates_all() {
    let (next, result) = initial().apply_submit();

    assert!(!result.valid);
    assert!(next.iter().all(|(_, record)| record.touched));
    assert!(!next.get("title").unwrap().valid);
    assert!(next.get("notes").unwrap().valid);

    let names: Vec<&str> = result.fields.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["title", "email", "notes"]);
}

#[test]
fn test_submit_valid_when_all_pass() {
    let (state, _) = initial().apply_change("title", "Hi").unwrap();
    let (state, _) = state.apply_change("email", "a@b.co").unwrap();
    let (state, result) = state.apply_submit();

    assert!(result.valid);
    assert!(state.is_valid());
    assert_eq!(result.get("title").unwrap().value, "Hi");
    assert_eq!(result.values().get("email"), Some(&"a@b.co"));
}

#[test]
fn test_submit_result_serializes_flat_in_order() {
    let (state, _) = initial().apply_change("title", "Hi").unwrap();
    let (_, result) = state.apply_submit();

    let json = serde_json::to_string(&result).unwrap();
    let prefix = r#"{"valid":false,"title":{"value":"Hi","valid":true,"errors":[]},"email":"#;
    assert!(json.starts_with(prefix));
    assert!(json.contains(r#"{"error":"required","message":"This field is required."}"#));

    let title_at = json.find("\"title\"").unwrap();
    let email_at = json.find("\"email\"").unwrap();
    let notes_at = json.find("\"notes\"").unwrap();
    assert!(title_at < email_at && email_at < notes_at);
}

#[test]
fn test_spanish_state_messages() {
    let state = FormState::initialize(&signup_fields(), &HashMap::new(), Locale::Es).unwrap();
    let (_, result) = state.apply_submit();
    assert_eq!(
        result.get("title").unwrap().errors[0].message,
        "Este campo es obligatorio."
    );
}
