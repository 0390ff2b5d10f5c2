use formstate::node::{ChangeHandler, find_field};
use formstate::prelude::*;
use formstate::widgets::{render_field, render_form};

fn view(
    decl: FieldDecl,
    value: &str,
    valid: bool,
    touched: bool,
    errors: Vec<FieldError>,
) -> FieldView {
    let on_change = ChangeHandler::new(decl.name.clone());
    FieldView {
        decl,
        props: FieldProps {
            value: value.to_string(),
            valid,
            touched,
            errors,
            on_change,
        },
    }
}

fn required_error() -> Vec<FieldError> {
    vec![FieldError::new("required", "This field is required.")]
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_input_with_label_and_value() {
    let field = view(FieldDecl::new("title").label("Title"), "Hello", true, true, vec![]);
    assert_eq!(render_field(&field), ["Title:", "[Hello]"]);
}

#[test]
fn test_input_placeholder_when_empty() {
    let field = view(FieldDecl::new("title").placeholder("Title"), "", false, false, vec![]);
    assert_eq!(render_field(&field), ["[(Title)]"]);
}

#[test]
fn test_input_errors_only_when_touched_and_invalid() {
    let decl = FieldDecl::new("title");

    let untouched = view(decl.clone(), "", false, false, required_error());
    assert_eq!(render_field(&untouched), ["[]"]);

    let touched = view(decl, "", false, true, required_error());
    assert_eq!(render_field(&touched), ["[]", "*This field is required."]);
}

#[test]
fn test_password_is_masked() {
    let field = view(
        FieldDecl::new("secret").widget(Widget::Password),
        "hunter2",
        true,
        true,
        vec![],
    );
    assert_eq!(render_field(&field), ["[•••••••]"]);
}

// ============================================================================
// Textarea and select
// ============================================================================

#[test]
fn test_textarea_lines_and_errors() {
    let field = view(
        FieldDecl::new("bio").widget(Widget::TextArea),
        "line one\nline two",
        false,
        true,
        vec![FieldError::custom("Too long")],
    );
    assert_eq!(render_field(&field), ["| line one", "| line two", "- Too long"]);
}

#[test]
fn test_select_marks_chosen_option() {
    let decl = FieldDecl::new("color")
        .label("Color")
        .option("r", "Red")
        .option("g", "Green");

    let none = view(decl.clone(), "", false, false, vec![]);
    assert_eq!(
        render_field(&none),
        ["Color:", "-- Select an option --", "( ) Red", "( ) Green"]
    );

    let chosen = view(decl, "g", true, true, vec![]);
    assert_eq!(render_field(&chosen), ["Color:", "( ) Red", "(•) Green"]);
}

// ============================================================================
// Whole form
// ============================================================================

#[test]
fn test_render_form_nesting_and_submit() {
    let tree = vec![
        Node::text("Sign up"),
        Node::wrapper(vec![Node::field(FieldDecl::new("email").required())]),
    ];
    let mut form = FormController::new(tree, FormConfig::new().submit_label("Send")).unwrap();
    form.handle_submit(None);

    let rendered = form.render();
    assert!(find_field(&rendered.children, "email").is_some());
    assert_eq!(
        render_form(&rendered),
        ["Sign up", "  []", "  *This field is required.", "[ Send ]"]
    );
}

#[test]
fn test_render_form_without_submit_label() {
    let tree = vec![Node::field(FieldDecl::new("q"))];
    let form = FormController::new(tree, FormConfig::new()).unwrap();
    assert_eq!(render_form(&form.render()), ["[]"]);
}
