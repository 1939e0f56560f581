use portfolio_core::{compose_mailto, validate_contact_form, ContactFormInput};

#[test]
fn mailto_uses_form_subject_and_encodes_body() {
    let form = validate_contact_form(&ContactFormInput::from_fields(
        "Jo",
        "jo@example.com",
        Some("Project & idea"),
        "Hello there, this is a test.",
    ))
    .unwrap();

    assert_eq!(
        compose_mailto("owner@example.com", &form),
        "mailto:owner@example.com?subject=Project%20%26%20idea\
         &body=Name%3A%20Jo%0AEmail%3A%20jo%40example.com%0A%0AHello%20there%2C%20this%20is%20a%20test."
    );
}

#[test]
fn mailto_falls_back_to_portfolio_subject() {
    let form = validate_contact_form(&ContactFormInput::from_fields(
        "Jo",
        "jo@example.com",
        None,
        "Hello there, this is a test.",
    ))
    .unwrap();

    let link = compose_mailto("owner@example.com", &form);
    assert!(link.starts_with("mailto:owner@example.com?subject=Portfolio%20Contact%3A%20Jo&body="));
}
