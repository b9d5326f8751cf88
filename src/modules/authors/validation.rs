//! Payload validation for authors.

use serde_json::Value;

use super::models::{AuthorPatch, NewAuthor};
use crate::validation::{Mode, Payload, StringRule, ValidationError};

const FIRST_NAME: StringRule = StringRule::bounded(3, 200);
const LAST_NAME: StringRule = StringRule::bounded(3, 200);
/// Updates cap lastName at 30 characters while creates allow 200. Kept as
/// observed in the deployed API until the intended bound is confirmed.
const LAST_NAME_ON_UPDATE: StringRule = StringRule::bounded(3, 30);
const NATIONALITY: StringRule = StringRule::bounded(2, 100);
const IMAGE: StringRule = StringRule::any().optional();

const FIELDS: &[&str] = &["firstName", "lastName", "nationality", "image"];

/// Validate the body of a create request.
pub fn validate_create(input: &Value) -> Result<NewAuthor, ValidationError> {
    let payload = Payload::new(input, Mode::Create)?;

    let author = NewAuthor {
        first_name: payload.required_string("firstName", FIRST_NAME)?,
        last_name: payload.required_string("lastName", LAST_NAME)?,
        nationality: payload.required_string("nationality", NATIONALITY)?,
        image: payload.string("image", IMAGE)?,
    };
    payload.deny_unknown(FIELDS)?;

    Ok(author)
}

/// Validate the body of an update request; any subset of fields is accepted.
pub fn validate_update(input: &Value) -> Result<AuthorPatch, ValidationError> {
    let payload = Payload::new(input, Mode::Update)?;

    let patch = AuthorPatch {
        first_name: payload.string("firstName", FIRST_NAME)?,
        last_name: payload.string("lastName", LAST_NAME_ON_UPDATE)?,
        nationality: payload.string("nationality", NATIONALITY)?,
        image: payload.string("image", IMAGE)?,
    };
    payload.deny_unknown(FIELDS)?;

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;
    use serde_json::json;

    #[test]
    fn accepts_minimal_author() {
        let author = validate_create(&json!({
            "firstName": " Jane ",
            "lastName": "Doe",
            "nationality": "US"
        }))
        .unwrap();

        assert_eq!(
            author,
            NewAuthor {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                nationality: "US".to_string(),
                image: None,
            }
        );
    }

    #[test]
    fn reports_first_missing_field() {
        let err = validate_create(&json!({"nationality": "x"})).unwrap_err();
        assert_eq!(err.to_string(), "\"firstName\" is required");
    }

    #[test]
    fn checks_fields_in_declaration_order() {
        let err = validate_create(&json!({
            "firstName": "Jo",
            "lastName": "D",
            "nationality": ""
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"firstName\" length must be at least 3 characters long"
        );
    }

    #[test]
    fn nationality_allows_two_characters() {
        let err = validate_create(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "nationality": "U"
        }))
        .unwrap_err();
        assert_eq!(err.field, "nationality");
        assert_eq!(err.rule, Rule::MinLength(2));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = validate_create(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "nationality": "US",
            "age": 40
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "\"age\" is not allowed");
    }

    #[test]
    fn image_must_be_a_string() {
        let err = validate_create(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "nationality": "US",
            "image": 7
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "\"image\" must be a string");
    }

    #[test]
    fn empty_update_is_a_no_op() {
        assert_eq!(validate_update(&json!({})).unwrap(), AuthorPatch::default());
    }

    #[test]
    fn update_checks_supplied_fields_only() {
        let patch = validate_update(&json!({"nationality": " FR "})).unwrap();
        assert_eq!(patch.nationality.as_deref(), Some("FR"));
        assert!(patch.first_name.is_none());

        let err = validate_update(&json!({"firstName": "Al"})).unwrap_err();
        assert_eq!(err.rule, Rule::MinLength(3));
    }

    #[test]
    fn update_caps_last_name_at_thirty() {
        let long_name = "x".repeat(31);
        assert!(validate_create(&json!({
            "firstName": "Jane",
            "lastName": long_name,
            "nationality": "US"
        }))
        .is_ok());

        let err = validate_update(&json!({"lastName": long_name})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"lastName\" length must be less than or equal to 30 characters long"
        );
    }
}
