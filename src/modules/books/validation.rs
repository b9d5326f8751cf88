//! Payload validation for books.

use serde_json::Value;

use super::models::{BookPatch, NewBook};
use crate::validation::{Mode, NumberRule, Payload, StringRule, ValidationError};

const TITLE: StringRule = StringRule::bounded(3, 200);
const AUTHOR: StringRule = StringRule::any();
const DESCRIPTION: StringRule = StringRule::at_least(5);
const PRICE: NumberRule = NumberRule::at_least(0.0);

const FIELDS: &[&str] = &["title", "author", "description", "price"];

/// Validate the body of a create request.
pub fn validate_create(input: &Value) -> Result<NewBook, ValidationError> {
    let payload = Payload::new(input, Mode::Create)?;

    let book = NewBook {
        title: payload.required_string("title", TITLE)?,
        author: payload.required_string("author", AUTHOR)?,
        description: payload.required_string("description", DESCRIPTION)?,
        price: payload.required_number("price", PRICE)?,
    };
    payload.deny_unknown(FIELDS)?;

    Ok(book)
}

/// Validate the body of an update request; any subset of fields is accepted.
pub fn validate_update(input: &Value) -> Result<BookPatch, ValidationError> {
    let payload = Payload::new(input, Mode::Update)?;

    let patch = BookPatch {
        title: payload.string("title", TITLE)?,
        author: payload.string("author", AUTHOR)?,
        description: payload.string("description", DESCRIPTION)?,
        price: payload.number("price", PRICE)?,
    };
    payload.deny_unknown(FIELDS)?;

    Ok(patch)
}
