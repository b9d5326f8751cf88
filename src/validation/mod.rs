//! Field rules shared by the resource validators.
//!
//! A validator walks its schema in declaration order and stops at the first
//! broken rule. Keys outside the schema are rejected after every declared
//! field has passed.

use std::fmt;

use bookshelf_http::AppError;
use serde_json::{Map, Value};

/// Whether a payload creates a record or patches an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Required fields must be present.
    Create,
    /// Every field is optional.
    Update,
}

/// The rule a payload broke.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    NotAnObject,
    Required,
    NotAllowed,
    String,
    Empty,
    MinLength(usize),
    MaxLength(usize),
    Number,
    Min(f64),
}

/// First rule violation found in a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = &self.field;
        match &self.rule {
            Rule::NotAnObject => write!(f, "\"{field}\" must be of type object"),
            Rule::Required => write!(f, "\"{field}\" is required"),
            Rule::NotAllowed => write!(f, "\"{field}\" is not allowed"),
            Rule::String => write!(f, "\"{field}\" must be a string"),
            Rule::Empty => write!(f, "\"{field}\" is not allowed to be empty"),
            Rule::MinLength(min) => {
                write!(f, "\"{field}\" length must be at least {min} characters long")
            }
            Rule::MaxLength(max) => write!(
                f,
                "\"{field}\" length must be less than or equal to {max} characters long"
            ),
            Rule::Number => write!(f, "\"{field}\" must be a number"),
            Rule::Min(min) => write!(f, "\"{field}\" must be greater than or equal to {min}"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Constraints on a string field.
#[derive(Debug, Clone, Copy)]
pub struct StringRule {
    pub required: bool,
    pub trim: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringRule {
    /// A trimmed, required string whose length lies in `min..=max`.
    pub const fn bounded(min: usize, max: usize) -> Self {
        Self {
            required: true,
            trim: true,
            min: Some(min),
            max: Some(max),
        }
    }

    /// A trimmed, required string of at least `min` characters.
    pub const fn at_least(min: usize) -> Self {
        Self {
            required: true,
            trim: true,
            min: Some(min),
            max: None,
        }
    }

    /// Any non-empty string, kept verbatim.
    pub const fn any() -> Self {
        Self {
            required: true,
            trim: false,
            min: None,
            max: None,
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

/// Constraints on a numeric field.
#[derive(Debug, Clone, Copy)]
pub struct NumberRule {
    pub required: bool,
    pub min: Option<f64>,
}

impl NumberRule {
    pub const fn at_least(min: f64) -> Self {
        Self {
            required: true,
            min: Some(min),
        }
    }
}

/// An incoming JSON body being checked against one resource schema.
#[derive(Debug)]
pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
    mode: Mode,
}

impl<'a> Payload<'a> {
    /// Accept `input` only if it is a JSON object.
    pub fn new(input: &'a Value, mode: Mode) -> Result<Self, ValidationError> {
        match input {
            Value::Object(fields) => Ok(Self { fields, mode }),
            _ => Err(ValidationError::new("value", Rule::NotAnObject)),
        }
    }

    fn is_required(&self, required: bool) -> bool {
        required && self.mode == Mode::Create
    }

    /// Check a string field, returning its (possibly trimmed) value.
    ///
    /// `Ok(None)` means the field was absent and allowed to be.
    pub fn string(&self, name: &str, rule: StringRule) -> Result<Option<String>, ValidationError> {
        let Some(value) = self.fields.get(name) else {
            if self.is_required(rule.required) {
                return Err(ValidationError::new(name, Rule::Required));
            }
            return Ok(None);
        };

        let Value::String(raw) = value else {
            return Err(ValidationError::new(name, Rule::String));
        };

        let text = if rule.trim { raw.trim() } else { raw.as_str() };
        if text.is_empty() {
            return Err(ValidationError::new(name, Rule::Empty));
        }

        let length = text.chars().count();
        if let Some(min) = rule.min {
            if length < min {
                return Err(ValidationError::new(name, Rule::MinLength(min)));
            }
        }
        if let Some(max) = rule.max {
            if length > max {
                return Err(ValidationError::new(name, Rule::MaxLength(max)));
            }
        }

        Ok(Some(text.to_string()))
    }

    /// Like [`Payload::string`] for fields a create payload must carry.
    pub fn required_string(&self, name: &str, rule: StringRule) -> Result<String, ValidationError> {
        self.string(name, rule)?
            .ok_or_else(|| ValidationError::new(name, Rule::Required))
    }

    /// Check a numeric field. Numeric strings are accepted and converted.
    pub fn number(&self, name: &str, rule: NumberRule) -> Result<Option<f64>, ValidationError> {
        let Some(value) = self.fields.get(name) else {
            if self.is_required(rule.required) {
                return Err(ValidationError::new(name, Rule::Required));
            }
            return Ok(None);
        };

        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|number| number.is_finite())
        .ok_or_else(|| ValidationError::new(name, Rule::Number))?;

        if let Some(min) = rule.min {
            if number < min {
                return Err(ValidationError::new(name, Rule::Min(min)));
            }
        }

        Ok(Some(number))
    }

    pub fn required_number(&self, name: &str, rule: NumberRule) -> Result<f64, ValidationError> {
        self.number(name, rule)?
            .ok_or_else(|| ValidationError::new(name, Rule::Required))
    }

    /// Reject the first key that is not part of the schema.
    pub fn deny_unknown(&self, known: &[&str]) -> Result<(), ValidationError> {
        match self.fields.keys().find(|key| !known.contains(&key.as_str())) {
            Some(key) => Err(ValidationError::new(key.as_str(), Rule::NotAllowed)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_payload_is_rejected() {
        let input = json!(["firstName"]);
        let err = Payload::new(&input, Mode::Create).unwrap_err();
        assert_eq!(err.to_string(), "\"value\" must be of type object");
    }

    #[test]
    fn string_is_trimmed_before_length_checks() {
        let input = json!({"name": "  ab  "});
        let payload = Payload::new(&input, Mode::Create).unwrap();
        let err = payload.string("name", StringRule::bounded(3, 10)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"name\" length must be at least 3 characters long"
        );

        let input = json!({"name": "  abc  "});
        let payload = Payload::new(&input, Mode::Create).unwrap();
        assert_eq!(
            payload.string("name", StringRule::bounded(3, 10)).unwrap(),
            Some("abc".to_string())
        );
    }

    #[test]
    fn blank_string_is_empty() {
        let input = json!({"name": "   "});
        let payload = Payload::new(&input, Mode::Create).unwrap();
        let err = payload.string("name", StringRule::bounded(3, 10)).unwrap_err();
        assert_eq!(err.to_string(), "\"name\" is not allowed to be empty");
    }

    #[test]
    fn max_length_counts_characters() {
        let input = json!({"name": "ééééé"});
        let payload = Payload::new(&input, Mode::Create).unwrap();
        assert!(payload.string("name", StringRule::bounded(3, 5)).is_ok());
        let err = payload.string("name", StringRule::bounded(1, 4)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"name\" length must be less than or equal to 4 characters long"
        );
    }

    #[test]
    fn astral_characters_count_once() {
        let input = json!({"title": "😀😀"});
        let payload = Payload::new(&input, Mode::Create).unwrap();
        assert_eq!(
            payload.string("title", StringRule::bounded(3, 200)).unwrap_err().rule,
            Rule::MinLength(3)
        );
    }

    #[test]
    fn required_only_applies_to_create() {
        let input = json!({});
        let create = Payload::new(&input, Mode::Create).unwrap();
        assert_eq!(
            create.string("name", StringRule::any()).unwrap_err().rule,
            Rule::Required
        );
        assert_eq!(
            create.number("price", NumberRule::at_least(0.0)).unwrap_err().rule,
            Rule::Required
        );
        assert_eq!(create.string("name", StringRule::any().optional()).unwrap(), None);

        let update = Payload::new(&input, Mode::Update).unwrap();
        assert_eq!(update.string("name", StringRule::any()).unwrap(), None);
        assert_eq!(update.number("price", NumberRule::at_least(0.0)).unwrap(), None);
    }

    #[test]
    fn null_is_a_type_error() {
        let input = json!({"name": null, "price": null});
        let payload = Payload::new(&input, Mode::Update).unwrap();
        assert_eq!(
            payload.string("name", StringRule::any()).unwrap_err().rule,
            Rule::String
        );
        assert_eq!(
            payload.number("price", NumberRule::at_least(0.0)).unwrap_err().rule,
            Rule::Number
        );
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let input = json!({"price": "12.5", "bad": "twelve", "negative": -1});
        let payload = Payload::new(&input, Mode::Create).unwrap();
        assert_eq!(
            payload.number("price", NumberRule::at_least(0.0)).unwrap(),
            Some(12.5)
        );
        assert_eq!(
            payload.number("bad", NumberRule::at_least(0.0)).unwrap_err().to_string(),
            "\"bad\" must be a number"
        );
        assert_eq!(
            payload
                .number("negative", NumberRule::at_least(0.0))
                .unwrap_err()
                .to_string(),
            "\"negative\" must be greater than or equal to 0"
        );
    }

    #[test]
    fn unknown_keys_are_not_allowed() {
        let input = json!({"title": "x", "isbn": "123"});
        let payload = Payload::new(&input, Mode::Update).unwrap();
        let err = payload.deny_unknown(&["title"]).unwrap_err();
        assert_eq!(err.to_string(), "\"isbn\" is not allowed");
        assert!(payload.deny_unknown(&["title", "isbn"]).is_ok());
    }
}
