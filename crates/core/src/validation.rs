//! Schema check for raw entry records, run before mapping.
//!
//! The validator never fails hard: it returns a per-field report built on
//! [`validator::ValidationErrors`] and leaves logging to the caller.

use std::borrow::Cow;

use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::datetime::DateTimeFormat;
use crate::entry::{MAX_CONTENT_LENGTH, MAX_ISSUE_LENGTH};
use crate::field_map::EntryField;
use crate::types::RawRecord;

/// Rule set for one mapper variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryValidator {
    format: DateTimeFormat,
    id_required: bool,
}

impl EntryValidator {
    pub fn new(format: DateTimeFormat, id_required: bool) -> Self {
        Self {
            format,
            id_required,
        }
    }

    /// Check `raw` against the rules, collecting every failing field.
    ///
    /// - `id`: required when `id_required`; integer-valued when present.
    /// - `datetime_from`, `datetime_to`: required strings in the active format.
    /// - `content`: optional, null or at most 4096 characters.
    /// - `issue`: optional, null or at most 256 characters.
    pub fn validate(&self, raw: &RawRecord) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let id = EntryField::Id.key();
        match raw.get(id) {
            None if self.id_required => errors.add(id, required()),
            Some(value) if !is_integer_value(value) => errors.add(
                id,
                failure("integer", format!("{id} must be an integer")),
            ),
            _ => {}
        }

        for field in [EntryField::DatetimeFrom, EntryField::DatetimeTo] {
            let key = field.key();
            match raw.get(key) {
                None => errors.add(key, required()),
                Some(Value::String(s)) if self.format.parse(s).is_some() => {}
                Some(_) => errors.add(
                    key,
                    failure(
                        "date",
                        format!("{key} must be a date matching {}", self.format.pattern()),
                    ),
                ),
            }
        }

        for (field, max) in [
            (EntryField::Content, MAX_CONTENT_LENGTH),
            (EntryField::Issue, MAX_ISSUE_LENGTH),
        ] {
            let key = field.key();
            if let Some(err) = raw.get(key).and_then(|value| check_length(key, value, max)) {
                errors.add(key, err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self, raw: &RawRecord) -> bool {
        self.validate(raw).is_ok()
    }
}

/// Integers, or strings holding an optionally signed integer.
pub fn is_integer_value(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.parse::<i64>().is_ok(),
        _ => false,
    }
}

fn check_length(key: &str, value: &Value, max: usize) -> Option<ValidationError> {
    match value {
        Value::Null => None,
        Value::String(s) if s.chars().count() <= max => None,
        Value::String(_) => {
            let mut err = failure("length", format!("{key} must be at most {max} characters"));
            err.add_param(Cow::from("max"), &max);
            Some(err)
        }
        _ => Some(failure("string", format!("{key} must be a string"))),
    }
}

fn required() -> ValidationError {
    failure("required", "field is required".to_string())
}

fn failure(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::from(message));
    err
}
