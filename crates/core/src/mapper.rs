//! Raw record <-> [`EntryRecord`] mapping.
//!
//! All variants share one build step over canonical keys. They differ in how
//! the canonical record is resolved from the source record, and in the
//! date-time layout they parse:
//!
//! | Variant  | Keys                | Id                          | Layout              |
//! |----------|---------------------|-----------------------------|---------------------|
//! | direct   | canonical           | integer under `id`          | `Y-m-d H:i:s`       |
//! | modify   | canonical           | key named by `id`, cast     | `Y-m-d`             |
//! | import   | [`FieldMap`] lookup | mapped column or `-1`, cast | `Y-m-d H:i`         |
//!
//! Serialization back to a raw record always uses the canonical layout.

use serde_json::{Number, Value};

use crate::datetime::DateTimeFormat;
use crate::entry::{EntryRecord, NEW_ENTRY_ID};
use crate::error::MappingError;
use crate::field_map::{EntryField, FieldMap};
use crate::types::{DbId, RawRecord, Timestamp};
use crate::validation::EntryValidator;

/// How the id of a source record is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdResolution {
    /// The `id` key holds the id as an integer.
    Direct,
    /// The `id` key holds the *name* of the key that holds the id.
    ///
    /// Edit forms submit records in this shape. The lookup is kept exactly as
    /// forms rely on it, even though a plain `id` value looks like the intent.
    Indirect,
    /// The id column comes from the field map; unmapped means a new entry.
    Mapped,
}

/// Converts raw records into entries and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMapper {
    format: DateTimeFormat,
    fields: FieldMap,
    id_resolution: IdResolution,
}

impl EntryMapper {
    /// Canonical keys and layout; the shape entries are serialized in.
    pub fn direct() -> Self {
        Self {
            format: DateTimeFormat::CANONICAL,
            fields: FieldMap::canonical(),
            id_resolution: IdResolution::Direct,
        }
    }

    /// Create/edit form submissions.
    pub fn modify() -> Self {
        Self {
            format: DateTimeFormat::DateOnly,
            fields: FieldMap::canonical(),
            id_resolution: IdResolution::Indirect,
        }
    }

    /// Spreadsheet rows keyed by column letter.
    pub fn import(fields: FieldMap) -> Self {
        Self {
            format: DateTimeFormat::Minutes,
            fields,
            id_resolution: IdResolution::Mapped,
        }
    }

    /// Validator matching this variant's date layout.
    pub fn validator(&self, id_required: bool) -> EntryValidator {
        EntryValidator::new(self.format, id_required)
    }

    /// Build an entry from `raw`.
    ///
    /// Fails with the first of `id`, `datetime_from`, `datetime_to` that is
    /// missing or unparsable; content and issue are taken only when they are
    /// strings.
    pub fn from_record(&self, raw: &RawRecord) -> Result<EntryRecord, MappingError> {
        let canonical = self.resolve(raw);

        let id = canonical
            .get(EntryField::Id.key())
            .and_then(Value::as_i64)
            .ok_or(MappingError::new(EntryField::Id))?;
        let datetime_from = self.timestamp(&canonical, EntryField::DatetimeFrom)?;
        let datetime_to = self.timestamp(&canonical, EntryField::DatetimeTo)?;

        Ok(EntryRecord {
            id,
            datetime_from,
            datetime_to,
            content: text_field(&canonical, EntryField::Content),
            issue: text_field(&canonical, EntryField::Issue),
        })
    }

    /// Serialize all five fields with canonical keys and layout.
    pub fn to_record(&self, entry: &EntryRecord) -> RawRecord {
        let layout = DateTimeFormat::CANONICAL;
        let mut raw = RawRecord::new();
        raw.insert(EntryField::Id.key().into(), Value::Number(Number::from(entry.id)));
        raw.insert(
            EntryField::DatetimeFrom.key().into(),
            Value::String(layout.format(&entry.datetime_from)),
        );
        raw.insert(
            EntryField::DatetimeTo.key().into(),
            Value::String(layout.format(&entry.datetime_to)),
        );
        raw.insert(EntryField::Content.key().into(), optional_text(&entry.content));
        raw.insert(EntryField::Issue.key().into(), optional_text(&entry.issue));
        raw
    }

    pub fn to_records(&self, entries: &[EntryRecord]) -> Vec<RawRecord> {
        entries.iter().map(|entry| self.to_record(entry)).collect()
    }

    // -- resolution --

    /// Rewrite `raw` into canonical keys according to the variant.
    fn resolve(&self, raw: &RawRecord) -> RawRecord {
        match self.id_resolution {
            IdResolution::Direct => raw.clone(),
            IdResolution::Indirect => {
                let mut canonical = raw.clone();
                canonical.insert(EntryField::Id.key().into(), Value::from(indirect_id(raw)));
                canonical
            }
            IdResolution::Mapped => self.resolve_mapped(raw),
        }
    }

    fn resolve_mapped(&self, raw: &RawRecord) -> RawRecord {
        let id = self
            .lookup(raw, EntryField::Id)
            .map(cast_integer)
            .unwrap_or(NEW_ENTRY_ID);

        let text = |field| self.lookup(raw, field).map(value_text).unwrap_or_default();

        let hint = text(EntryField::ContentHint);
        let mut content = text(EntryField::Content);
        if !is_blank_hint(&hint) {
            content = format!("({hint}) {content}");
        }

        let mut canonical = RawRecord::new();
        canonical.insert(EntryField::Id.key().into(), Value::from(id));
        for field in [EntryField::DatetimeFrom, EntryField::DatetimeTo, EntryField::Issue] {
            canonical.insert(field.key().into(), Value::String(text(field)));
        }
        canonical.insert(EntryField::Content.key().into(), Value::String(content));
        canonical
    }

    fn lookup<'a>(&self, raw: &'a RawRecord, field: EntryField) -> Option<&'a Value> {
        self.fields.key(field).and_then(|key| raw.get(key))
    }

    fn timestamp(&self, canonical: &RawRecord, field: EntryField) -> Result<Timestamp, MappingError> {
        canonical
            .get(field.key())
            .and_then(Value::as_str)
            .and_then(|s| self.format.parse(s))
            .ok_or(MappingError::new(field))
    }
}

/// A hint of `""` or `"0"` adds no prefix.
fn is_blank_hint(hint: &str) -> bool {
    hint.is_empty() || hint == "0"
}

/// Follow the `id` value to the key it names; `-1` when either hop misses.
fn indirect_id(raw: &RawRecord) -> DbId {
    let key = match raw.get(EntryField::Id.key()) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return NEW_ENTRY_ID,
    };
    raw.get(&key).map(cast_integer).unwrap_or(NEW_ENTRY_ID)
}

/// Loose integer cast: leading digits of strings, truncation of floats,
/// zero for anything without a numeric reading.
pub fn cast_integer(value: &Value) -> DbId {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as DbId))
            .unwrap_or_default(),
        Value::String(s) => leading_integer(s),
        Value::Bool(b) => DbId::from(*b),
        Value::Array(items) => DbId::from(!items.is_empty()),
        Value::Object(map) => DbId::from(!map.is_empty()),
        Value::Null => 0,
    }
}

fn leading_integer(s: &str) -> DbId {
    let trimmed = s.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<DbId>()
        .map(|n| sign * n)
        .unwrap_or_default()
}

/// Text reading of a cell or form value.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(true) => "1".into(),
        Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

fn text_field(canonical: &RawRecord, field: EntryField) -> Option<String> {
    canonical
        .get(field.key())
        .and_then(Value::as_str)
        .map(String::from)
}

fn optional_text(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}
