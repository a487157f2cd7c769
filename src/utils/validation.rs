use std::collections::BTreeSet;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use serde_path_to_error::Segment;
use validator::Validate;

use crate::error::{ErrorKind, FieldError, ValidationReport};

/// A validated wire shape.
///
/// Field rules come from the `validator` derive; rules that need several fields
/// at once go in [`Schema::cross_field`], which runs over the parsed draft.
///
/// `Default` only supplies placeholders for fields that failed to parse; it is
/// not a valid value of the schema.
pub trait Schema: Serialize + DeserializeOwned + Validate + Default + Sized {
    const NAME: &'static str;

    /// Earlier wire names, as `(alias, field)`.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];

    /// Fields [`Schema::cross_field`] reads. The pass is skipped when any of
    /// them failed to parse.
    const CROSS_FIELD_INPUTS: &'static [&'static str] = &[];

    fn cross_field(&self) -> Vec<FieldError> {
        Vec::new()
    }

    /// Field rules plus the cross-field pass, ignoring fields in `unparsed`.
    fn check(&self, unparsed: &BTreeSet<String>) -> ValidationReport {
        let mut report = match self.validate() {
            Ok(()) => ValidationReport::new(),
            Err(errors) => ValidationReport::from(errors),
        };
        report
            .errors
            .retain(|e| e.field().map_or(true, |f| !unparsed.contains(f)));

        if !Self::CROSS_FIELD_INPUTS
            .iter()
            .any(|f| unparsed.contains(*f))
        {
            report.extend(self.cross_field());
        }
        report
    }

    /// Runs every field rule and the cross-field pass over an already typed draft.
    fn validated(self) -> Result<Self, ValidationReport> {
        let report = self.check(&BTreeSet::new());
        if report.is_empty() {
            tracing::trace!(schema = Self::NAME, "schema accepted");
            Ok(self)
        } else {
            tracing::debug!(schema = Self::NAME, errors = report.len(), "schema rejected");
            Err(report)
        }
    }

    /// Builds the value from raw input, reporting every missing or malformed
    /// field together with the rule violations of the fields that did parse.
    fn from_value(value: JsonValue) -> Result<Self, ValidationReport> {
        let JsonValue::Object(mut input) = value else {
            tracing::debug!(schema = Self::NAME, "input is not an object");
            return Err(ValidationReport::single(FieldError::new(
                &[],
                ErrorKind::InvalidValue,
                "Input should be an object",
            )));
        };

        for (alias, field) in Self::ALIASES {
            if !input.contains_key(*field) {
                if let Some(v) = input.remove(*alias) {
                    input.insert(field.to_string(), v);
                }
            }
        }

        let placeholders = match serde_json::to_value(Self::default()) {
            Ok(JsonValue::Object(map)) => map,
            _ => JsonMap::new(),
        };
        let mut report = ValidationReport::new();
        let mut unparsed = BTreeSet::new();

        // serde stops at the first failure; swap each broken field for its
        // placeholder and read again until the draft parses.
        let draft = loop {
            let parsed: Result<Self, _> =
                serde_path_to_error::deserialize(JsonValue::Object(input.clone()));
            match parsed {
                Ok(draft) => break draft,
                Err(err) => {
                    let path = err.path().iter().filter_map(segment_name).collect();
                    let error = FieldError::from_parse(path, err.inner());
                    let field = error.field().map(str::to_string);
                    report.push(error);

                    let placeholder = field
                        .filter(|f| !unparsed.contains(f))
                        .and_then(|f| placeholders.get(&f).cloned().map(|p| (f, p)));
                    match placeholder {
                        Some((field, value)) => {
                            unparsed.insert(field.clone());
                            input.insert(field, value);
                        }
                        None => {
                            tracing::debug!(schema = Self::NAME, error = %report, "schema failed to parse");
                            return Err(report);
                        }
                    }
                }
            }
        };

        report.extend(draft.check(&unparsed).errors);
        if report.is_empty() {
            tracing::trace!(schema = Self::NAME, "schema accepted");
            Ok(draft)
        } else {
            tracing::debug!(schema = Self::NAME, errors = report.len(), "schema rejected");
            Err(report)
        }
    }

    fn from_json(text: &str) -> Result<Self, ValidationReport> {
        let value: JsonValue =
            serde_json::from_str(text).map_err(|e| ValidationReport::from_serde(&e))?;
        Self::from_value(value)
    }

    fn to_value(&self) -> serde_json::Result<JsonValue> {
        serde_json::to_value(self)
    }

    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn segment_name(segment: &Segment) -> Option<String> {
    match segment {
        Segment::Seq { index } => Some(index.to_string()),
        Segment::Map { key } => Some(key.clone()),
        Segment::Enum { variant } => Some(variant.clone()),
        _ => None,
    }
}

/// Returns the first element that occurs more than once.
pub fn first_duplicate<T: PartialEq>(items: &[T]) -> Option<&T> {
    items
        .iter()
        .enumerate()
        .find(|&(i, item)| items[..i].contains(item))
        .map(|(_, item)| item)
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
