//! Turns homework records into chat messages

use serde_json::Value;

use crate::error::FormatError;
use crate::status::ReviewStatus;

/// One submission's name and review status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: ReviewStatus,
}

impl HomeworkRecord {
    /// Decode a raw record. Unknown status codes are an error.
    ///
    /// A non-string `homework_name` is rendered as JSON text. A non-string
    /// `status` is reported as undocumented.
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        let name = render(required_field(value, "homework_name")?);
        let raw_status = required_field(value, "status")?;

        match raw_status.as_str().and_then(ReviewStatus::from_code) {
            Some(status) => Ok(Self { name, status }),
            None => {
                let status = render(raw_status);
                tracing::error!(
                    "Status \"{}\" of homework \"{}\" is not documented",
                    status,
                    name
                );
                Err(FormatError::UnknownStatus { status, name })
            }
        }
    }

    pub fn message(&self) -> String {
        format!(
            "status changed for submission \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Decode `value` and build its notification text
pub fn format_status(value: &Value) -> Result<String, FormatError> {
    HomeworkRecord::from_value(value).map(|record| record.message())
}

fn required_field<'a>(value: &'a Value, field: &'static str) -> Result<&'a Value, FormatError> {
    value.get(field).ok_or_else(|| {
        tracing::error!("Homework record has no \"{}\" key", field);
        FormatError::MissingField(field)
    })
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
