//! Shape checks for the homework statuses response

use serde_json::Value;

use crate::error::ValidationError;
use crate::state::Watermark;

/// A response that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResponse {
    /// Homework records in arrival order, still undecoded
    pub homeworks: Vec<Value>,
    pub current_date: Watermark,
}

/// Check that `response` carries a `homeworks` list and a `current_date`
/// timestamp, and extract both.
pub fn validate(response: &Value) -> Result<ValidatedResponse, ValidationError> {
    let fields = response.as_object().ok_or_else(|| {
        tracing::error!("API response is not a JSON object");
        ValidationError::WrongType {
            field: "response",
            expected: "an object",
        }
    })?;

    let homeworks = fields.get("homeworks").ok_or_else(|| missing("homeworks"))?;
    let current_date = fields
        .get("current_date")
        .ok_or_else(|| missing("current_date"))?;

    let homeworks = homeworks.as_array().ok_or_else(|| {
        tracing::error!("API response key \"homeworks\" holds {}", type_name(homeworks));
        ValidationError::WrongType {
            field: "homeworks",
            expected: "a list",
        }
    })?;

    let current_date = current_date.as_i64().ok_or_else(|| {
        tracing::error!(
            "API response key \"current_date\" holds {}",
            type_name(current_date)
        );
        ValidationError::WrongType {
            field: "current_date",
            expected: "an integer",
        }
    })?;
    let current_date = Watermark::from_secs(current_date);

    if homeworks.is_empty() {
        tracing::debug!("No status changes since {}", current_date);
    }

    Ok(ValidatedResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

fn missing(field: &'static str) -> ValidationError {
    tracing::error!("API response has no \"{}\" key", field);
    ValidationError::MissingField(field)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
