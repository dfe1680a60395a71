//! Shape checks for the grading service answer

use serde_json::Value;
use tracing::{debug, info};

use crate::error::CycleError;
use crate::models::{ApiAnswer, HomeworkRecord};

/// Pulls the ordered homework list out of a raw answer.
pub fn extract(answer: &Value) -> Result<Vec<HomeworkRecord>, CycleError> {
    let object = answer.as_object().ok_or(CycleError::TypeMismatch {
        field: "answer",
        expected: "an object",
    })?;
    let homeworks = object
        .get("homeworks")
        .ok_or(CycleError::MissingField("homeworks"))?
        .as_array()
        .ok_or(CycleError::TypeMismatch {
            field: "homeworks",
            expected: "an array",
        })?;

    if homeworks.is_empty() {
        info!("Homework list is empty, nothing new to report");
        return Ok(Vec::new());
    }

    // Only the newest entry has to decode; older ones are never reported.
    let latest = decode(&homeworks[0]).map_err(|_| CycleError::TypeMismatch {
        field: "homeworks[0]",
        expected: "an object with string homework_name and status",
    })?;

    let mut records = vec![latest];
    records.extend(homeworks[1..].iter().filter_map(|item| decode(item).ok()));
    Ok(records)
}

fn decode(item: &Value) -> Result<HomeworkRecord, serde_json::Error> {
    serde_json::from_value::<HomeworkRecord>(item.clone()).map_err(|e| {
        debug!("Rejected homework entry {}: {}", item, e);
        e
    })
}

/// The date the server reports as its own "now", when present.
pub fn server_checkpoint(answer: &Value) -> Option<i64> {
    answer.get("current_date").and_then(Value::as_i64)
}

impl ApiAnswer {
    pub fn from_raw(answer: &Value) -> Result<Self, CycleError> {
        Ok(ApiAnswer {
            homeworks: extract(answer)?,
            current_date: server_checkpoint(answer),
        })
    }
}
