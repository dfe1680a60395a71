//! Status codes reported by the grading service and the sentences sent for them

use crate::error::CycleError;
use crate::models::HomeworkRecord;

pub const STATUS_CODES: [&str; 3] = ["approved", "reviewing", "rejected"];

pub fn verdict_for(code: &str) -> Option<&'static str> {
    match code {
        "approved" => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
        "reviewing" => Some("Работа взята на проверку ревьюером."),
        "rejected" => Some("Работа проверена: у ревьюера есть замечания."),
        _ => None,
    }
}

/// Turns a homework record into the notification text.
pub fn translate(record: &HomeworkRecord) -> Result<String, CycleError> {
    let name = record
        .homework_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or(CycleError::MissingField("homework_name"))?;
    let status = record
        .status
        .as_deref()
        .ok_or(CycleError::MissingField("status"))?;
    let verdict =
        verdict_for(status).ok_or_else(|| CycleError::UnknownStatus(status.to_string()))?;

    Ok(format!("Changed review status of \"{}\" — {}", name, verdict))
}
