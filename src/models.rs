use chrono::Utc;
use serde::Deserialize;

/// Boundary of already-seen data, in seconds since the epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(i64);

impl Checkpoint {
    pub fn new(secs: i64) -> Self {
        Checkpoint(secs)
    }

    pub fn now() -> Self {
        Checkpoint(Utc::now().timestamp())
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    // The server is trusted to report monotonic dates.
    pub fn advance(&mut self, server_date: Option<i64>) {
        if let Some(date) = server_date {
            self.0 = date;
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HomeworkRecord {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Validated answer of the grading service for one cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiAnswer {
    /// Most recently updated first
    pub homeworks: Vec<HomeworkRecord>,
    pub current_date: Option<i64>,
}
