pub mod practicum;
pub mod telegram;


use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CycleError, DeliveryError};
use crate::models::Checkpoint;

/// Something that can be asked for homework updates since a checkpoint.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// One request, no retries. The answer comes back undecoded beyond JSON.
    async fn fetch(&self, checkpoint: Checkpoint) -> Result<Value, CycleError>;
}

/// Something that can deliver a text message to the configured recipient.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}
