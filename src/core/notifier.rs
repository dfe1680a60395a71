use tracing::{error, info};

use crate::error::DeliveryError;
use crate::providers::Messenger;

/// Delivers notifications and reports the outcome through the log only.
pub struct Notifier<M: Messenger> {
    messenger: M,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M) -> Self {
        Notifier { messenger }
    }

    pub async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        match self.messenger.send(text).await {
            Ok(()) => {
                info!("Message sent: {}", text);
                Ok(())
            }
            Err(e) => {
                error!(kind = "DeliveryFailure", "Message {:?} not sent: {}", text, e);
                Err(e)
            }
        }
    }
}
