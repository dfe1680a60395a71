use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;

use crate::config::ChatTarget;
use crate::error::DeliveryError;
use crate::providers::Messenger;

pub struct Telegram {
    pub bot: Bot,
    chat: Recipient,
}

impl Telegram {
    pub fn new(token: &str, chat: &ChatTarget) -> Self {
        Telegram {
            bot: Bot::new(token),
            chat: recipient_for(chat),
        }
    }
}

fn recipient_for(chat: &ChatTarget) -> Recipient {
    match chat {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

#[async_trait]
impl Messenger for Telegram {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat.clone(), text)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }
}
