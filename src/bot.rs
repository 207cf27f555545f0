use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error, info, warn};

/// Куда уходят уведомления о статусе.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, text: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat: Recipient) -> Self {
        Self { bot, chat }
    }

    /// Проверяем токен бота, но не останавливаем запуск при ошибке
    pub async fn check(&self) {
        match self.bot.get_me().await {
            Ok(me) => info!("Authorized as @{}", me.username()),
            Err(e) => warn!("Failed to check bot token: {} (continuing anyway)", e),
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        self.bot.send_message(self.chat.clone(), text).await?;
        Ok(())
    }
}

/// Best-effort send: failures are logged and swallowed.
pub async fn send_message<N: Notifier>(notifier: &N, message: &str) -> bool {
    match notifier.notify(message).await {
        Ok(()) => {
            debug!("Message sent successfully");
            true
        }
        Err(e) => {
            error!("Failed to send message: {:#}", e);
            false
        }
    }
}
