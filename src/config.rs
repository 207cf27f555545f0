use crate::error::ConfigError;
use std::env;
use std::time::Duration;
use teloxide::types::{ChatId, Recipient};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

const REQUIRED: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub retry_period: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    /// Пустое значение считается отсутствующим.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let retry_period = match get("RETRY_PERIOD") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidRetryPeriod(raw)),
            },
            None => Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
        };

        Ok(Self {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            endpoint: get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_period,
        })
    }

    /// Numeric ids go to a chat, anything else is treated as a channel username.
    pub fn recipient(&self) -> Recipient {
        let raw = self.telegram_chat_id.trim();
        match raw.parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const FULL: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "practicum"),
        ("TELEGRAM_TOKEN", "telegram"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn loads_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&FULL)).unwrap();
        assert_eq!(config.practicum_token, "practicum");
        assert_eq!(config.telegram_token, "telegram");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.retry_period, Duration::from_secs(600));
        assert_eq!(config.recipient(), Recipient::Id(ChatId(42)));
    }

    #[test]
    fn every_missing_subset_is_rejected() {
        for mask in 1u8..8 {
            let present: Vec<(&str, &str)> = FULL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u8 << *i) == 0)
                .map(|(_, pair)| *pair)
                .collect();
            let expected: Vec<&str> = FULL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u8 << *i) != 0)
                .map(|(_, (key, _))| *key)
                .collect();

            match Config::from_lookup(lookup_from(&present)) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, expected),
                other => panic!("mask {mask}: expected missing error, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "practicum"),
            ("TELEGRAM_TOKEN", "   "),
            ("TELEGRAM_CHAT_ID", "42"),
        ]));
        assert!(matches!(config, Err(ConfigError::Missing(ref m)) if m == &vec!["TELEGRAM_TOKEN"]));
    }

    #[test]
    fn optional_overrides_are_applied() {
        let mut pairs = FULL.to_vec();
        pairs.push(("PRACTICUM_ENDPOINT", "http://localhost:9000/api/"));
        pairs.push(("RETRY_PERIOD", "30"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/api/");
        assert_eq!(config.retry_period, Duration::from_secs(30));
    }

    #[test]
    fn bad_retry_period_is_rejected() {
        for raw in ["0", "-5", "ten"] {
            let mut pairs = FULL.to_vec();
            pairs.push(("RETRY_PERIOD", raw));
            assert!(matches!(
                Config::from_lookup(lookup_from(&pairs)),
                Err(ConfigError::InvalidRetryPeriod(_))
            ));
        }
    }

    #[test]
    fn channel_username_becomes_channel_recipient() {
        let mut pairs = FULL.to_vec();
        pairs[2] = ("TELEGRAM_CHAT_ID", "@homework_channel");
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(
            config.recipient(),
            Recipient::ChannelUsername("@homework_channel".to_string())
        );
    }
}
