use std::fmt;

use crate::constants::{
    DATETIME_FORMAT_HEADER, DATETIME_FORMAT_UNIX, LIVE_STREAM_URL, PRACTICE_STREAM_URL,
};
use crate::types::Instrument;

/// Какой стрим-хост использовать
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// демо-счёт
    #[default]
    Practice,
    /// реальный счёт
    Live,
}

impl Environment {
    /// Адрес стрима цен
    pub fn stream_url(self) -> &'static str {
        match self {
            Environment::Practice => PRACTICE_STREAM_URL,
            Environment::Live => LIVE_STREAM_URL,
        }
    }
}

/// Токен доступа и номер счёта
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Personal access token (Bearer)
    pub token: String,
    /// Номер счёта
    pub account_id: String,
}

// токен в логи не попадает
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"***")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Параметры стрим-запроса, которые транспорт навешивает на GET.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamRequest {
    /// Адрес стрима
    pub url: String,
    /// Заголовки: авторизация и формат времени
    pub headers: Vec<(String, String)>,
    /// `accountId` и `instruments`
    pub query: Vec<(String, String)>,
}

impl StreamRequest {
    /// Собирает запрос для счёта и инструмента
    pub fn new(env: Environment, creds: &Credentials, instrument: &Instrument) -> Self {
        Self {
            url: env.stream_url().to_string(),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", creds.token)),
                (
                    DATETIME_FORMAT_HEADER.to_string(),
                    DATETIME_FORMAT_UNIX.to_string(),
                ),
            ],
            query: vec![
                ("accountId".to_string(), creds.account_id.clone()),
                ("instruments".to_string(), instrument.symbol().to_string()),
            ],
        }
    }
}

impl fmt::Debug for StreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "Bearer ***")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        f.debug_struct("StreamRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("query", &self.query)
            .finish()
    }
}
