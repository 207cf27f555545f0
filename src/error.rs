use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("RETRY_PERIOD must be a positive number of seconds, got {0:?}")]
    InvalidRetryPeriod(String),
}

/// Transport failure, bad status and unreadable body all end up here.
#[derive(Debug, Error)]
#[error("Ошибка запроса к API: {0}")]
pub struct FetchError(pub String);

#[derive(Debug, Error, PartialEq)]
pub enum ResponseError {
    #[error("Ожидал в ответе API - dict, а получил - {0}")]
    NotAMapping(&'static str),

    #[error("Не получил homeworks в ответе API")]
    MissingHomeworks,

    #[error("Ожидал получить homeworks в формате - list, а получил {0}")]
    HomeworksNotAList(&'static str),
}

#[derive(Debug, Error, PartialEq)]
pub enum HomeworkError {
    #[error("Ожидал запись о работе в виде dict, а получил - {0}")]
    NotAMapping(&'static str),

    #[error("В ответе нету ключа {0}")]
    MissingKey(&'static str),

    #[error("Выдан неизвестный статус работы - {0}")]
    UnknownVerdict(String),
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Homework(#[from] HomeworkError),
}

/// Имя типа JSON-значения для сообщений об ошибках.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
