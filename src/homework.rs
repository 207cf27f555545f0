use crate::error::{json_kind, HomeworkError, ResponseError};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn code(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for Verdict {
    type Err = HomeworkError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(HomeworkError::UnknownVerdict(other.to_string())),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Проверяет форму ответа API и возвращает список работ.
pub fn check_response(response: &Value) -> Result<&[Value], ResponseError> {
    debug!("Checking API response");

    let map = response
        .as_object()
        .ok_or_else(|| ResponseError::NotAMapping(json_kind(response)))?;
    let homeworks = map.get("homeworks").ok_or(ResponseError::MissingHomeworks)?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ResponseError::HomeworksNotAList(json_kind(homeworks)))
}

/// A homework record that passed field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub homework_name: String,
    pub verdict: Verdict,
}

impl StatusUpdate {
    /// Проверяет поля записи о работе: сначала `homework_name`, затем `status`.
    pub fn parse(homework: &Value) -> Result<Self, HomeworkError> {
        let record = homework
            .as_object()
            .ok_or_else(|| HomeworkError::NotAMapping(json_kind(homework)))?;

        let homework_name = record
            .get("homework_name")
            .and_then(Value::as_str)
            .ok_or(HomeworkError::MissingKey("homework_name"))?;
        let status = record
            .get("status")
            .and_then(Value::as_str)
            .ok_or(HomeworkError::MissingKey("status"))?;

        Ok(Self {
            homework_name: homework_name.to_string(),
            verdict: status.parse()?,
        })
    }

    /// Текст уведомления для чата.
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.verdict.description()
        )
    }
}
