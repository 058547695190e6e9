use thiserror::Error;

/// Errors raised while loading configuration. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Отсутствует обязательная переменная окружения: {0}")]
    MissingCredential(&'static str),

    #[error("Некорректное значение переменной окружения {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors produced by a single poll cycle.
///
/// The `Display` text of each variant is what ends up in the failure
/// notification, so it is written for the person reading the chat.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("Сбой при обращении к эндпоинту - {0}")]
    EndpointUnreachable(String),

    #[error("Эндпоинт {url} недоступен. Код ответа API: {code}")]
    UnexpectedStatusCode { url: String, code: u16 },

    #[error("ответ от API не является корректным JSON-объектом: {0}")]
    MalformedResponse(String),

    #[error("в ответе API отсутствует ключ '{0}'")]
    MissingFields(&'static str),

    #[error("ответ от API возвращает в поле '{field}' не {expected}, а {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("ответ от API не содержит ни одной домашней работы")]
    NoHomeworkEntries,

    #[error("недокументированный статус '{0}' домашней работы, обнаруженный в ответе API")]
    UndocumentedStatus(String),
}

impl CheckError {
    /// Short machine-friendly label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::EndpointUnreachable(_) => "endpoint_unreachable",
            CheckError::UnexpectedStatusCode { .. } => "unexpected_status_code",
            CheckError::MalformedResponse(_) => "malformed_response",
            CheckError::MissingFields(_) => "missing_fields",
            CheckError::WrongType { .. } => "wrong_type",
            CheckError::NoHomeworkEntries => "no_homework_entries",
            CheckError::UndocumentedStatus(_) => "undocumented_status",
        }
    }
}
