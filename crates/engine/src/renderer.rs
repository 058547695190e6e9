//! Status renderer. Turns a homework record into the chat message.

use hw_common::error::CheckError;
use hw_common::types::{HOMEWORK_NAME_KEY, HomeworkRecord, STATUS_KEY};

use crate::catalog::HomeworkStatus;

/// Render the notification text for a homework record.
pub fn render(record: &HomeworkRecord) -> Result<String, CheckError> {
    let name = record
        .name()
        .ok_or(CheckError::MissingFields(HOMEWORK_NAME_KEY))?;
    let code = record.status().ok_or(CheckError::MissingFields(STATUS_KEY))?;

    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| CheckError::UndocumentedStatus(code.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
