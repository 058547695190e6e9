//! Response validator. Checks the shape of an API payload and extracts the
//! most recent homework record.

use serde_json::Value;

use hw_common::error::CheckError;
use hw_common::types::{HomeworkRecord, json_type_name};

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// Validate a decoded API payload and return its first homework record.
///
/// The API lists submissions newest first, so index 0 is the one whose
/// status is reported. The record is returned as-is; field checks happen
/// when it is rendered.
pub fn validate(raw: &Value) -> Result<HomeworkRecord, CheckError> {
    let body = raw.as_object().ok_or_else(|| {
        CheckError::MalformedResponse(format!(
            "ожидался объект, получен {}",
            json_type_name(raw)
        ))
    })?;

    let homeworks = body
        .get(HOMEWORKS_KEY)
        .ok_or(CheckError::MissingFields(HOMEWORKS_KEY))?;
    if !body.contains_key(CURRENT_DATE_KEY) {
        return Err(CheckError::MissingFields(CURRENT_DATE_KEY));
    }

    let homeworks = homeworks.as_array().ok_or(CheckError::WrongType {
        field: HOMEWORKS_KEY,
        expected: "array",
        found: json_type_name(homeworks),
    })?;

    let latest = homeworks.first().ok_or(CheckError::NoHomeworkEntries)?;
    let record = latest.as_object().ok_or_else(|| {
        CheckError::MalformedResponse(format!(
            "запись о домашней работе должна быть объектом, получен {}",
            json_type_name(latest)
        ))
    })?;

    tracing::debug!(
        total = homeworks.len(),
        current_date = %body[CURRENT_DATE_KEY],
        "API response validated"
    );

    Ok(HomeworkRecord::new(record.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hw_common::types::ApiResponse;
    use serde_json::json;

    #[test]
    fn test_valid_payloads_render_with_name() {
        for (name, status) in [("hw1", "approved"), ("проект", "reviewing"), ("a b", "rejected")] {
            let payload = ApiResponse {
                homeworks: vec![
                    serde_json::from_value(json!({"homework_name": name, "status": status}))
                        .unwrap(),
                ],
                current_date: 1000,
            };
            let raw = serde_json::to_value(&payload).unwrap();
            let text = crate::renderer::render(&validate(&raw).unwrap()).unwrap();
            assert!(text.contains(name));
        }
    }

    #[test]
    fn test_returns_first_record_unchanged() {
        let raw = json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "reviewing", "id": 2, "reviewer_comment": ""},
                {"homework_name": "hw1", "status": "approved", "id": 1}
            ],
            "current_date": 1000
        });
        let record = validate(&raw).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            raw["homeworks"][0]
        );
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        for raw in [json!([]), json!("text"), json!(null), json!(3)] {
            assert!(matches!(
                validate(&raw),
                Err(CheckError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_missing_homeworks_key() {
        let raw = json!({"current_date": 1000});
        assert_eq!(validate(&raw), Err(CheckError::MissingFields("homeworks")));
    }

    #[test]
    fn test_missing_current_date_key() {
        let raw = json!({"homeworks": [{"homework_name": "hw1", "status": "approved"}]});
        assert_eq!(
            validate(&raw),
            Err(CheckError::MissingFields("current_date"))
        );
    }

    #[test]
    fn test_scalar_homeworks_is_wrong_type() {
        let raw = json!({"homeworks": 5, "current_date": 1000});
        assert_eq!(
            validate(&raw),
            Err(CheckError::WrongType {
                field: "homeworks",
                expected: "array",
                found: "number",
            })
        );
    }

    #[test]
    fn test_object_homeworks_is_wrong_type() {
        let raw = json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1000});
        assert!(matches!(
            validate(&raw),
            Err(CheckError::WrongType { found: "object", .. })
        ));
    }

    #[test]
    fn test_empty_homeworks() {
        let raw = json!({"homeworks": [], "current_date": 1000});
        assert_eq!(validate(&raw), Err(CheckError::NoHomeworkEntries));
    }

    #[test]
    fn test_non_object_record_is_malformed() {
        let raw = json!({"homeworks": ["hw1"], "current_date": 1000});
        assert!(matches!(
            validate(&raw),
            Err(CheckError::MalformedResponse(_))
        ));
    }
}
