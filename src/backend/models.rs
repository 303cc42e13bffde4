//! Request and response bodies for the course backend
//!
//! Responses go through explicit schemas. Anything missing or of the wrong
//! type is treated as "not completed" / zero rather than rejected.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::BackendError;
use crate::course::ProgressRecord;

/// Reference to the learner a progress write belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    /// Learner username
    pub username: String,
}

/// Body of `POST progress/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    /// Learner the record belongs to
    pub user: UserRef,
    /// Owning module
    pub module_name: String,
    /// Completed section
    pub section_name: String,
    /// Completion flag
    pub completed: bool,
    /// Course percentage after this completion
    pub progress_percentage: u8,
}

/// Body of `POST progress/final-quiz`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalScoreRequest {
    /// Learner username
    pub username: String,
    /// Final quiz percentage
    pub score: u8,
    /// Always true; only passing scores are sent
    pub completed: bool,
}

/// Body of `POST user/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST user/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for authenticated endpoints
    #[serde(default)]
    pub token: Option<String>,
    /// Username to use for progress calls
    #[serde(default)]
    pub username: Option<String>,
    /// Account role ("admin" for dashboard access)
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of `POST user/signup`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST user/adminsignup`
#[derive(Debug, Clone, Serialize)]
pub struct AdminSignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Always "admin"
    pub role: String,
}

/// Body of `POST user/forgot-password`
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST user/change-password`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Generic `{ "message": ... }` body returned by account endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One login event in a learner's history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginEntry {
    /// Timestamp as sent by the backend
    #[serde(default)]
    pub time: String,
    /// Client IP
    #[serde(default)]
    pub ip: String,
    /// Resolved location
    #[serde(default)]
    pub location: String,
}

impl LoginEntry {
    /// Parse the timestamp (RFC 3339, or a naive ISO timestamp taken as UTC)
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.time) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// A learner as returned by the admin endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearnerOverview {
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_history: Vec<LoginEntry>,
    pub course_progress: Vec<ProgressRecord>,
}

/// Decode a progress list, failing closed on malformed entries
///
/// The top level must be an array. Entries that are not objects or have no
/// section name are skipped; a missing or non-boolean `completed` is false;
/// a missing or non-numeric `progressPercentage` is 0.
pub fn decode_progress(value: &Value) -> Result<Vec<ProgressRecord>, BackendError> {
    let entries = value
        .as_array()
        .ok_or_else(|| BackendError::InvalidResponse("progress data is not an array".into()))?;

    Ok(entries.iter().filter_map(decode_record).collect())
}

fn decode_record(value: &Value) -> Option<ProgressRecord> {
    let obj = value.as_object()?;
    let section_name = obj.get("sectionName")?.as_str()?.to_string();

    Some(ProgressRecord {
        module_name: obj.get("moduleName").and_then(Value::as_str).unwrap_or_default().to_string(),
        section_name,
        completed: obj.get("completed").and_then(Value::as_bool).unwrap_or(false),
        progress_percentage: obj
            .get("progressPercentage")
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite())
            .map(|p| p.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0),
    })
}

/// Decode the admin "all learners" payload
pub fn decode_learners(value: &Value) -> Result<Vec<LearnerOverview>, BackendError> {
    let entries = value
        .as_array()
        .ok_or_else(|| BackendError::InvalidResponse("learner list is not an array".into()))?;

    Ok(entries.iter().filter(|v| v.is_object()).map(decode_learner).collect())
}

/// Decode a single learner object
pub fn decode_learner(value: &Value) -> LearnerOverview {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

    let login_history = value
        .get("loginHistory")
        .and_then(Value::as_array)
        .map(|entries| {
            entries.iter().filter_map(|e| serde_json::from_value(e.clone()).ok()).collect()
        })
        .unwrap_or_default();

    let course_progress = value
        .get("courseProgress")
        .map(|p| decode_progress(p).unwrap_or_default())
        .unwrap_or_default();

    LearnerOverview {
        name: text("name").or_else(|| text("username")),
        email: text("email"),
        login_history,
        course_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn save_request_serializes_camel_case() {
        let request = SaveProgressRequest {
            user: UserRef { username: "ana".into() },
            module_name: "MODULE_1".into(),
            section_name: "Module 1 Quiz".into(),
            completed: true,
            progress_percentage: 24,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "user": { "username": "ana" },
                "moduleName": "MODULE_1",
                "sectionName": "Module 1 Quiz",
                "completed": true,
                "progressPercentage": 24
            })
        );
    }

    #[test]
    fn change_password_uses_new_password_key() {
        let json = serde_json::to_value(ChangePasswordRequest {
            email: "a@b.c".into(),
            new_password: "secret1".into(),
        })
        .unwrap();
        assert_eq!(json["newPassword"], "secret1");
    }

    #[test]
    fn decode_progress_fails_closed() {
        let value = json!([
            { "moduleName": "MODULE_1", "sectionName": "A", "completed": true, "progressPercentage": 12.6 },
            { "sectionName": "B", "completed": "yes" },
            { "moduleName": "MODULE_1" },
            42,
            { "sectionName": "C", "completed": true, "progressPercentage": null }
        ]);

        let records = decode_progress(&value).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].progress_percentage, 13);
        assert!(!records[1].completed);
        assert_eq!(records[1].module_name, "");
        assert_eq!(records[2].progress_percentage, 0);
    }

    #[test]
    fn decode_progress_rejects_non_arrays() {
        let err = decode_progress(&json!({ "error": "nope" })).unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[test]
    fn decode_learner_tolerates_missing_fields() {
        let learner = decode_learner(&json!({ "email": "x@y.z" }));
        assert_eq!(learner.email.as_deref(), Some("x@y.z"));
        assert!(learner.name.is_none());
        assert!(learner.login_history.is_empty());
        assert!(learner.course_progress.is_empty());
    }

    #[test]
    fn login_entry_timestamps() {
        let rfc = LoginEntry { time: "2025-03-01T10:00:00Z".into(), ..Default::default() };
        let naive = LoginEntry { time: "2025-03-01T10:00:00.123".into(), ..Default::default() };
        let junk = LoginEntry { time: "yesterday".into(), ..Default::default() };
        assert!(rfc.timestamp().is_some());
        assert!(naive.timestamp().is_some());
        assert!(junk.timestamp().is_none());
    }
}
