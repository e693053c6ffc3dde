use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::warn;

use crate::database::{ActivityStore, RegistryError};
use crate::models::ActivityCatalog;
use crate::services::activities_service::{self, MessageView};

type ApiError = (StatusCode, Json<Value>);

// Raw pairs rather than a struct: a repeated `email` resolves to its last
// value instead of failing deserialization.
type QueryPairs = Vec<(String, String)>;

fn detail(status: StatusCode, detail: impl Into<Value>) -> ApiError {
    (status, Json(serde_json::json!({ "detail": detail.into() })))
}

fn missing_email() -> ApiError {
    detail(
        StatusCode::UNPROCESSABLE_ENTITY,
        serde_json::json!([{
            "loc": ["query", "email"],
            "msg": "Field required",
            "type": "missing"
        }]),
    )
}

fn activity_name(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    match path {
        Ok(Path(name)) => Ok(name),
        // A name that does not decode cannot match any activity.
        Err(e) => {
            warn!(error = %e.body_text(), "undecodable activity name");
            Err(registry_error(RegistryError::ActivityNotFound))
        }
    }
}

fn email_param(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<String, ApiError> {
    let Query(pairs) = query.map_err(|e| detail(e.status(), e.body_text()))?;
    pairs
        .into_iter()
        .filter(|(key, _)| key == "email")
        .map(|(_, value)| value)
        .last()
        .ok_or_else(missing_email)
}

fn registry_error(e: RegistryError) -> ApiError {
    let status = match e {
        RegistryError::ActivityNotFound => StatusCode::NOT_FOUND,
        RegistryError::AlreadySignedUp | RegistryError::NotRegistered => StatusCode::BAD_REQUEST,
    };
    detail(status, e.to_string())
}

pub async fn list_activities_handler(State(store): State<ActivityStore>) -> Json<ActivityCatalog> {
    Json(activities_service::list_activities(&store))
}

pub async fn signup_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(store): State<ActivityStore>,
) -> Result<Json<MessageView>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = email_param(query)?;
    activities_service::signup_for_activity(&store, &activity_name, &email)
        .map(Json)
        .map_err(registry_error)
}

pub async fn unregister_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(store): State<ActivityStore>,
) -> Result<Json<MessageView>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = email_param(query)?;
    activities_service::unregister_from_activity(&store, &activity_name, &email)
        .map(Json)
        .map_err(registry_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Result<Query<QueryPairs>, QueryRejection> {
        Ok(Query(
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn last_email_wins() {
        let email = email_param(pairs(&[
            ("email", "a@mergington.edu"),
            ("other", "x"),
            ("email", "b@mergington.edu"),
        ]))
        .unwrap();
        assert_eq!(email, "b@mergington.edu");
    }

    #[test]
    fn missing_email_is_unprocessable() {
        let (status, Json(body)) = email_param(pairs(&[("mail", "a@mergington.edu")])).unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], serde_json::json!(["query", "email"]));
    }

    #[test]
    fn empty_email_is_passed_through() {
        assert_eq!(email_param(pairs(&[("email", "")])).unwrap(), "");
    }

    #[test]
    fn registry_errors_map_to_status_and_detail() {
        let (status, Json(body)) = registry_error(RegistryError::NotRegistered);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({ "detail": "Student is not registered for this activity" })
        );
        let (status, _) = registry_error(RegistryError::ActivityNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
