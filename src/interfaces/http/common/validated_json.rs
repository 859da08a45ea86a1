//! JSON body extractor that also runs `validator` rules.
//!
//! Malformed or mistyped bodies are rejected with 400; bodies that parse but
//! break a rule are rejected with 422 and one `field: message` entry per
//! failed rule, e.g. `score: score must be between 1 and 5`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// `Json<T>` whose payload passed `T::validate()`.
///
/// Used by every write endpoint, e.g.
/// `ValidatedJson(request): ValidatedJson<RateProfessorRequest>`.
pub struct ValidatedJson<T>(pub T);

pub enum BodyRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// Failed rules joined as `field: message; field: message`, sorted by field
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid {}", field, failure.code),
            })
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;
        body.validate().map_err(BodyRejection::Invalid)?;
        Ok(Self(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Review {
        #[validate(length(min = 1, max = 500, message = "message is required"))]
        message: String,
        #[validate(range(min = 1, max = 5))]
        score: i32,
    }

    async fn accept(ValidatedJson(review): ValidatedJson<Review>) -> String {
        format!("{}/{}", review.message, review.score)
    }

    async fn post_body(body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/reviews")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = Router::new()
            .route("/reviews", post(accept))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn error_of(body: &str) -> String {
        let json: Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["success"], false);
        json["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn valid_review_reaches_handler() {
        let (status, body) = post_body(&json!({"message": "Clear lectures", "score": 5}).to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Clear lectures/5");
    }

    #[tokio::test]
    async fn broken_json_is_bad_request() {
        let (status, body) = post_body("{\"message\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_of(&body).starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, _) = post_body(&json!({"message": "hi"}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn every_broken_rule_is_listed() {
        let (status, body) = post_body(&json!({"message": "", "score": 9}).to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            error_of(&body),
            "message: message is required; score: invalid range"
        );
    }
}
