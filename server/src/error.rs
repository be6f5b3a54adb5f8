use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde_json::json;
use thiserror::Error;
use uibo_hunyuan::HunyuanError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing message content")]
    MissingMessage,

    #[error("Missing Tencent Cloud credential configuration")]
    MissingCredentials,

    #[error("Hunyuan call failed")]
    Upstream(#[from] HunyuanError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::MissingMessage => (StatusCode::BAD_REQUEST, None),
            AppError::MissingCredentials => (StatusCode::INTERNAL_SERVER_ERROR, None),
            AppError::Upstream(HunyuanError::Provider { code, message }) => (
                StatusCode::BAD_GATEWAY,
                Some(json!({ "Code": code, "Message": message })),
            ),
            AppError::Upstream(err) => (StatusCode::BAD_GATEWAY, Some(json!(err.to_string()))),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_to_bad_gateway() {
        let err = AppError::Upstream(HunyuanError::Provider {
            code: "InternalError".to_string(),
            message: "boom".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_message_is_a_client_error() {
        let response = AppError::MissingMessage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_credentials_is_a_server_error() {
        let response = AppError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
