use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope shared by every endpoint:
/// `{status, statusCode, message?, count?, data?}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize = ()> {
    status: StatusCode,
    message: Option<String>,
    count: Option<usize>,
    data: Option<T>,
}

impl ApiResponse<()> {
    /// 200 OK carrying only a message
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }

    /// 201 Created carrying only a message
    pub fn created(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with data
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut body = json!({
            "status": true,
            "statusCode": self.status.as_u16(),
        });

        if let Some(message) = self.message {
            body["message"] = json!(message);
        }
        if let Some(count) = self.count {
            body["count"] = json!(count);
        }
        if let Some(data) = self.data {
            match serde_json::to_value(&data) {
                Ok(value) => body["data"] = value,
                Err(e) => {
                    tracing::error!("failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "status": false,
                            "statusCode": 500,
                            "message": "internal server error",
                        })),
                    )
                        .into_response();
                }
            }
        }

        (self.status, Json(body)).into_response()
    }
}

/// Handler result: success envelope or mapped error envelope.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json<T: Serialize>(resp: ApiResponse<T>) -> (StatusCode, serde_json::Value) {
        let response = resp.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn list_envelope_has_count_and_data() {
        let (status, body) =
            body_json(ApiResponse::ok(vec!["a", "b"]).with_count(2)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!(true));
        assert_eq!(body["statusCode"], json!(200));
        assert_eq!(body["count"], json!(2));
        assert_eq!(body["data"], json!(["a", "b"]));
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn created_envelope_omits_data_and_count() {
        let (status, body) = body_json(ApiResponse::created("canteen created")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["statusCode"], json!(201));
        assert_eq!(body["message"], json!("canteen created"));
        assert!(body.get("data").is_none());
        assert!(body.get("count").is_none());
    }
}
