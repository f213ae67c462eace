// HTTP response utilities for the JSON envelope and error bodies
use crate::domain::error::WeatherError;
use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::any::Any;

const FALLBACK_MESSAGE: &str = "無法取得天氣資料，請稍後再試";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Wrap `data` in `{success: true, data}` with status 200.
pub fn success_response<T: Serialize>(data: T) -> Response {
    Json(ApiResponse {
        success: true,
        data,
    })
    .into_response()
}

#[derive(Debug)]
pub enum ApiError {
    InvalidParameter {
        message: String,
    },
    UnsupportedCity {
        city: String,
        supported: Vec<String>,
    },
    UnsupportedCities {
        invalid: Vec<String>,
        supported: Vec<String>,
    },
    Weather(WeatherError),
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError::Weather(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidParameter {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidParameter {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidParameter { message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "參數錯誤", "message": message })),
            )
                .into_response(),
            ApiError::UnsupportedCity { city, supported } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "不支援的城市",
                    "message": format!("不支援的城市名稱: {}", city),
                    "supportedCities": supported,
                })),
            )
                .into_response(),
            ApiError::UnsupportedCities { invalid, supported } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "不支援的城市",
                    "message": format!("以下城市不支援: {}", invalid.join(", ")),
                    "invalidCities": invalid,
                    "supportedCities": supported,
                })),
            )
                .into_response(),
            ApiError::Weather(WeatherError::UpstreamHttp { status, body }) => {
                upstream_error_response(status, body)
            }
            ApiError::Weather(err) => {
                tracing::error!("Forecast request failed: {}", err);
                internal_error_response(err.to_string())
            }
        }
    }
}

/// Pass the upstream status through with its body as `details`.
fn upstream_error_response(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    let details = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
    let message = details
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("無法取得天氣資料")
        .to_string();

    (
        status,
        Json(json!({
            "error": "CWA API 錯誤",
            "message": message,
            "details": details,
        })),
    )
        .into_response()
}

pub fn internal_error_response(message: String) -> Response {
    let message = if message.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "伺服器錯誤", "message": message })),
    )
        .into_response()
}

pub fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "找不到此路徑" }))).into_response()
}

/// Turn a handler panic into the regular JSON 500 body
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::new()
    };

    tracing::error!("Handler panicked: {}", detail);
    internal_error_response(detail)
}
