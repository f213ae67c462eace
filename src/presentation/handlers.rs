// HTTP request handlers
use crate::domain::error::WeatherError;
use crate::domain::forecast::{BatchCount, CityFailure, CityWeather};
use crate::infrastructure::http_response::{ApiError, not_found_response, success_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// City served by the legacy `/newtaipei` route
pub const LEGACY_CITY: &str = "新北市";

#[derive(Deserialize)]
pub struct CitiesQuery {
    pub cities: Option<String>,
}

#[derive(Serialize)]
struct SupportedCitiesData<'a> {
    cities: &'a [String],
    count: usize,
}

#[derive(Serialize)]
struct BatchResponse {
    success: bool,
    data: Vec<CityWeather>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<CityFailure>,
    count: BatchCount,
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "歡迎使用 CWA 天氣預報 API",
        "endpoints": {
            "health": "/api/health",
            "supportedCities": "/api/weather/cities",
            "singleCity": "/api/weather/city/:city",
            "multipleCities": "/api/weather/multiple?cities=臺北市,新北市",
            "newtaipei": "/api/weather/newtaipei",
        },
        "examples": {
            "singleCity": "/api/weather/city/臺北市",
            "multipleCities": "/api/weather/multiple?cities=臺北市,新北市,桃園市",
        },
    }))
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub async fn list_cities(State(state): State<Arc<AppState>>) -> Response {
    let cities = state.weather_service.supported_cities();
    success_response(SupportedCitiesData {
        cities: cities.names(),
        count: cities.len(),
    })
}

pub async fn city_weather(
    path: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let Path(city) = path?;
    single_city(&state, &city).await
}

pub async fn newtaipei_weather(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    single_city(&state, LEGACY_CITY).await
}

async fn single_city(state: &AppState, city: &str) -> Result<Response, ApiError> {
    match state.weather_service.city_weather(city).await {
        Ok(weather) => Ok(success_response(weather)),
        Err(WeatherError::Validation { .. }) => Err(ApiError::UnsupportedCity {
            city: city.to_string(),
            supported: state.weather_service.supported_cities().names().to_vec(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// `?cities=臺北市,新北市` - every name must be supported or nothing is fetched
pub async fn multiple_cities_weather(
    query: Result<Query<CitiesQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let Some(raw) = query.cities.filter(|c| !c.is_empty()) else {
        return Err(ApiError::InvalidParameter {
            message: "請提供 cities 參數，例如: ?cities=臺北市,新北市".to_string(),
        });
    };

    let names: Vec<&str> = raw.split(',').map(str::trim).collect();

    match state.weather_service.cities_weather(&names).await {
        Ok(batch) => {
            let count = batch.count();
            Ok(Json(BatchResponse {
                success: true,
                data: batch.data,
                errors: batch.errors,
                count,
            })
            .into_response())
        }
        Err(WeatherError::Validation { invalid }) => Err(ApiError::UnsupportedCities {
            invalid,
            supported: state.weather_service.supported_cities().names().to_vec(),
        }),
        Err(e) => Err(e.into()),
    }
}

pub async fn not_found() -> Response {
    not_found_response()
}
