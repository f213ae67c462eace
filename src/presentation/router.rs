// Route table and middleware stack
use crate::infrastructure::http_response::panic_response;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    city_weather, health_check, index, list_cities, multiple_cities_weather, newtaipei_weather,
    not_found,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let weather = Router::new()
        .route("/cities", get(list_cities))
        .route("/newtaipei", get(newtaipei_weather))
        .route("/city/:city", get(city_weather))
        .route("/multiple", get(multiple_cities_weather));

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .nest("/api/weather", weather)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
