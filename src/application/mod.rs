// Application layer - Use cases over the forecast repository
pub mod forecast_repository;
pub mod weather_service;
