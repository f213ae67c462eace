// Weather service - City validation, single lookups and multi-city fan-out
use crate::application::forecast_repository::ForecastRepository;
use crate::domain::city::SupportedCities;
use crate::domain::error::WeatherError;
use crate::domain::forecast::{CityFailure, CityWeather, CityWeatherBatch};
use futures::future::join_all;
use std::sync::Arc;

#[derive(Clone)]
pub struct WeatherService {
    repository: Arc<dyn ForecastRepository>,
    cities: Arc<SupportedCities>,
}

impl WeatherService {
    pub fn new(repository: Arc<dyn ForecastRepository>, cities: SupportedCities) -> Self {
        Self {
            repository,
            cities: Arc::new(cities),
        }
    }

    pub fn supported_cities(&self) -> &SupportedCities {
        &self.cities
    }

    pub async fn city_weather(&self, city: &str) -> Result<CityWeather, WeatherError> {
        if !self.cities.is_supported(city) {
            return Err(WeatherError::Validation {
                invalid: vec![city.to_string()],
            });
        }

        self.repository.fetch_city(city).await
    }

    /// Validate every name up front, then fan out. A single unknown name
    /// rejects the whole request before anything is fetched.
    pub async fn cities_weather<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<CityWeatherBatch, WeatherError> {
        let (valid, invalid) = self.cities.partition(names);
        if !invalid.is_empty() || valid.is_empty() {
            return Err(WeatherError::Validation { invalid });
        }

        self.repository.ensure_configured()?;

        Ok(self.fetch_many(&valid).await)
    }

    /// Fetch every city concurrently and wait for all of them. Failures are
    /// collected per city and never abort the siblings.
    pub async fn fetch_many(&self, cities: &[String]) -> CityWeatherBatch {
        let outcomes = join_all(cities.iter().map(|city| async move {
            (city, self.repository.fetch_city(city).await)
        }))
        .await;

        let mut data = Vec::new();
        let mut errors = Vec::new();

        for (city, outcome) in outcomes {
            match outcome {
                Ok(weather) => data.push(weather),
                Err(e) => {
                    tracing::warn!("Forecast for {} failed: {}", city, e);
                    errors.push(CityFailure {
                        city: city.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Fetched {} cities: {} succeeded, {} failed",
            cities.len(),
            data.len(),
            errors.len()
        );

        CityWeatherBatch { data, errors }
    }
}
