// Repository trait for upstream forecast access
use crate::domain::error::WeatherError;
use crate::domain::forecast::CityWeather;
use async_trait::async_trait;

#[async_trait]
pub trait ForecastRepository: Send + Sync {
    /// Fails with `WeatherError::Config` if the repository cannot issue
    /// requests at all. Checked before any network call.
    fn ensure_configured(&self) -> Result<(), WeatherError>;

    /// Fetch and normalize the forecast for a single city
    async fn fetch_city(&self, city: &str) -> Result<CityWeather, WeatherError>;
}
