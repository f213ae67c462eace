// Error taxonomy for forecast lookups
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("CWA_API_KEY is not configured; set it in the environment, .env or config/app")]
    Config,

    #[error("unsupported cities: {}", .invalid.join(", "))]
    Validation { invalid: Vec<String> },

    #[error("no forecast data returned for {city}")]
    UpstreamEmpty { city: String },

    #[error("CWA API responded with status {status}")]
    UpstreamHttp { status: u16, body: String },

    #[error("failed to reach CWA API: {0}")]
    Network(String),

    #[error("unexpected CWA API response: {0}")]
    Decode(String),

    #[error("malformed forecast record for {city}: {reason}")]
    MalformedRecord { city: String, reason: String },
}

