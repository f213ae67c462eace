// CWA open data repository implementation
use crate::application::forecast_repository::ForecastRepository;
use crate::domain::error::WeatherError;
use crate::domain::forecast::CityWeather;
use crate::infrastructure::cwa_mapper::location_to_city_weather;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CwaRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    dataset: String,
}

#[derive(Debug, Deserialize)]
struct CwaResponse {
    records: CwaRecords,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CwaRecords {
    #[serde(default)]
    dataset_description: String,
    #[serde(default)]
    location: Vec<CwaLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaLocation {
    pub location_name: String,
    #[serde(default)]
    pub weather_element: Vec<CwaWeatherElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaWeatherElement {
    pub element_name: String,
    #[serde(default)]
    pub time: Vec<CwaTimeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaTimeEntry {
    pub start_time: String,
    pub end_time: String,
    pub parameter: CwaParameter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaParameter {
    pub parameter_name: String,
}

impl CwaRepository {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        dataset: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            dataset,
        })
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::Config)
    }

    fn build_forecast_url(&self, api_key: &str, city: &str) -> String {
        format!(
            "{}/v1/rest/datastore/{}?Authorization={}&locationName={}",
            self.base_url,
            self.dataset,
            urlencoding::encode(api_key),
            urlencoding::encode(city)
        )
    }

    async fn execute_query(&self, city: &str) -> Result<CwaResponse, WeatherError> {
        let url = self.build_forecast_url(self.api_key()?, city);

        tracing::debug!("Requesting {} forecast for {}", self.dataset, city);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read CWA error body for {}: {}", city, e);
                    String::new()
                }
            };
            tracing::error!("CWA API returned {} for {}: {}", status, city, body);
            return Err(WeatherError::UpstreamHttp { status, body });
        }

        response.json::<CwaResponse>().await.map_err(transport_error)
    }
}

fn transport_error(err: reqwest::Error) -> WeatherError {
    if err.is_decode() {
        WeatherError::Decode(err.to_string())
    } else {
        WeatherError::Network(err.to_string())
    }
}

#[async_trait]
impl ForecastRepository for CwaRepository {
    fn ensure_configured(&self) -> Result<(), WeatherError> {
        self.api_key().map(|_| ())
    }

    async fn fetch_city(&self, city: &str) -> Result<CityWeather, WeatherError> {
        let CwaRecords {
            dataset_description,
            location,
        } = self.execute_query(city).await?.records;

        let Some(record) = location.into_iter().find(|l| l.location_name == city) else {
            tracing::warn!("CWA API returned no location record for {}", city);
            return Err(WeatherError::UpstreamEmpty {
                city: city.to_string(),
            });
        };

        location_to_city_weather(record, dataset_description)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORECAST_PATH: &str = "/v1/rest/datastore/F-C0032-001";

    fn repository(base_url: &str, api_key: Option<&str>) -> CwaRepository {
        CwaRepository::new(
            base_url.to_string(),
            api_key.map(str::to_string),
            "F-C0032-001".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_city_normalizes_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .and(query_param("Authorization", "test-key"))
            .and(query_param("locationName", "臺北市"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixtures::forecast_body("臺北市")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let weather = repository(&mock_server.uri(), Some("test-key"))
            .fetch_city("臺北市")
            .await
            .unwrap();

        assert_eq!(weather.city, "臺北市");
        assert_eq!(weather.update_time, "三十六小時天氣預報");
        assert_eq!(weather.forecasts.len(), 2);
        assert_eq!(weather.forecasts[0].rain, "20%");
        assert_eq!(weather.forecasts[1].max_temp, "30°C");
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        for key in [None, Some(""), Some("   ")] {
            let repo = repository(&mock_server.uri(), key);
            assert!(matches!(repo.ensure_configured(), Err(WeatherError::Config)));
            assert!(matches!(
                repo.fetch_city("臺北市").await,
                Err(WeatherError::Config)
            ));
        }
    }

    #[tokio::test]
    async fn test_empty_location_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": "true",
                "records": { "datasetDescription": "三十六小時天氣預報", "location": [] }
            })))
            .mount(&mock_server)
            .await;

        let err = repository(&mock_server.uri(), Some("k"))
            .fetch_city("臺北市")
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamEmpty { city } if city == "臺北市"));
    }

    #[tokio::test]
    async fn test_record_for_other_city_is_not_used() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixtures::forecast_body("高雄市")),
            )
            .mount(&mock_server)
            .await;

        let err = repository(&mock_server.uri(), Some("k"))
            .fetch_city("臺北市")
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamEmpty { .. }));
    }

    #[tokio::test]
    async fn test_http_error_keeps_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Unauthorized: invalid API key" })),
            )
            .mount(&mock_server)
            .await;

        let err = repository(&mock_server.uri(), Some("bad"))
            .fetch_city("臺北市")
            .await
            .unwrap_err();

        match err {
            WeatherError::UpstreamHttp { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid API key"));
            }
            other => panic!("expected upstream http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status() {
        // Promise more bytes than are sent, then hang up
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
                .await
                .unwrap();
        });

        let err = repository(&format!("http://{}", addr), Some("k"))
            .fetch_city("臺北市")
            .await
            .unwrap_err();

        match err {
            WeatherError::UpstreamHttp { status, body } => {
                assert_eq!(status, 502);
                assert!(body.is_empty());
            }
            other => panic!("expected upstream http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let err = repository(&mock_server.uri(), Some("k"))
            .fetch_city("臺北市")
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on port 1
        let err = repository("http://127.0.0.1:1", Some("k"))
            .fetch_city("臺北市")
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Network(_)));
    }

    #[test]
    fn test_build_forecast_url_encodes_city() {
        let repo = repository("https://opendata.cwa.gov.tw/api/", Some("CWA-1"));
        let url = repo.build_forecast_url("CWA-1", "臺北市");

        assert_eq!(
            url,
            "https://opendata.cwa.gov.tw/api/v1/rest/datastore/F-C0032-001?Authorization=CWA-1&locationName=%E8%87%BA%E5%8C%97%E5%B8%82"
        );
    }
}
