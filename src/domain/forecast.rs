// Forecast domain models - the flattened shape returned to clients
use serde::Serialize;

/// One of the six display fields of a forecast period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastField {
    Weather,
    Rain,
    MinTemp,
    MaxTemp,
    Comfort,
    WindSpeed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub start_time: String,
    pub end_time: String,
    pub weather: String,
    pub rain: String,
    pub min_temp: String,
    pub max_temp: String,
    pub comfort: String,
    pub wind_speed: String,
}

impl ForecastPeriod {
    pub fn new(start_time: String, end_time: String) -> Self {
        Self {
            start_time,
            end_time,
            ..Default::default()
        }
    }

    pub fn field_mut(&mut self, field: ForecastField) -> &mut String {
        match field {
            ForecastField::Weather => &mut self.weather,
            ForecastField::Rain => &mut self.rain,
            ForecastField::MinTemp => &mut self.min_temp,
            ForecastField::MaxTemp => &mut self.max_temp,
            ForecastField::Comfort => &mut self.comfort,
            ForecastField::WindSpeed => &mut self.wind_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWeather {
    pub city: String,
    pub update_time: String,
    pub forecasts: Vec<ForecastPeriod>,
}

impl CityWeather {
    pub fn new(city: String, update_time: String, forecasts: Vec<ForecastPeriod>) -> Self {
        Self {
            city,
            update_time,
            forecasts,
        }
    }
}

/// A city whose fetch failed inside a multi-city request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityFailure {
    pub city: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchCount {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Outcome of a multi-city fan-out: successes first, then failures,
/// each in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeatherBatch {
    pub data: Vec<CityWeather>,
    pub errors: Vec<CityFailure>,
}

impl CityWeatherBatch {
    pub fn count(&self) -> BatchCount {
        BatchCount {
            total: self.data.len() + self.errors.len(),
            success: self.data.len(),
            failed: self.errors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_serializes_camel_case() {
        let mut period = ForecastPeriod::new(
            "2024-01-01 06:00:00".to_string(),
            "2024-01-01 18:00:00".to_string(),
        );
        *period.field_mut(ForecastField::MinTemp) = "15°C".to_string();
        *period.field_mut(ForecastField::WindSpeed) = "3".to_string();

        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["startTime"], "2024-01-01 06:00:00");
        assert_eq!(json["endTime"], "2024-01-01 18:00:00");
        assert_eq!(json["minTemp"], "15°C");
        assert_eq!(json["windSpeed"], "3");
        assert_eq!(json["weather"], "");
    }

    #[test]
    fn test_batch_count() {
        let batch = CityWeatherBatch {
            data: vec![CityWeather::new("臺北市".into(), "desc".into(), vec![])],
            errors: vec![
                CityFailure {
                    city: "a".into(),
                    error: "x".into(),
                },
                CityFailure {
                    city: "b".into(),
                    error: "y".into(),
                },
            ],
        };

        assert_eq!(
            batch.count(),
            BatchCount {
                total: 3,
                success: 1,
                failed: 2
            }
        );
    }
}
