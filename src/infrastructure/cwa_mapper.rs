// Mapper to flatten CWA location records into forecast periods
use crate::domain::error::WeatherError;
use crate::domain::forecast::{CityWeather, ForecastField, ForecastPeriod};
use crate::infrastructure::cwa_repository::CwaLocation;

/// Element tag -> (target field, suffix). Adding a tag only needs a row here.
const ELEMENT_MAPPINGS: &[(&str, ForecastField, &str)] = &[
    ("Wx", ForecastField::Weather, ""),
    ("PoP", ForecastField::Rain, "%"),
    ("MinT", ForecastField::MinTemp, "°C"),
    ("MaxT", ForecastField::MaxTemp, "°C"),
    ("CI", ForecastField::Comfort, ""),
    ("WS", ForecastField::WindSpeed, ""),
];

fn lookup_element(tag: &str) -> Option<(ForecastField, &'static str)> {
    ELEMENT_MAPPINGS
        .iter()
        .find(|(name, _, _)| *name == tag)
        .map(|&(_, field, suffix)| (field, suffix))
}

/// Build one forecast period per time index of the first weather element.
///
/// Every element must carry the same number of time entries as the first;
/// a ragged record is rejected rather than padded.
pub fn location_to_city_weather(
    location: CwaLocation,
    description: String,
) -> Result<CityWeather, WeatherError> {
    let malformed = |reason: String| WeatherError::MalformedRecord {
        city: location.location_name.clone(),
        reason,
    };

    let Some(first) = location.weather_element.first() else {
        return Err(malformed("no weather elements".to_string()));
    };
    let period_count = first.time.len();

    if let Some(ragged) = location
        .weather_element
        .iter()
        .find(|e| e.time.len() != period_count)
    {
        return Err(malformed(format!(
            "element {} has {} time entries, expected {}",
            ragged.element_name,
            ragged.time.len(),
            period_count
        )));
    }

    let mut forecasts: Vec<ForecastPeriod> = first
        .time
        .iter()
        .map(|t| ForecastPeriod::new(t.start_time.clone(), t.end_time.clone()))
        .collect();

    for element in &location.weather_element {
        let Some((field, suffix)) = lookup_element(&element.element_name) else {
            tracing::debug!("Ignoring unknown weather element {}", element.element_name);
            continue;
        };

        for (period, entry) in forecasts.iter_mut().zip(&element.time) {
            *period.field_mut(field) = format!("{}{}", entry.parameter.parameter_name, suffix);
        }
    }

    Ok(CityWeather::new(location.location_name, description, forecasts))
}
