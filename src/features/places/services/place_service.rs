use serde::Deserialize;

use crate::core::config::PlacesConfig;
use crate::core::error::{AppError, Result};
use crate::features::places::dtos::{PlaceDetailsDto, PlaceSummaryDto, PredictionDto};
use crate::shared::constants::{DEFAULT_NEARBY_TYPES, NEARBY_RADIUS_METERS, NEARBY_RESULT_LIMIT};

/// Google Places nearby search response structure
#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    vicinity: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
}

/// Google Places autocomplete response structure
#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    place_id: String,
    description: String,
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: Option<String>,
    secondary_text: Option<String>,
}

/// Google Places details response structure
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    error_message: Option<String>,
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    name: String,
    formatted_address: Option<String>,
    geometry: Geometry,
    rating: Option<f64>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Service proxying the Google Places API
pub struct PlaceService {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl PlaceService {
    pub fn new(config: PlacesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("TripmarkCore/1.0 (travel-checkin-backend)")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language,
        })
    }

    /// Search for places near a coordinate, capped at the top results
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        types: Option<&str>,
    ) -> Result<Vec<PlaceSummaryDto>> {
        let types = types.unwrap_or(DEFAULT_NEARBY_TYPES);

        let url = format!(
            "{}/nearbysearch/json?location={},{}&radius={}&type={}&language={}&key={}",
            self.base_url,
            latitude,
            longitude,
            NEARBY_RADIUS_METERS,
            urlencoding::encode(types),
            self.language,
            self.api_key
        );

        let response: NearbyResponse = self.execute_request(&url).await?;
        check_status(&response.status, response.error_message.as_deref())?;

        Ok(response
            .results
            .into_iter()
            .take(NEARBY_RESULT_LIMIT)
            .map(map_nearby_result)
            .collect())
    }

    /// Get place name predictions for a partial input
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<PredictionDto>> {
        // An empty input would only produce an INVALID_REQUEST upstream
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/autocomplete/json?input={}&language={}&key={}",
            self.base_url,
            urlencoding::encode(input),
            self.language,
            self.api_key
        );

        let response: AutocompleteResponse = self.execute_request(&url).await?;
        check_status(&response.status, response.error_message.as_deref())?;

        Ok(response.predictions.into_iter().map(map_prediction).collect())
    }

    /// Get details of a single place by its place ID
    pub async fn details(&self, place_id: &str) -> Result<PlaceDetailsDto> {
        let url = format!(
            "{}/details/json?place_id={}&fields=name,formatted_address,geometry,rating,types&language={}&key={}",
            self.base_url,
            urlencoding::encode(place_id),
            self.language,
            self.api_key
        );

        let response: DetailsResponse = self.execute_request(&url).await?;
        check_status(&response.status, response.error_message.as_deref())?;

        let result = response
            .result
            .ok_or_else(|| AppError::NotFound(format!("Place '{}' not found", place_id)))?;

        Ok(map_details_result(result))
    }

    /// Execute HTTP request to the Places API and parse the response.
    /// Request URLs carry the API key, so reqwest errors are logged and
    /// never forwarded to the client.
    async fn execute_request<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Places API request failed: {:?}", e.without_url());
            AppError::ExternalServiceError("Places API is unreachable".to_string())
        })?;

        if !response.status().is_success() {
            tracing::warn!("Places API returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Places API returned status: {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Places API response: {:?}", e.without_url());
            AppError::ExternalServiceError("Invalid response from Places API".to_string())
        })
    }
}

/// ZERO_RESULTS is a valid response with an empty result set, any other
/// non-OK status is an upstream failure
fn check_status(status: &str, error_message: Option<&str>) -> Result<()> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(AppError::ExternalServiceError(format!(
            "Places API error: {}{}",
            other,
            error_message
                .map(|m| format!(" ({})", m))
                .unwrap_or_default()
        ))),
    }
}

fn map_nearby_result(r: NearbyResult) -> PlaceSummaryDto {
    PlaceSummaryDto {
        id: r.place_id,
        name: r.name,
        address: r.vicinity,
        types: r.types,
        rating: r.rating,
    }
}

fn map_prediction(p: Prediction) -> PredictionDto {
    let (main_text, secondary_text) = match p.structured_formatting {
        Some(sf) => (sf.main_text, sf.secondary_text),
        None => (None, None),
    };
    PredictionDto {
        id: p.place_id,
        description: p.description,
        main_text,
        secondary_text,
    }
}

fn map_details_result(r: DetailsResult) -> PlaceDetailsDto {
    PlaceDetailsDto {
        name: r.name,
        address: r.formatted_address,
        latitude: r.geometry.location.lat,
        longitude: r.geometry.location.lng,
        rating: r.rating,
        types: r.types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ok_and_zero_results_pass() {
        assert!(check_status("OK", None).is_ok());
        assert!(check_status("ZERO_RESULTS", None).is_ok());
    }

    #[test]
    fn status_errors_are_surfaced() {
        let err = check_status("REQUEST_DENIED", Some("key invalid")).unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert!(check_status("OVER_QUERY_LIMIT", None).is_err());
        assert!(check_status("INVALID_REQUEST", None).is_err());
    }

    #[test]
    fn details_response_maps_to_flat_dto() {
        let raw = serde_json::json!({
            "status": "OK",
            "result": {
                "name": "Gyeongbokgung Palace",
                "formatted_address": "161 Sajik-ro, Jongno-gu, Seoul",
                "geometry": {"location": {"lat": 37.5796, "lng": 126.9770}},
                "rating": 4.6,
                "types": ["tourist_attraction", "point_of_interest"]
            }
        });

        let parsed: DetailsResponse = serde_json::from_value(raw).unwrap();
        let dto = map_details_result(parsed.result.unwrap());

        assert_eq!(dto.name, "Gyeongbokgung Palace");
        assert_eq!(dto.address.as_deref(), Some("161 Sajik-ro, Jongno-gu, Seoul"));
        assert!((dto.latitude - 37.5796).abs() < 1e-9);
        assert!((dto.longitude - 126.9770).abs() < 1e-9);
        assert_eq!(dto.rating, Some(4.6));
        assert_eq!(dto.types.len(), 2);
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_the_api_key() {
        let service = PlaceService::new(PlacesConfig {
            api_key: "secret-test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            language: "ko".to_string(),
        })
        .unwrap();

        let err = service.nearby(37.5665, 126.9780, None).await.unwrap_err();
        let AppError::ExternalServiceError(message) = err else {
            panic!("expected an external service error");
        };
        assert!(!message.contains("secret-test-key"));
        assert!(!message.contains("key="));
        assert!(!message.contains("127.0.0.1"));
    }

    #[test]
    fn prediction_without_structured_formatting_maps() {
        let parsed: AutocompleteResponse = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "predictions": [
                {"place_id": "abc", "description": "Seoul Station"}
            ]
        }))
        .unwrap();

        let dto = map_prediction(parsed.predictions.into_iter().next().unwrap());
        assert_eq!(dto.id, "abc");
        assert_eq!(dto.description, "Seoul Station");
        assert!(dto.main_text.is_none());
    }
}
