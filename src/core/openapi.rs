use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::checkins::{dtos as checkins_dtos, handlers as checkins_handlers};
use crate::features::photos::{dtos as photos_dtos, handlers as photos_handlers};
use crate::features::places::{dtos as places_dtos, handlers as places_handlers};
use crate::features::trips::{dtos as trips_dtos, handlers as trips_handlers};
use crate::shared::geo::exif::PhotoMetadata;
use crate::shared::geo::PhotoLocation;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Trips
        trips_handlers::list_trips,
        trips_handlers::get_trip,
        trips_handlers::create_trip,
        trips_handlers::update_trip,
        trips_handlers::delete_trip,
        // Check-ins
        checkins_handlers::list_checkins,
        checkins_handlers::create_checkin,
        checkins_handlers::update_checkin,
        checkins_handlers::delete_checkin,
        checkins_handlers::distance_between,
        checkins_handlers::get_trip_path,
        // Photos
        photos_handlers::upload_photo,
        photos_handlers::delete_photo_by_url,
        // Places
        places_handlers::nearby_places,
        places_handlers::autocomplete_places,
        places_handlers::place_details,
    ),
    components(
        schemas(
            // Shared
            Meta,
            PhotoLocation,
            PhotoMetadata,
            auth::model::AuthenticatedUser,
            // Trips
            trips_dtos::CreateTripDto,
            trips_dtos::UpdateTripDto,
            trips_dtos::TripResponseDto,
            trips_dtos::DeleteTripResponseDto,
            ApiResponse<Vec<trips_dtos::TripResponseDto>>,
            ApiResponse<trips_dtos::TripResponseDto>,
            ApiResponse<trips_dtos::DeleteTripResponseDto>,
            // Check-ins
            checkins_dtos::CreateCheckinDto,
            checkins_dtos::UpdateCheckinDto,
            checkins_dtos::CheckinResponseDto,
            checkins_dtos::DeleteCheckinResponseDto,
            checkins_dtos::DistanceResponseDto,
            checkins_dtos::PathPointDto,
            checkins_dtos::TripPathDto,
            ApiResponse<Vec<checkins_dtos::CheckinResponseDto>>,
            ApiResponse<checkins_dtos::CheckinResponseDto>,
            ApiResponse<checkins_dtos::DeleteCheckinResponseDto>,
            ApiResponse<checkins_dtos::DistanceResponseDto>,
            ApiResponse<checkins_dtos::TripPathDto>,
            // Photos
            photos_dtos::UploadPhotoDto,
            photos_dtos::PhotoResponseDto,
            photos_dtos::DeletePhotoByUrlDto,
            photos_dtos::DeletePhotoResponseDto,
            ApiResponse<photos_dtos::PhotoResponseDto>,
            ApiResponse<photos_dtos::DeletePhotoResponseDto>,
            // Places
            places_dtos::PlaceSummaryDto,
            places_dtos::PredictionDto,
            places_dtos::PlaceDetailsDto,
            ApiResponse<Vec<places_dtos::PlaceSummaryDto>>,
            ApiResponse<Vec<places_dtos::PredictionDto>>,
            ApiResponse<places_dtos::PlaceDetailsDto>,
        )
    ),
    tags(
        (name = "trips", description = "Travel trip management"),
        (name = "checkins", description = "Geotagged check-ins and trip paths"),
        (name = "photos", description = "Photo upload with EXIF extraction"),
        (name = "places", description = "Place search proxy"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Tripmark API",
        version = "0.1.0",
        description = "API documentation for Tripmark",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
