//! Places feature proxying the Google Places API.
//!
//! The proxy keeps the API key server-side and trims responses down to
//! the fields the check-in form needs.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/places/nearby` | Yes | Places near a coordinate |
//! | GET | `/api/places/autocomplete` | Yes | Place name predictions |
//! | GET | `/api/places/details` | Yes | Details of a single place |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::PlaceService;
