//! Trips feature for managing travel itineraries.
//!
//! A trip groups the check-ins a traveler records along the way. Trips
//! are owned by the authenticated user; `is_public` marks a trip as
//! shareable.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/trips` | Yes | List the user's trips |
//! | POST | `/api/trips` | Yes | Create a trip |
//! | GET | `/api/trips/{id}` | Yes | Get a trip by ID |
//! | PATCH | `/api/trips/{id}` | Yes | Partially update a trip |
//! | DELETE | `/api/trips/{id}` | Yes | Delete a trip and its check-ins |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::TripService;
