//! Check-ins feature for geotagged stops along a trip.
//!
//! A check-in records where the traveler was, optionally with a photo,
//! a message, and a category. Check-ins belong to a trip and inherit
//! its ownership. The path endpoint returns the trip's check-ins in
//! chronological order together with the total distance traveled.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/checkins?tripId=` | Yes | List a trip's check-ins |
//! | POST | `/api/checkins` | Yes | Create a check-in |
//! | PATCH | `/api/checkins/{id}` | Yes | Partially update a check-in |
//! | DELETE | `/api/checkins/{id}` | Yes | Delete a check-in |
//! | GET | `/api/checkins/distance` | Yes | Distance between two coordinates |
//! | GET | `/api/trips/{id}/path` | Yes | Ordered trip path with total distance |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CheckinService;
