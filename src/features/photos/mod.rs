//! Photos feature for check-in photo uploads.
//!
//! Photos go straight to object storage; no database table is involved.
//! On upload the photo's EXIF metadata (GPS position, capture time,
//! camera info) is extracted and returned so the client can prefill the
//! check-in form.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/photos/upload` | Yes | Upload a photo, returns URL + EXIF metadata |
//! | DELETE | `/api/photos` | Yes | Delete an uploaded photo by URL |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::PhotoService;
