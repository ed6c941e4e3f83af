pub mod auth;
pub mod checkins;
pub mod photos;
pub mod places;
pub mod trips;
