pub mod trip_dto;

pub use trip_dto::*;
