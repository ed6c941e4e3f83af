pub mod checkin_dto;

pub use checkin_dto::*;
