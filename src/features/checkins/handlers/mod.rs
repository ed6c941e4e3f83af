pub mod checkin_handler;

pub use checkin_handler::*;
