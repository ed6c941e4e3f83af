pub mod checkin;

pub use checkin::Checkin;
