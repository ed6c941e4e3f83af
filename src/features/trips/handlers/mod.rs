pub mod trip_handler;

pub use trip_handler::*;
