pub mod trip;

pub use trip::Trip;
