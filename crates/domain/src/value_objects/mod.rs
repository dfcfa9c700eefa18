//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod departure_time;
mod result_limit;

pub use coordinate::{
    Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE, is_valid_latitude, is_valid_longitude,
};
pub use departure_time::DepartureTime;
pub use result_limit::ResultLimit;
