pub mod location;
pub mod raw;
pub mod route;
pub mod seat;
pub mod trip;
