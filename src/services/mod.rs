pub mod pricing_service;
pub mod seat_map_service;
pub mod seat_selection_service;
pub mod timing_service;
pub mod trip_service;
