pub mod code;
pub mod health_route;
pub mod languages_route;
