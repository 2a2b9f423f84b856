pub mod code_request;
pub mod code_route;
