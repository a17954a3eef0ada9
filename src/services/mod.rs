pub mod model_gateway;
pub mod pipeline;
pub mod providers;
pub mod quiz_service;
