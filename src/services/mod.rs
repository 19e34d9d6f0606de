// Jobflow services
// Services talk to the backend or compute derived values: API access, query building, images, settings.

pub mod api_client;
pub mod image_service;
pub mod query_builder;
pub mod settings_engine;
