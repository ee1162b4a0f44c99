// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod http_data_source;
pub mod http_response;
pub mod virtual_dom;
