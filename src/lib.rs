pub mod cameras;
pub mod client_registry;
pub mod config;
pub mod errors;
pub mod generator;
pub mod materializer;
pub mod models;
pub mod path_analyzer;
pub mod path_resolver;
pub mod templates;
pub mod utils;
