// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod cwa_mapper;
pub mod cwa_repository;
pub mod http_response;
