pub mod config_service;
pub mod dto;
pub mod json_brainstorm_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_brainstorm_repository::JsonFileBrainstormRepository;
pub use crate::paths::BrainstormPaths;
pub use crate::storage::BrainstormStore;
