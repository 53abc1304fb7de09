mod memory_repository;
mod redis_repository;


// Re-export the factory functions for easy access
pub use memory_repository::create as create_memory_repository;
pub use redis_repository::create as create_redis_repository;
