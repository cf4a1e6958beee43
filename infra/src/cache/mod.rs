//! Cache module for Redis-backed storage
//!
//! Provides the Redis client with connection retry and the single-use
//! quick action token store built on it.

pub mod action_token_store;
pub mod redis_client;


pub use action_token_store::RedisActionTokenStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use av_shared::config::CacheConfig;
