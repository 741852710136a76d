pub mod memory_map_cache;
pub mod redis_map_cache;
