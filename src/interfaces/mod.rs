pub mod map_cache;
pub mod repositories;
