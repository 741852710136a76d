pub mod cache;
pub mod keyed_lock;
