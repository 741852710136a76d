pub mod like;
pub mod post;
pub mod post_likes_cache;
