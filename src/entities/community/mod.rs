pub mod like_entity;
pub mod post_entity;
