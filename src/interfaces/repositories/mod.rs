pub mod like;
pub mod post;
