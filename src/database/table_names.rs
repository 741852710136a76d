pub const SEQUENCE_TABLE_NAME: &'static str = "sequence";
pub const POST_LIKES_CACHE_TABLE_NAME: &'static str = "post_likes";
