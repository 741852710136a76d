pub mod post_helpers;
pub mod test_with_db;
