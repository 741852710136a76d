pub mod like_flush;
