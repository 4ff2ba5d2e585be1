//! 相册存储
//!
//! 内存中的相册与媒体排序，服务端是排序的唯一权威

mod album;
pub mod seed;

pub use album::AlbumStore;
pub use seed::{SeedAlbum, SeedFile, SeedMedia};
