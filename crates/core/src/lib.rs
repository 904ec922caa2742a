pub mod chunk;
pub mod config;
pub mod document;
pub mod entity;
pub mod error;

pub use chunk::*;
pub use config::ChunkConfig;
pub use document::*;
pub use entity::*;
pub use error::*;
