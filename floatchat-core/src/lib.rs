pub mod chat;
pub mod error;
pub mod export;
pub mod format;
pub mod location;
pub mod narrative;
pub mod pipeline;
pub mod seed;
pub mod synthesis;
