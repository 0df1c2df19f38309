pub mod config;
pub mod context;
pub mod create;
pub mod metadata;
pub mod token;
