pub mod config;
pub mod errors;
pub mod executor;
pub mod import;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod storage;
pub mod translator;
