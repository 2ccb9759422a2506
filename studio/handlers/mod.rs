pub mod config;
pub mod session;
pub mod train;
pub mod train_sse;
