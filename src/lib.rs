pub mod app;
pub mod board;
pub mod logging;
pub mod settings;
