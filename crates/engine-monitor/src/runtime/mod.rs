mod app;
mod config;
mod logging;
mod observer;
mod script;

pub use app::run_from_args;
