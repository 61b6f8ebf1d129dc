//! State Management
//!
//! Event dispatch, browser timers and persisted configuration.

pub mod config;
pub mod dispatcher;
pub mod timers;

pub use config::load_config;
pub use dispatcher::Dispatcher;
pub use timers::GlooScheduler;
