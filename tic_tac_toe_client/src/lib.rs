pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod game_app;
pub mod game_service;
pub mod view;

pub use controller::BoardController;
pub use dispatch::Dispatcher;
pub use error::{ConfigError, ServiceError};
