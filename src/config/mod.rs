pub mod model;

pub use model::{ConfigError, ControllerConfig, EventsConfig};
