pub mod settings;

pub use settings::{AppConfig, LearningSettings, PathSettings, ServerSettings};
