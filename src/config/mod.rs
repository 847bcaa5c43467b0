pub mod settings;

pub use settings::{AppConfig, GeneratorConfig, LogFormat};
