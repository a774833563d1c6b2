mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CompletionMode, ExtractionSettings, LoggingSettings, ServerSettings, Settings,
    SettingsError, WatsonxSettings,
};
