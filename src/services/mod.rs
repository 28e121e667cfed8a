pub mod question_selector;
pub mod settings_service;

pub use question_selector::QuestionSelector;
pub use settings_service::{Settings, SettingsService};
