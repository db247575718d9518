// Adapters layer: concrete implementations of the directory, preference store and notification channel.

pub mod csv_preferences;
pub mod json_directory;
pub mod log_channel;
pub mod webhook;

pub use csv_preferences::{CsvPreferenceStore, InMemoryPreferenceStore};
pub use json_directory::JsonDirectory;
pub use log_channel::LogChannel;
pub use webhook::WebhookChannel;
