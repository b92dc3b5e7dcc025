pub mod preferences;
pub mod recommendations;
pub mod user_store;

pub use preferences::{PreferenceAnswers, PreferenceSource, TerminalPrompt};
pub use user_store::UserStore;
