pub mod genre;
pub mod user;

pub use genre::Genre;
pub use user::{AddOutcome, LoadOutcome, OnboardOutcome, PersistedUser, User};
