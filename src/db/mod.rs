pub mod users_csv;

pub use users_csv::{append_user, open_users, UserRows, USER_ID_COLUMN};
