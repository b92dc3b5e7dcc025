use crate::models::User;

/// Generates movie recommendations for a known user
///
/// Placeholder: every user gets the same three titles regardless of
/// tags or history.
pub fn generate_recommendations(_user_id: &str, _user: &User) -> Vec<String> {
    // TODO: rank titles against the user's tags once a movie catalog is available
    vec![
        "Movie1".to_string(),
        "Movie2".to_string(),
        "Movie3".to_string(),
    ]
}
