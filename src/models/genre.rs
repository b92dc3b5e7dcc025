use std::fmt::Display;

/// Movie genres offered during onboarding, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Mystery,
    Romance,
    Thriller,
}

impl Genre {
    /// Every genre in the order it is presented to the user
    pub const ALL: [Genre; 8] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Mystery,
        Genre::Romance,
        Genre::Thriller,
    ];

    /// Looks up a genre by its 1-based menu position
    pub fn from_index(index: usize) -> Option<Genre> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_is_one_based() {
        assert_eq!(Genre::from_index(1), Some(Genre::Action));
        assert_eq!(Genre::from_index(3), Some(Genre::Drama));
        assert_eq!(Genre::from_index(8), Some(Genre::Thriller));
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(Genre::from_index(0), None);
        assert_eq!(Genre::from_index(9), None);
        assert_eq!(Genre::from_index(usize::MAX), None);
    }

    #[test]
    fn test_display_matches_name() {
        let names: Vec<String> = Genre::ALL.iter().map(|g| g.to_string()).collect();
        assert_eq!(
            names,
            vec!["Action", "Comedy", "Drama", "Fantasy", "Horror", "Mystery", "Romance", "Thriller"]
        );
    }
}
