use std::io::{self, BufRead, Write};

use crate::models::Genre;

/// Source of a user's onboarding answers
///
/// Every answer is a raw comma-separated string; parsing happens in
/// [`build_tags`]. Implementations decide how the text is gathered.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceSource {
    /// Comma-separated 1-based indices into `genres`
    fn genre_selection(&mut self, genres: &[Genre]) -> io::Result<String>;

    /// Comma-separated free-form keywords
    fn keywords(&mut self) -> io::Result<String>;

    /// Comma-separated actor names, may be empty
    fn favorite_actors(&mut self) -> io::Result<String>;

    /// Comma-separated movie titles, may be empty
    fn favorite_movies(&mut self) -> io::Result<String>;
}

/// The four raw answers collected during onboarding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceAnswers {
    pub genres: String,
    pub keywords: String,
    pub actors: String,
    pub movies: String,
}

impl PreferenceAnswers {
    /// Pulls all four answers from a source, in prompt order
    pub fn collect(source: &mut dyn PreferenceSource) -> io::Result<Self> {
        Ok(Self {
            genres: source.genre_selection(&Genre::ALL)?,
            keywords: source.keywords()?,
            actors: source.favorite_actors()?,
            movies: source.favorite_movies()?,
        })
    }

    /// Builds the user's tag string from these answers
    pub fn to_tags(&self) -> String {
        build_tags(&self.genres, &self.keywords, &self.actors, &self.movies)
    }
}

/// Fixed answers act as their own source
impl PreferenceSource for PreferenceAnswers {
    fn genre_selection(&mut self, _genres: &[Genre]) -> io::Result<String> {
        Ok(self.genres.clone())
    }

    fn keywords(&mut self) -> io::Result<String> {
        Ok(self.keywords.clone())
    }

    fn favorite_actors(&mut self) -> io::Result<String> {
        Ok(self.actors.clone())
    }

    fn favorite_movies(&mut self) -> io::Result<String> {
        Ok(self.movies.clone())
    }
}

/// Interactive source that prints prompts and reads one line per answer
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        Ok(answer.strip_suffix('\r').unwrap_or(answer).to_string())
    }
}

impl<R: BufRead, W: Write> PreferenceSource for TerminalPrompt<R, W> {
    fn genre_selection(&mut self, genres: &[Genre]) -> io::Result<String> {
        writeln!(
            self.output,
            "Please select your favorite genres from the list below:"
        )?;
        for (i, genre) in genres.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, genre)?;
        }
        self.ask("Enter the numbers of your favorite genres, separated by commas: ")
    }

    fn keywords(&mut self) -> io::Result<String> {
        writeln!(
            self.output,
            "Please provide some additional information to improve recommendations."
        )?;
        self.ask("Enter a few keywords related to your favorite genres, separated by commas: ")
    }

    fn favorite_actors(&mut self) -> io::Result<String> {
        self.ask("Enter the names of your favorite actors, separated by commas (optional): ")
    }

    fn favorite_movies(&mut self) -> io::Result<String> {
        self.ask("Enter the names of your favorite movies, separated by commas (optional): ")
    }
}

/// Maps comma-separated 1-based indices to genres
///
/// Tokens that are not plain digits, or that fall outside the menu, are
/// dropped without complaint. Tokens are not trimmed, so `" 3"` counts as
/// non-numeric. Repeated indices are kept.
pub fn parse_genre_selection(input: &str) -> Vec<Genre> {
    input
        .split(',')
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .filter_map(Genre::from_index)
        .collect()
}

/// Splits keywords on commas and trims each one; empty entries stay
pub fn parse_keywords(input: &str) -> Vec<String> {
    input.split(',').map(|k| k.trim().to_string()).collect()
}

/// Splits names on commas, skips blanks and removes all whitespace
///
/// "Tom Hanks" becomes "TomHanks".
pub fn parse_compact_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.chars().filter(|c| !c.is_whitespace()).collect())
        .collect()
}

/// Concatenates genres, keywords, actors and movies into one tag string
pub fn build_tags(genres: &str, keywords: &str, actors: &str, movies: &str) -> String {
    let tags: Vec<String> = parse_genre_selection(genres)
        .into_iter()
        .map(|g| g.name().to_string())
        .chain(parse_keywords(keywords))
        .chain(parse_compact_names(actors))
        .chain(parse_compact_names(movies))
        .collect();

    tags.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_genre_selection_drops_invalid_tokens() {
        assert_eq!(
            parse_genre_selection("1,3,99,x"),
            vec![Genre::Action, Genre::Drama]
        );
    }

    #[test]
    fn test_genre_selection_keeps_duplicates() {
        assert_eq!(
            parse_genre_selection("2,2,8"),
            vec![Genre::Comedy, Genre::Comedy, Genre::Thriller]
        );
    }

    #[test]
    fn test_genre_selection_padded_tokens_are_not_numeric() {
        assert_eq!(parse_genre_selection("1, 3"), vec![Genre::Action]);
        assert_eq!(parse_genre_selection(" 2,4 ,5"), vec![Genre::Horror]);
        assert_eq!(build_tags("1, 3", "", "", ""), "Action ");
    }

    #[test]
    fn test_genre_selection_rejects_signs_and_zero() {
        assert!(parse_genre_selection("0,-1,+2,1.5,").is_empty());
        assert!(parse_genre_selection("99999999999999999999999").is_empty());
    }

    #[test]
    fn test_keywords_keep_empty_entries() {
        assert_eq!(parse_keywords("sci-fi, space"), vec!["sci-fi", "space"]);
        assert_eq!(parse_keywords(""), vec![""]);
        assert_eq!(parse_keywords("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_compact_names_strip_whitespace_and_blanks() {
        assert_eq!(
            parse_compact_names("Tom Hanks,  , Meryl  Streep"),
            vec!["TomHanks", "MerylStreep"]
        );
        assert!(parse_compact_names("").is_empty());
    }

    #[test]
    fn test_build_tags_full_example() {
        let tags = build_tags("1,3,99,x", "sci-fi, space", "Tom Hanks", "");
        assert_eq!(tags, "Action Drama sci-fi space TomHanks");
    }

    #[test]
    fn test_build_tags_empty_keywords_leave_gap() {
        let tags = build_tags("1", "", "", "The Matrix");
        assert_eq!(tags, "Action  TheMatrix");
    }

    #[test]
    fn test_collect_asks_in_order() {
        let mut source = MockPreferenceSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_genre_selection()
            .withf(|genres| genres.len() == 8)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("4".to_string()));
        source
            .expect_keywords()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("dragons".to_string()));
        source
            .expect_favorite_actors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(String::new()));
        source
            .expect_favorite_movies()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("Lord of the Rings".to_string()));

        let answers = PreferenceAnswers::collect(&mut source).unwrap();
        assert_eq!(answers.to_tags(), "Fantasy dragons LordoftheRings");
    }

    #[test]
    fn test_terminal_prompt_reads_lines() {
        let input = Cursor::new("1,2\r\nspace\nTom Hanks\n");
        let mut output = Vec::new();
        let answers = {
            let mut prompt = TerminalPrompt::new(input, &mut output);
            PreferenceAnswers::collect(&mut prompt).unwrap()
        };

        assert_eq!(
            answers,
            PreferenceAnswers {
                genres: "1,2".to_string(),
                keywords: "space".to_string(),
                actors: "Tom Hanks".to_string(),
                movies: String::new(),
            }
        );

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("1. Action"));
        assert!(shown.contains("8. Thriller"));
        assert!(shown.contains("favorite movies"));
    }
}
