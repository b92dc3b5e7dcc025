use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::{
    config::Config,
    models::OnboardOutcome,
    services::{PreferenceAnswers, TerminalPrompt, UserStore},
};

#[derive(Parser, Debug)]
#[command(name = "movierec")]
#[command(about = "Register movie fans and hand out recommendations")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "CSV file to bulk-load users from")]
    pub source: Option<PathBuf>,

    #[arg(long, global = true, help = "CSV file new users are appended to")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Register a new user and collect their preferences.")]
    Onboard(OnboardArgs),

    #[command(about = "Print movie recommendations for a user.")]
    Recommend {
        #[arg(help = "User id")]
        user_id: String,
        #[arg(long, help = "Output as a JSON array")]
        json: bool,
    },

    #[command(about = "Check whether a user id is registered.")]
    Check {
        #[arg(help = "User id")]
        user_id: String,
    },
}

#[derive(Args, Debug)]
pub struct OnboardArgs {
    #[arg(help = "User id to register")]
    pub user_id: String,
    #[arg(long, help = "Comma-separated genre numbers (1-8)")]
    pub genres: Option<String>,
    #[arg(long, help = "Comma-separated keywords")]
    pub keywords: Option<String>,
    #[arg(long, help = "Comma-separated favorite actors")]
    pub actors: Option<String>,
    #[arg(long, help = "Comma-separated favorite movies")]
    pub movies: Option<String>,
}

impl OnboardArgs {
    /// Answers given as flags; `None` means the user should be prompted
    pub fn answers(&self) -> Option<PreferenceAnswers> {
        let flags = [&self.genres, &self.keywords, &self.actors, &self.movies];
        if flags.iter().all(|f| f.is_none()) {
            return None;
        }

        Some(PreferenceAnswers {
            genres: self.genres.clone().unwrap_or_default(),
            keywords: self.keywords.clone().unwrap_or_default(),
            actors: self.actors.clone().unwrap_or_default(),
            movies: self.movies.clone().unwrap_or_default(),
        })
    }
}

/// Runs one command against a freshly loaded store
///
/// Prompts are read from `input` and everything user-facing goes to
/// `output`. Returns `Ok(false)` when the command found nothing to act on.
pub fn run<R: BufRead, W: Write>(
    cli: Cli,
    config: &Config,
    input: R,
    mut output: W,
) -> Result<bool> {
    let source = cli.source.unwrap_or_else(|| config.users_source.clone());
    let store_path = cli.store.unwrap_or_else(|| config.users_store.clone());

    let mut store = UserStore::new(store_path);
    if let Err(e) = store.load(&source) {
        tracing::warn!(error = %e, loaded = store.len(), "Continuing with partially loaded users");
    }

    match cli.command {
        Commands::Onboard(args) => {
            let outcome = match args.answers() {
                Some(mut answers) => store.onboard(&args.user_id, &mut answers),
                None => {
                    let mut prompt = TerminalPrompt::new(input, &mut output);
                    store.onboard(&args.user_id, &mut prompt)
                }
            }
            .with_context(|| format!("Failed to onboard {}", args.user_id))?;

            match outcome {
                OnboardOutcome::Welcome => writeln!(output, "Welcome, {}!", args.user_id)?,
                OnboardOutcome::Registered { tags } => {
                    writeln!(output, "Registered {} with tags: {}", args.user_id, tags)?
                }
            }
            Ok(true)
        }
        Commands::Recommend { user_id, json } => {
            let titles = store.get_recommendations(&user_id);
            if json {
                writeln!(output, "{}", serde_json::to_string(&titles)?)?;
            } else {
                for title in &titles {
                    writeln!(output, "{}", title)?;
                }
            }
            Ok(!titles.is_empty())
        }
        Commands::Check { user_id } => {
            let known = store.authenticate(&user_id);
            let status = if known { "known" } else { "unknown" };
            writeln!(output, "{}: {}", user_id, status)?;
            Ok(known)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_none_without_flags() {
        let cli = Cli::try_parse_from(["movierec", "onboard", "u1"]).unwrap();
        let Commands::Onboard(args) = cli.command else {
            panic!("expected onboard");
        };
        assert_eq!(args.answers(), None);
    }

    #[test]
    fn test_answers_fill_missing_flags_with_empty() {
        let cli =
            Cli::try_parse_from(["movierec", "onboard", "u1", "--genres", "1,2"]).unwrap();
        let Commands::Onboard(args) = cli.command else {
            panic!("expected onboard");
        };
        assert_eq!(
            args.answers(),
            Some(PreferenceAnswers {
                genres: "1,2".to_string(),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_global_paths_after_subcommand() {
        let cli = Cli::try_parse_from([
            "movierec",
            "check",
            "u1",
            "--source",
            "in.csv",
            "--store",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(cli.source, Some(PathBuf::from("in.csv")));
        assert_eq!(cli.store, Some(PathBuf::from("out.csv")));
    }
}
