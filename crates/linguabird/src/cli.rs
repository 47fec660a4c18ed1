//! Command-line interface for linguabird.

use clap::{Parser, Subcommand};

/// LinguaBird - listen before you speak, understand before you translate
#[derive(Parser, Debug)]
#[command(name = "linguabird")]
#[command(about = "Gamified language lessons in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "linguabird.toml")]
    pub config: std::path::PathBuf,

    /// Override the profile database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Serve lessons from a JSON file instead of a language model
    #[arg(long, global = true)]
    pub lesson_file: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an interactive learning session
    Play,

    /// Print the stored learner profile
    Profile,

    /// Generate one lesson and print it as JSON
    Lesson {
        /// Language code (en, es, fr, de, it, ja)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Difficulty (facil, medio, dificil)
        #[arg(short, long, default_value = "facil")]
        difficulty: String,
    },

    /// List the available languages
    Languages,
}
