//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ApiScout - query public REST APIs from the command line
///
/// Employee todo reports and file exports backed by JSONPlaceholder,
/// subscriber counts and hot-post analytics backed by Reddit.
///
/// Examples:
///   apiscout todo summary 2
///   apiscout todo export-csv 2
///   apiscout todo export-all --out-dir exports
///   apiscout reddit subscribers programming
///   apiscout reddit titles rust
///   apiscout reddit count rust go async await
///   apiscout init-config
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no progress indicators)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .apiscout.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// User-Agent header sent to the APIs
    #[arg(long, global = true, env = "APISCOUT_USER_AGENT", value_name = "UA")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Directory exported files are written into
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Employee todo reports backed by JSONPlaceholder
    #[command(subcommand)]
    Todo(TodoCommand),

    /// Subreddit queries backed by the Reddit listing API
    #[command(subcommand)]
    Reddit(RedditCommand),

    /// Generate a default .apiscout.toml configuration file
    InitConfig,
}

/// JSONPlaceholder commands.
#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Print an employee's completed-task summary
    Summary {
        /// Employee id (JSONPlaceholder user id)
        employee_id: u64,
    },

    /// Export one employee's todos to <ID>.csv
    ExportCsv {
        /// Employee id (JSONPlaceholder user id)
        employee_id: u64,
    },

    /// Export one employee's todos to <ID>.json
    ExportJson {
        /// Employee id (JSONPlaceholder user id)
        employee_id: u64,
    },

    /// Export every employee's todos to todo_all_employees.json
    ExportAll,
}

/// Reddit commands.
#[derive(Subcommand, Debug)]
pub enum RedditCommand {
    /// Print the subscriber count of a subreddit (0 if it does not exist)
    Subscribers {
        /// Subreddit name, without the r/ prefix
        subreddit: String,
    },

    /// Print the titles of the first hot posts
    Top {
        /// Subreddit name, without the r/ prefix
        subreddit: String,

        /// How many titles to print
        #[arg(long, value_name = "N")]
        limit: Option<u32>,
    },

    /// Print every hot post title, following pagination to the end
    Titles {
        /// Subreddit name, without the r/ prefix
        subreddit: String,
    },

    /// Count keyword occurrences across all hot post titles
    Count {
        /// Subreddit name, without the r/ prefix
        subreddit: String,

        /// Words to tally (case-insensitive, exact token match)
        #[arg(required = true)]
        words: Vec<String>,
    },
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        match &self.command {
            Command::Todo(command) => validate_todo(command),
            Command::Reddit(command) => validate_reddit(command),
            Command::InitConfig => Ok(()),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

fn validate_todo(command: &TodoCommand) -> Result<(), String> {
    let employee_id = match command {
        TodoCommand::Summary { employee_id }
        | TodoCommand::ExportCsv { employee_id }
        | TodoCommand::ExportJson { employee_id } => *employee_id,
        TodoCommand::ExportAll => return Ok(()),
    };

    if employee_id == 0 {
        return Err("Employee id must be a positive integer".to_string());
    }

    Ok(())
}

fn validate_reddit(command: &RedditCommand) -> Result<(), String> {
    let subreddit = match command {
        RedditCommand::Subscribers { subreddit }
        | RedditCommand::Top { subreddit, .. }
        | RedditCommand::Titles { subreddit }
        | RedditCommand::Count { subreddit, .. } => subreddit,
    };

    if subreddit.is_empty() {
        return Err("Subreddit name must not be empty".to_string());
    }

    if subreddit.contains('/') || subreddit.chars().any(char::is_whitespace) {
        return Err(format!(
            "Subreddit must be a bare name like 'rust', got '{}'",
            subreddit
        ));
    }

    if let RedditCommand::Top { limit: Some(0), .. } = command {
        return Err("Limit must be at least 1".to_string());
    }

    if let RedditCommand::Count { words, .. } = command {
        if words.iter().any(|word| word.trim().is_empty()) {
            return Err("Words must not be empty".to_string());
        }
    }

    Ok(())
}
