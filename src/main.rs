//! ApiScout - command-line client for JSONPlaceholder and Reddit
//!
//! A CLI tool that queries two public REST APIs: employee todo
//! reports and file exports from JSONPlaceholder, subscriber counts
//! and hot-post keyword analytics from Reddit.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, write failure, etc.)
//!   2 - Resource not found (unknown employee id or subreddit)

mod cli;
mod config;
mod error;
mod export;
mod http;
mod models;
mod reddit;
mod todos;

use anyhow::{Context, Result};
use cli::{Args, Command, RedditCommand, TodoCommand};
use config::Config;
use error::ApiError;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Todo, User};
use reddit::RedditClient;
use std::path::Path;
use std::time::Duration;
use todos::{TaskSummary, TodoClient};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    debug!("ApiScout v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the requested command
    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .apiscout.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".apiscout.toml");

    if path.exists() {
        eprintln!("⚠️  .apiscout.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .apiscout.toml")?;

    println!("✅ Created .apiscout.toml with default settings.");
    println!("   Edit it to customize endpoints, the User-Agent, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the report output on stdout stays pipeable.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the requested subcommand. Returns the process exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    match &args.command {
        Command::Todo(command) => run_todo(command, &config, args.quiet).await,
        Command::Reddit(command) => run_reddit(command, &config, args.quiet).await,
        // Already handled before logging was initialized.
        Command::InitConfig => Ok(0),
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .apiscout.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Dispatch the JSONPlaceholder commands.
async fn run_todo(command: &TodoCommand, config: &Config, quiet: bool) -> Result<i32> {
    let client =
        TodoClient::new(&config.todos, &config.http).context("Failed to build HTTP client")?;
    let out_dir = Path::new(&config.output.directory);

    match command {
        TodoCommand::Summary { employee_id } => {
            let (user, todos) = match fetch_employee(&client, *employee_id).await {
                Ok(pair) => pair,
                Err(e) => return not_found_or_fail(e),
            };

            println!("{}", TaskSummary::build(&user, &todos).render());
            Ok(0)
        }
        TodoCommand::ExportCsv { employee_id } => {
            let (user, todos) = match fetch_employee(&client, *employee_id).await {
                Ok(pair) => pair,
                Err(e) => return not_found_or_fail(e),
            };

            let path = export::write_user_csv(out_dir, &user, &todos)?;
            println!("✅ Exported {} tasks to {}", todos.len(), path.display());
            Ok(0)
        }
        TodoCommand::ExportJson { employee_id } => {
            let (user, todos) = match fetch_employee(&client, *employee_id).await {
                Ok(pair) => pair,
                Err(e) => return not_found_or_fail(e),
            };

            let path = export::write_user_json(out_dir, &user, &todos)?;
            println!("✅ Exported {} tasks to {}", todos.len(), path.display());
            Ok(0)
        }
        TodoCommand::ExportAll => export_all(&client, out_dir, quiet).await,
    }
}

/// Fetch a user together with their todos.
///
/// The user lookup runs first because it is the call that distinguishes an
/// unknown id (404) from an id that simply has no todos.
async fn fetch_employee(client: &TodoClient, id: u64) -> Result<(User, Vec<Todo>), ApiError> {
    let user = client.fetch_user(id).await?;
    let todos = client.fetch_todos(id).await?;
    Ok((user, todos))
}

/// Fetch every employee's todos one at a time and write the combined export.
async fn export_all(client: &TodoClient, out_dir: &Path, quiet: bool) -> Result<i32> {
    let users = match client.fetch_users().await {
        Ok(users) => users,
        Err(e) => return not_found_or_fail(e),
    };
    info!("Exporting todos for {} employees", users.len());

    let progress_bar = if quiet {
        None
    } else {
        let pb = ProgressBar::new(users.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let mut entries = Vec::with_capacity(users.len());
    for user in users {
        let todos = match client.fetch_todos(user.id).await {
            Ok(todos) => todos,
            Err(e) => {
                if let Some(ref pb) = progress_bar {
                    pb.finish_and_clear();
                }
                return not_found_or_fail(e);
            }
        };

        entries.push((user, todos));
        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("All todos fetched");
    }

    let path = export::write_all_users_json(out_dir, &entries)?;
    println!("✅ Exported {} employees to {}", entries.len(), path.display());
    Ok(0)
}

/// Dispatch the Reddit commands.
async fn run_reddit(command: &RedditCommand, config: &Config, quiet: bool) -> Result<i32> {
    let client =
        RedditClient::new(&config.reddit, &config.http).context("Failed to build HTTP client")?;

    match command {
        RedditCommand::Subscribers { subreddit } => {
            // Unknown subreddits print 0 rather than fail; existence checks
            // belong to the other subcommands.
            match client.subscribers(subreddit).await {
                Ok(count) => {
                    println!("{}", count);
                    Ok(0)
                }
                Err(e) if e.is_not_found() => {
                    debug!("r/{} not found: {}", subreddit, e);
                    println!("0");
                    Ok(0)
                }
                Err(e) => Err(e.into()),
            }
        }
        RedditCommand::Top { subreddit, limit } => {
            let limit = limit.unwrap_or(config.reddit.top_limit);
            let titles = match reddit::top_titles(&client, subreddit, limit).await {
                Ok(titles) => titles,
                Err(e) => return not_found_or_fail(e),
            };

            for title in &titles {
                println!("{}", title);
            }
            Ok(0)
        }
        RedditCommand::Titles { subreddit } => {
            let fetch = reddit::collect_titles(&client, subreddit);
            let titles = match with_spinner(quiet, subreddit, fetch).await {
                Ok(titles) => titles,
                Err(e) => return not_found_or_fail(e),
            };

            info!("Fetched {} hot posts from r/{}", titles.len(), subreddit);
            for title in &titles {
                println!("{}", title);
            }
            Ok(0)
        }
        RedditCommand::Count { subreddit, words } => {
            let fetch = reddit::count_words(&client, subreddit, words);
            let counts = match with_spinner(quiet, subreddit, fetch).await {
                Ok(counts) => counts,
                Err(e) => return not_found_or_fail(e),
            };

            if counts.is_empty() {
                info!("No matches for the given words in r/{}", subreddit);
            }
            for (word, count) in &counts {
                println!("{}: {}", word, count);
            }
            Ok(0)
        }
    }
}

/// Run a pagination future behind a spinner, unless quiet.
async fn with_spinner<T>(
    quiet: bool,
    subreddit: &str,
    fut: impl std::future::Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Fetching hot posts from r/{}...", subreddit));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = fut.await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

/// Map a not-found API error to exit code 2; anything else is fatal.
fn not_found_or_fail(e: ApiError) -> Result<i32> {
    if e.is_not_found() {
        eprintln!("❌ {}", e);
        return Ok(2);
    }
    Err(e.into())
}
