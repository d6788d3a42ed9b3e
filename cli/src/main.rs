//! CLI entrypoint for the movie randomizer
//!
//! Wires the layers together with dependency injection: Supabase adapters
//! and the TMDB lookup from infrastructure, the session cache and
//! coordinators from the application layer.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use randomizer_application::{
    ListsUseCase, MoviesUseCase, RandomPicker, SearchConfig, SearchCoordinator, SessionCache,
    SuggestionSelection,
};
use randomizer_domain::Suggestion;
use randomizer_infrastructure::{
    ConfigLoader, CredentialStore, FileConfig, SupabaseAuth, SupabaseStore, TmdbSearch,
};
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movie-randomizer", version, about = "Shared movie list with a random picker")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Email yourself a magic login link
    Login {
        email: String,
        /// Where the link should redirect (the URL you paste back)
        #[arg(long, default_value = "http://localhost:4200")]
        redirect: String,
    },
    /// Finish login by pasting the full redirect URL from the email link
    Complete { redirect_url: String },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is currently logged in
    Whoami,
    /// Show your lists
    Lists,
    /// Create a list (prints its share code for inviting)
    Create { name: String },
    /// Join a list with a share code
    Join { code: String },
    /// Show the movies in a list
    Movies { list_id: String },
    /// Add a movie to a list
    Add {
        list_id: String,
        title: String,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Flip a movie between watched and pending
    Toggle { list_id: String, movie_id: String },
    /// Remove a movie
    Rm { movie_id: String },
    /// Pick a random unwatched movie
    Pick {
        list_id: String,
        /// Mark the pick as watched right away
        #[arg(long)]
        watch: bool,
    },
    /// Interactive title autocomplete (type to search, `:N` to select, `:q` to quit)
    Suggest,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref())?;
    config.validate()?;

    // === Dependency Injection ===
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build HTTP client")?;
    let credentials = Arc::new(CredentialStore::new(
        CredentialStore::default_path().context("no config directory available")?,
    ));
    let auth = Arc::new(SupabaseAuth::new(
        http.clone(),
        config.supabase.url.as_str(),
        config.supabase.anon_key.as_str(),
        credentials.clone(),
    ));
    let sessions = Arc::new(SessionCache::new(auth.clone()));
    let store = Arc::new(SupabaseStore::new(
        http.clone(),
        config.supabase.url.as_str(),
        config.supabase.anon_key.as_str(),
        credentials,
    ));
    let lists = ListsUseCase::new(store.clone());
    let movies = MoviesUseCase::new(sessions.clone(), store.clone());
    let picker = RandomPicker::new(store);

    match cli.command {
        Command::Login { email, redirect } => {
            let email = email.trim().to_lowercase();
            sessions.send_magic_link(&email, &redirect).await?;
            println!("Magic link sent to {email}. Check your inbox (and spam).");
            println!("Open the link, then run: movie-randomizer complete \"<redirect url>\"");
        }
        Command::Complete { redirect_url } => {
            let session = auth.complete_login(&redirect_url).await?;
            println!("Logged in as {}.", session.email());
        }
        Command::Logout => {
            sessions.sign_out().await?;
            println!("Signed out.");
        }
        Command::Whoami => match sessions.load_session().await {
            Some(session) => println!("{} ({})", session.email(), session.user_id()),
            None => println!("Not logged in."),
        },
        Command::Lists => {
            require_login(&sessions).await?;
            let rows = lists.my_lists().await?;
            if rows.is_empty() {
                println!("No lists yet. Create one or join with a code.");
            }
            for list in rows {
                println!("{}  {}  (code: {})", list.id, list.name, list.share_code);
            }
        }
        Command::Create { name } => {
            require_login(&sessions).await?;
            let id = lists.create_list(&name).await?;
            println!("Created list {id}.");
        }
        Command::Join { code } => {
            require_login(&sessions).await?;
            let id = lists.join_by_code(&code).await?;
            println!("Joined list {id}.");
        }
        Command::Movies { list_id } => {
            require_login(&sessions).await?;
            let rows = movies.list_movies(&list_id).await?;
            let pending = rows.iter().filter(|m| !m.watched).count();
            for movie in &rows {
                let mark = if movie.watched { "x" } else { " " };
                let year = movie
                    .year
                    .map(|y| format!(" ({y})"))
                    .unwrap_or_default();
                println!("[{mark}] {}  {}{year}", movie.id, movie.title);
            }
            println!("{pending} pending, {} watched", rows.len() - pending);
        }
        Command::Add {
            list_id,
            title,
            year,
        } => {
            require_login(&sessions).await?;
            let movie = movies.add_movie(&list_id, &title, year).await?;
            println!("Added \"{}\".", movie.title);
        }
        Command::Toggle { list_id, movie_id } => {
            require_login(&sessions).await?;
            let rows = movies.list_movies(&list_id).await?;
            let Some(movie) = rows.iter().find(|m| m.id == movie_id) else {
                bail!("No movie {movie_id} in list {list_id}");
            };
            movies.toggle_watched(movie).await?;
            let state = if movie.watched { "pending" } else { "watched" };
            println!("\"{}\" is now {state}.", movie.title);
        }
        Command::Rm { movie_id } => {
            require_login(&sessions).await?;
            movies.remove_movie(&movie_id).await?;
            println!("Removed.");
        }
        Command::Pick { list_id, watch } => {
            require_login(&sessions).await?;
            match picker.pick_random_unwatched(&list_id).await? {
                None => println!("Nothing pending. Congrats, the backlog is done."),
                Some(movie) => {
                    let year = movie
                        .year
                        .map(|y| format!(" ({y})"))
                        .unwrap_or_default();
                    println!("Tonight: {}{year}", movie.title);
                    if watch {
                        picker.mark_picked_watched(&movie).await?;
                        println!("Marked watched.");
                    }
                }
            }
        }
        Command::Suggest => {
            let tmdb = Arc::new(TmdbSearch::new(
                http,
                config.tmdb.api_key.as_str(),
                config.tmdb.language.as_str(),
            ));
            run_suggest(tmdb, &config).await?;
        }
    }

    Ok(())
}

/// Route-guard analogue: protected commands print a login hint instead of
/// running
async fn require_login(sessions: &SessionCache) -> Result<()> {
    if sessions.is_logged_in().await {
        Ok(())
    } else {
        bail!("Not logged in. Run `movie-randomizer login <email>` first.")
    }
}

/// Interactive autocomplete loop: every typed line goes through the
/// coordinator; selecting with `:N` shows the form fields a UI would fill.
async fn run_suggest(
    tmdb: Arc<TmdbSearch>,
    config: &FileConfig,
) -> Result<()> {
    info!("starting interactive suggestion mode");
    let coordinator = SearchCoordinator::spawn(tmdb, SearchConfig::from(&config.search));

    let visible: Arc<Mutex<Vec<Suggestion>>> = Arc::new(Mutex::new(Vec::new()));
    let mut updates = coordinator.subscribe();
    let printer_visible = visible.clone();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let suggestions = updates.borrow_and_update().clone();
            if suggestions.is_empty() {
                println!("  (no suggestions)");
            } else {
                for (i, s) in suggestions.iter().enumerate() {
                    let year = s
                        .release_year()
                        .map(|y| format!(" ({y})"))
                        .unwrap_or_default();
                    println!("  :{}  {}{year}", i + 1, s.title);
                }
            }
            *printer_visible.lock().expect("suggestion list lock poisoned") = suggestions;
        }
    });

    println!("Type to search, :N to select a suggestion, :q to quit.");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line == ":q" {
            break;
        }
        if let Some(index) = line
            .strip_prefix(':')
            .and_then(|n| n.parse::<usize>().ok())
        {
            let picked = {
                let list = visible.lock().expect("suggestion list lock poisoned");
                index
                    .checked_sub(1)
                    .and_then(|i| list.get(i).cloned())
            };
            match picked {
                Some(suggestion) => {
                    let selection = SuggestionSelection::from(&suggestion);
                    let year = selection
                        .year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("Selected: title={}  year={year}", selection.title);
                    coordinator.clear_suggestions();
                }
                None => println!("No suggestion :{index}"),
            }
            continue;
        }
        coordinator.submit(line);
    }

    coordinator.shutdown();
    printer.abort();
    Ok(())
}
