mod actions;
mod api;
mod app;
mod config;
mod error;
mod form;
mod logging;
mod movie;
mod popover;
mod ui;

use actions::{Command, Dispatcher, Message};
use api::{HttpMovieApi, MovieApi};
use app::App;
use clap::{Args, Parser, Subcommand};
use config::Config;
use crossterm::event::{self, Event, KeyEventKind};
use error::AppError;
use movie::{Movie, MovieInput};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

/// Administer a REST movie catalog from the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the movie service
    #[arg(short, long, env = "MOVIE_ADMIN_URL", global = true)]
    url: Option<String>,

    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI (default)
    Tui,
    /// Print every movie
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print one movie
    Get {
        id: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a movie
    Add(MovieArgs),
    /// Replace the movie with the given id
    Update(MovieArgs),
    /// Delete the movie with the given id
    Delete { id: String },
}

/// Field values as typed; `id` and `imdb` are coerced like the form does.
#[derive(Args)]
struct MovieArgs {
    #[arg(long, default_value = "0")]
    id: String,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    director: String,
    #[arg(long, default_value = "0")]
    imdb: String,
    #[arg(long, default_value = "")]
    hollywood: String,
    #[arg(long, default_value = "")]
    bollywood: String,
}

impl From<MovieArgs> for MovieInput {
    fn from(args: MovieArgs) -> Self {
        Self {
            id: args.id,
            title: args.title,
            director: args.director,
            imdb: args.imdb,
            hollywood: args.hollywood,
            bollywood: args.bollywood,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config.with_base_url(cli.url),
        Err(e) => {
            eprintln!("Error: {}", AppError::from(e).user_message());
            std::process::exit(1);
        }
    };

    let result = run(cli.command.unwrap_or(Commands::Tui), config).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run_tui(config: Config) -> Result<(), AppError> {
    let base = config.base_url()?;
    let _log_guard = logging::init_file(&config.log_dir())?;
    info!(%base, "starting movie admin");

    let api: Arc<dyn MovieApi> = Arc::new(HttpMovieApi::new(base));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(api, tx);
    let mut app = App::new();

    // Initial load
    dispatcher.run(Command::Reload);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app, &dispatcher, &mut rx).await;
    ratatui::restore();

    info!("movie admin exited");
    result
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    dispatcher: &Dispatcher,
    rx: &mut UnboundedReceiver<Message>,
) -> Result<(), AppError> {
    loop {
        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so finished flows show up promptly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.handle_key(key) {
                    dispatcher.run(command);
                }
            }
        }
    }
}

async fn run(command: Commands, config: Config) -> Result<(), AppError> {
    match command {
        Commands::Tui => run_tui(config).await,
        Commands::List { json } => {
            let movies = headless_api(&config)?.list().await?;
            print_movies(&movies, json)
        }
        Commands::Get { id, json } => {
            let movie = headless_api(&config)?.fetch(&id).await?;
            print_movies(std::slice::from_ref(&movie), json)
        }
        Commands::Add(args) => {
            let movie = MovieInput::from(args).to_movie();
            headless_api(&config)?.create(&movie).await?;
            println!("Created movie {}", movie.id_text());
            Ok(())
        }
        Commands::Update(args) => {
            let movie = MovieInput::from(args).to_movie();
            match headless_api(&config)?.update(&movie).await? {
                Some(stored) => print_movies(std::slice::from_ref(&stored), false),
                None => {
                    println!("Updated movie {}", movie.id_text());
                    Ok(())
                }
            }
        }
        Commands::Delete { id } => {
            headless_api(&config)?.remove(&id).await?;
            println!("Deleted movie {id}");
            Ok(())
        }
    }
}

fn headless_api(config: &Config) -> Result<HttpMovieApi, AppError> {
    logging::init_stderr();
    Ok(HttpMovieApi::new(config.base_url()?))
}

fn print_movies(movies: &[Movie], json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(movies)?);
        return Ok(());
    }

    let rows: Vec<[String; 6]> = movies.iter().map(ui::table::row_cells).collect();
    let mut widths = ui::table::COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("{}", format_row(&ui::table::COLUMNS));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", format_row(&cells));
    }
    Ok(())
}
