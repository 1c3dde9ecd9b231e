//! blog-tui - Terminal UI for Blogcast
//!
//! Browse, create, edit and delete posts held locally or on a blog-server.

use std::path::PathBuf;

use blog_tui::{
    app::{event::EventHandler, reduce, Action, AppState},
    error::Result,
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};
use clap::Parser;
use libblog::{Backend, Config};

#[derive(Parser, Debug)]
#[command(name = "blog-tui")]
#[command(about = "Browse and edit Blogcast posts in the terminal", long_about = None)]
struct Cli {
    /// Where posts live (local or remote); overrides the config file
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Address of the post server for the remote backend
    #[arg(long)]
    base_url: Option<String>,

    /// Start the local backend empty instead of with the test post
    #[arg(long)]
    no_seed: bool,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;

        if let Some(backend) = self.backend {
            config.store.backend = backend;
        }
        if let Some(ref base_url) = self.base_url {
            config.remote.base_url = base_url.clone();
        }
        if self.no_seed {
            config.store.seed = false;
        }

        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // The terminal owns stderr while the UI is up
    if let Some(ref path) = cli.log_file {
        libblog::logging::config_from_env().with_file(path).init()?;
    }

    let config = cli.config()?;
    let mut services = ServiceHandle::new(&config)?;
    tracing::info!(backend = %services.backend(), "Starting blog-tui");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &mut services);

    restore_terminal(terminal)?;

    result
}

fn run_app(terminal: &mut Tui, services: &mut ServiceHandle) -> Result<()> {
    let mut state = AppState::with_posts(services.posts());
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, &state))?;

        // Run queued store work after drawing so the busy status is visible
        if let Some(effect) = state.pending_effect.take() {
            let outcome = services.run(effect);
            if let Some(posts) = services.poll_posts() {
                state = reduce(state, Action::PostsUpdated(posts));
            }
            state = reduce(state, outcome);
            continue;
        }

        let event = event_handler.next()?;
        state = reduce(state, event.into());

        if state.should_quit {
            break;
        }
    }

    tracing::info!("Exiting blog-tui");
    Ok(())
}
