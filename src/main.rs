mod app;
mod infra;
mod state;
mod ui;

use std::io;

use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use app::App;
use infra::config::{CliArgs, Command, Settings, parse_args};
use infra::error::Result;
use infra::export::render_placements;
use infra::images::{AssetLoader, ImageCache};
use state::State;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let CliArgs { config, out, command } = parse_args(args)?;

    let mut settings = Settings::load(&config)?;
    if let Some(out) = out {
        settings.output_dir = out;
    }

    infra::logging::init(&settings.log_file)?;
    sb_base::config::set_active_theme(&settings.theme);
    tracing::info!(config = %config.display(), assets = %settings.asset_dir.display(), "starting");

    let loader = AssetLoader::new(settings.palette(), &settings.asset_dir);

    match command {
        Command::Render(placements) => {
            let path = render_placements(&placements, &loader, &settings.output_dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Interactive => run_interactive(loader, settings),
    }
}

fn run_interactive(loader: AssetLoader, settings: Settings) -> Result<()> {
    let palette = loader.palette().clone();
    let images = ImageCache::new(loader)?;

    // Leave raw mode, mouse capture and the alternate screen before the
    // default hook prints the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        tracing::error!(%info, "panic");
        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(State::new(palette, settings.output_dir), images);
    let result = app.run(&mut terminal);

    // Cleanup
    restore_terminal();
    result?;
    Ok(())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(DisableMouseCapture);
    let _ = io::stdout().execute(LeaveAlternateScreen);
}
