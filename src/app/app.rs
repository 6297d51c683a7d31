use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event};
use ratatui::prelude::*;

use crate::app::actions::{Action, ActionResult, apply_action};
use crate::app::events::handle_event;
use crate::infra::constants::EVENT_POLL_MS;
use crate::infra::export::export_png;
use crate::infra::images::ImageCache;
use crate::state::{State, StatusLevel};
use crate::ui;

/// Get current time in milliseconds since UNIX epoch
pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

pub struct App {
    pub state: State,
    images: ImageCache,
}

impl App {
    pub fn new(state: State, images: ImageCache) -> Self {
        Self { state, images }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        // Toolbar shows palette colours until these land
        for entry in &self.state.palette.stickers {
            self.images.request(&entry.source());
        }

        loop {
            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                let evt = event::read()?;
                if let Event::Resize(_, _) = evt {
                    self.state.dirty = true;
                }

                let Some(action) = handle_event(&evt, &self.state, now_ms()) else {
                    tracing::info!(stickers = self.state.board.len(), "quit");
                    break;
                };
                self.handle_action(action);
            }

            // === BACKGROUND PROCESSING ===
            if self.images.poll() > 0 {
                self.state.dirty = true;
            }

            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &mut self.state, &self.images))?;
                self.state.dirty = false;
            }
        }
        Ok(())
    }

    pub fn handle_action(&mut self, action: Action) {
        match apply_action(&mut self.state, action) {
            ActionResult::Nothing => {}
            ActionResult::BoardChanged => self.request_images(),
            ActionResult::Export => self.export(),
        }
    }

    /// Queue decodes for every source on the board (no-op for known ones)
    fn request_images(&mut self) {
        for sticker in self.state.board.iter() {
            self.images.request(sticker.source());
        }
    }

    fn export(&mut self) {
        match export_png(&self.state.board, &self.images, &self.state.output_dir) {
            Ok(path) => {
                self.state.set_status(StatusLevel::Info, format!("Saved {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.state.set_status(StatusLevel::Error, format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::images::AssetLoader;
    use sb_base::SourceRef;
    use sb_base::config::PALETTE;

    fn app(dir: &std::path::Path) -> App {
        let images = ImageCache::new(AssetLoader::new(PALETTE.clone(), dir.join("assets"))).unwrap();
        App::new(State::new(PALETTE.clone(), dir.join("out")), images)
    }

    #[test]
    fn export_writes_file_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_action(Action::PlaceIndex(0));
        app.handle_action(Action::Export);

        assert!(dir.path().join("out").join("canvas.png").exists());
        let status = app.state.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Info);
        assert!(status.text.starts_with("Saved"));
    }

    #[test]
    fn export_failure_reaches_status_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.state.board.place(SourceRef::new("not-in-palette"));
        app.handle_action(Action::Export);

        let status = app.state.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.text.contains("not-in-palette"));
        assert!(!dir.path().join("out").join("canvas.png").exists());
    }

    #[test]
    fn placing_requests_images() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_action(Action::PlaceIndex(2));
        let source = PALETTE.stickers[2].source();
        // Nothing polls the cache here, so the request is still in flight
        assert!(app.images.is_pending(&source));
    }
}
