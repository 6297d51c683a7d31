//! Flatten the board into a single PNG.
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops;
use image::{ImageFormat, Rgba, RgbaImage};

use sb_base::{Board, SourceRef};
use sb_base::constants::{BOARD_HEIGHT, BOARD_WIDTH, EXPORT_BACKGROUND, EXPORT_FILE_NAME, EXPORT_PIXEL_RATIO};

use super::config::Placement;
use super::error::Result;
use super::images::ImageSource;

/// Composite every sticker, in board order, onto a fresh canvas at the export
/// pixel ratio. Parts of stickers outside the board are clipped.
pub fn render_canvas(board: &Board, source: &dyn ImageSource) -> Result<RgbaImage> {
    let ratio = EXPORT_PIXEL_RATIO as i64;
    let mut canvas =
        RgbaImage::from_pixel((BOARD_WIDTH * ratio) as u32, (BOARD_HEIGHT * ratio) as u32, Rgba(EXPORT_BACKGROUND));

    for sticker in board {
        let image = source.resolve(sticker.source())?;
        let (x, y) = sticker.position();
        imageops::overlay(&mut canvas, &image.pixels, x.saturating_mul(ratio), y.saturating_mul(ratio));
    }
    Ok(canvas)
}

/// Render the board and write it to `<dir>/canvas.png`, replacing any previous export.
pub fn export_png(board: &Board, source: &dyn ImageSource, dir: &Path) -> Result<PathBuf> {
    let canvas = render_canvas(board, source)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    canvas.save_with_format(&path, ImageFormat::Png)?;
    tracing::info!(path = %path.display(), stickers = board.len(), "board exported");
    Ok(path)
}

/// Headless rendering: place each sticker, drop it at its raw position
/// (snapped like a drag), then export.
pub fn render_placements(placements: &[Placement], source: &dyn ImageSource, dir: &Path) -> Result<PathBuf> {
    let mut board = Board::new();
    for placement in placements {
        let id = board.place(SourceRef::new(placement.source.as_str())).id();
        board.move_sticker(id, placement.x, placement.y);
    }
    export_png(&board, source, dir)
}
