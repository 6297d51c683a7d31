// =============================================================================
// BOARD
// =============================================================================

/// Board width in board pixels
pub const BOARD_WIDTH: i64 = 600;

/// Board height in board pixels
pub const BOARD_HEIGHT: i64 = 400;

/// Grid cell size used for snapping, in board pixels
pub const GRID_SIZE: i64 = 40;

// =============================================================================
// STICKERS
// =============================================================================

/// Displayed width and height of every sticker, in board pixels
pub const STICKER_SIZE: i64 = 40;

/// Position given to a freshly placed sticker
pub const DEFAULT_POSITION: (i64, i64) = (60, 60);

/// First id handed out by a new board
pub const FIRST_STICKER_ID: u64 = 1000;

// =============================================================================
// EXPORT
// =============================================================================

/// Scale factor between board pixels and exported image pixels
pub const EXPORT_PIXEL_RATIO: u32 = 2;

/// File name of the flattened export
pub const EXPORT_FILE_NAME: &str = "canvas.png";

/// Background of the exported canvas (RGBA). Only sticker pixels are opaque.
pub const EXPORT_BACKGROUND: [u8; 4] = [0, 0, 0, 0];
