// =============================================================================
// TERMINAL SCALE
// =============================================================================

/// Board pixels covered by one terminal column
pub const CELL_WIDTH_PX: i64 = 10;

/// Board pixels covered by one terminal row
pub const CELL_HEIGHT_PX: i64 = 20;

// =============================================================================
// LAYOUT
// =============================================================================

/// Toolbar width in characters
pub const TOOLBAR_WIDTH: u16 = 22;

/// Toolbar rows before the first palette entry ("STICKERS" header + blank line)
pub const TOOLBAR_LIST_START_ROW: u16 = 2;

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Event poll timeout in milliseconds
pub const EVENT_POLL_MS: u64 = 50;

/// Two presses on the same sticker within this window count as a double click
pub const DOUBLE_CLICK_MS: u64 = 400;

// =============================================================================
// FILES
// =============================================================================

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "stickerboard.yaml";

/// Default log file location
pub const DEFAULT_LOG_FILE: &str = ".stickerboard/stickerboard.log";

/// Environment variable holding the tracing filter
pub const LOG_ENV_VAR: &str = "STICKERBOARD_LOG";
