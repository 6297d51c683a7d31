//! Sticker image resolution.
//!
//! Turns a [`SourceRef`] into decoded pixels ready for compositing. Decoding
//! happens on a background thread so the event loop never blocks on disk;
//! results are picked up by [`ImageCache::poll`] from the main loop. The
//! board itself never waits on any of this.
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use sb_base::SourceRef;
use sb_base::config::{PaletteConfig, RgbColor};
use sb_base::constants::{EXPORT_PIXEL_RATIO, STICKER_SIZE};

use super::error::{AppError, Result};

/// Edge length of a decoded sticker in export pixels
pub const STICKER_PIXELS: u32 = STICKER_SIZE as u32 * EXPORT_PIXEL_RATIO;

/// A decoded sticker, scaled to export resolution.
#[derive(Debug, Clone)]
pub struct StickerImage {
    pub pixels: RgbaImage,
    /// Alpha-weighted average colour, used where the image can't be drawn
    pub tint: RgbColor,
    /// True when the source file was missing or unreadable and a solid fill stands in
    pub placeholder: bool,
}

impl StickerImage {
    fn from_pixels(pixels: RgbaImage) -> Self {
        let tint = average_color(&pixels);
        Self { pixels, tint, placeholder: false }
    }

    fn placeholder(color: RgbColor) -> Self {
        let pixels = RgbaImage::from_pixel(STICKER_PIXELS, STICKER_PIXELS, Rgba([color[0], color[1], color[2], 255]));
        Self { pixels, tint: color, placeholder: true }
    }
}

fn average_color(pixels: &RgbaImage) -> RgbColor {
    let (mut r, mut g, mut b, mut weight) = (0u64, 0u64, 0u64, 0u64);
    for p in pixels.pixels() {
        let a = p[3] as u64;
        r += p[0] as u64 * a;
        g += p[1] as u64 * a;
        b += p[2] as u64 * a;
        weight += a;
    }
    if weight == 0 {
        return [0, 0, 0];
    }
    [(r / weight) as u8, (g / weight) as u8, (b / weight) as u8]
}

/// Resolves a source reference to drawable pixels.
pub trait ImageSource {
    fn resolve(&self, source: &SourceRef) -> Result<Arc<StickerImage>>;
}

/// Synchronous loader reading palette images from the asset directory.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    palette: PaletteConfig,
    asset_dir: PathBuf,
}

impl AssetLoader {
    pub fn new(palette: PaletteConfig, asset_dir: impl Into<PathBuf>) -> Self {
        Self { palette, asset_dir: asset_dir.into() }
    }

    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }
}

impl ImageSource for AssetLoader {
    fn resolve(&self, source: &SourceRef) -> Result<Arc<StickerImage>> {
        let entry = self.palette.get(source).ok_or_else(|| AppError::UnknownSource(source.to_string()))?;
        let path = self.asset_dir.join(&entry.file);

        if !path.exists() {
            tracing::warn!(source = %source, path = %path.display(), "sticker image missing, using placeholder");
            return Ok(Arc::new(StickerImage::placeholder(entry.color)));
        }

        let decoded = match image::open(&path) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(source = %source, path = %path.display(), error = %e, "sticker image unreadable, using placeholder");
                return Ok(Arc::new(StickerImage::placeholder(entry.color)));
            }
        };
        let pixels = decoded.resize_exact(STICKER_PIXELS, STICKER_PIXELS, FilterType::Triangle).to_rgba8();
        tracing::debug!(source = %source, path = %path.display(), "sticker image decoded");
        Ok(Arc::new(StickerImage::from_pixels(pixels)))
    }
}

/// Result of a background decode
struct ImageUpdate {
    source: SourceRef,
    result: Result<Arc<StickerImage>>,
}

/// Asynchronous front for [`AssetLoader`] with a decoded-image cache.
pub struct ImageCache {
    loader: Arc<AssetLoader>,
    loaded: HashMap<SourceRef, Arc<StickerImage>>,
    pending: HashSet<SourceRef>,
    failed: HashSet<SourceRef>,
    tx: Option<Sender<SourceRef>>,
    rx: Receiver<ImageUpdate>,
    handle: Option<JoinHandle<()>>,
}

impl ImageCache {
    /// Start the decoder thread
    pub fn new(loader: AssetLoader) -> Result<Self> {
        let loader = Arc::new(loader);
        let (req_tx, req_rx) = mpsc::channel::<SourceRef>();
        let (upd_tx, upd_rx) = mpsc::channel::<ImageUpdate>();

        let worker_loader = loader.clone();
        let handle = thread::Builder::new().name("image-loader".to_string()).spawn(move || {
            // Ends when the cache drops its request sender
            while let Ok(source) = req_rx.recv() {
                let result = worker_loader.resolve(&source);
                if upd_tx.send(ImageUpdate { source, result }).is_err() {
                    break;
                }
            }
        })?;

        Ok(Self {
            loader,
            loaded: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            tx: Some(req_tx),
            rx: upd_rx,
            handle: Some(handle),
        })
    }

    /// Queue a decode unless the image is loaded, queued, or already failed
    pub fn request(&mut self, source: &SourceRef) {
        if self.loaded.contains_key(source) || self.pending.contains(source) || self.failed.contains(source) {
            return;
        }
        let Some(tx) = &self.tx else { return };
        if tx.send(source.clone()).is_ok() {
            self.pending.insert(source.clone());
        }
    }

    /// Drain finished decodes. Returns how many arrived.
    pub fn poll(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.rx.try_recv() {
                Ok(update) => {
                    count += 1;
                    self.pending.remove(&update.source);
                    match update.result {
                        Ok(image) => {
                            self.loaded.insert(update.source, image);
                        }
                        Err(e) => {
                            tracing::error!(source = %update.source, error = %e, "sticker image failed to load");
                            self.failed.insert(update.source);
                        }
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        count
    }

    pub fn get(&self, source: &SourceRef) -> Option<&Arc<StickerImage>> {
        self.loaded.get(source)
    }

    pub fn is_pending(&self, source: &SourceRef) -> bool {
        self.pending.contains(source)
    }

    /// Colour to draw for `source`: decoded tint, else the palette colour
    pub fn tint(&self, source: &SourceRef) -> Option<RgbColor> {
        self.loaded
            .get(source)
            .map(|img| img.tint)
            .or_else(|| self.loader.palette().get(source).map(|e| e.color))
    }
}

impl ImageSource for ImageCache {
    fn resolve(&self, source: &SourceRef) -> Result<Arc<StickerImage>> {
        match self.loaded.get(source) {
            Some(image) => Ok(image.clone()),
            None => self.loader.resolve(source),
        }
    }
}

impl Drop for ImageCache {
    fn drop(&mut self) {
        // Closing the request channel stops the worker
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use sb_base::config::PaletteEntry;

    fn palette() -> PaletteConfig {
        PaletteConfig {
            stickers: vec![
                PaletteEntry {
                    id: "red".into(),
                    name: "Red".into(),
                    file: "red.png".into(),
                    glyph: "R".into(),
                    color: [200, 0, 0],
                },
                PaletteEntry {
                    id: "ghost".into(),
                    name: "Ghost".into(),
                    file: "missing.png".into(),
                    glyph: "G".into(),
                    color: [10, 20, 30],
                },
            ],
        }
    }

    fn write_red_png(dir: &std::path::Path) {
        let img = RgbaImage::from_pixel(16, 8, Rgba([255, 0, 0, 255]));
        img.save(dir.join("red.png")).unwrap();
    }

    #[test]
    fn loader_decodes_and_scales() {
        let dir = tempfile::tempdir().unwrap();
        write_red_png(dir.path());
        let loader = AssetLoader::new(palette(), dir.path());

        let image = loader.resolve(&SourceRef::new("red")).unwrap();
        assert_eq!(image.pixels.dimensions(), (STICKER_PIXELS, STICKER_PIXELS));
        assert_eq!(image.tint, [255, 0, 0]);
        assert!(!image.placeholder);
    }

    #[test]
    fn loader_missing_file_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(palette(), dir.path());

        let image = loader.resolve(&SourceRef::new("ghost")).unwrap();
        assert!(image.placeholder);
        assert_eq!(image.tint, [10, 20, 30]);
        assert_eq!(image.pixels.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn loader_corrupt_file_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("red.png"), b"not a png at all").unwrap();
        let loader = AssetLoader::new(palette(), dir.path());

        let image = loader.resolve(&SourceRef::new("red")).unwrap();
        assert!(image.placeholder);
        assert_eq!(image.tint, [200, 0, 0]);
    }

    #[test]
    fn loader_unknown_source_errors() {
        let loader = AssetLoader::new(palette(), ".");
        let err = loader.resolve(&SourceRef::new("nope")).unwrap_err();
        assert!(matches!(err, AppError::UnknownSource(ref s) if s == "nope"));
    }

    #[test]
    fn average_color_ignores_transparent_pixels() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 255, 0]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        assert_eq!(average_color(&img), [0, 255, 0]);
    }

    #[test]
    fn cache_loads_in_background() {
        let dir = tempfile::tempdir().unwrap();
        write_red_png(dir.path());
        let mut cache = ImageCache::new(AssetLoader::new(palette(), dir.path())).unwrap();
        let red = SourceRef::new("red");

        // Palette colour until the decode lands
        assert_eq!(cache.tint(&red), Some([200, 0, 0]));
        cache.request(&red);
        cache.request(&red);

        let deadline = Instant::now() + Duration::from_secs(5);
        while cache.get(&red).is_none() && Instant::now() < deadline {
            cache.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(cache.get(&red).is_some());
        assert!(!cache.is_pending(&red));
        assert_eq!(cache.tint(&red), Some([255, 0, 0]));
    }

    #[test]
    fn cache_resolves_synchronously_when_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(AssetLoader::new(palette(), dir.path())).unwrap();
        let image = cache.resolve(&SourceRef::new("ghost")).unwrap();
        assert!(image.placeholder);
    }
}
