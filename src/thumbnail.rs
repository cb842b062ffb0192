//! Thumbnail geometry, framing and the on-disk PNG cache.

use image::{Rgba, RgbaImage, imageops};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Edge length of the square box thumbnails are fitted into.
pub const ICON_VIEW_SIZE: u32 = 128;

/// Frame padding around a rendered page: left, right, top, bottom.
pub const FRAME_BORDER: (u32, u32, u32, u32) = (4, 3, 3, 6);

const FRAME_EDGE: Rgba<u8> = Rgba([0xb8, 0xb8, 0xb8, 0xff]);
const FRAME_SHADOW: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0x30]);

/// Scale that fits a `width` x `height` page inside a `target` square.
pub fn thumbnail_scale(width: f64, height: f64, target: u32) -> f64 {
    let target = f64::from(target);
    (target / height).min(target / width)
}

/// Embed `page` in a thin frame with a drop shadow on the right and bottom
/// edges. The output grows by the `FRAME_BORDER` padding.
pub fn embed_in_frame(page: &RgbaImage) -> RgbaImage {
    let (left, right, top, bottom) = FRAME_BORDER;
    let (w, h) = page.dimensions();
    let mut framed = RgbaImage::new(w + left + right, h + top + bottom);

    // Shadow, offset one pixel down and right of the page outline.
    for y in top + 1..(top + h + 2).min(framed.height()) {
        for x in left + 1..(left + w + 2).min(framed.width()) {
            framed.put_pixel(x, y, FRAME_SHADOW);
        }
    }
    // One pixel outline hugging the page.
    for x in left - 1..=left + w {
        framed.put_pixel(x, top - 1, FRAME_EDGE);
        framed.put_pixel(x, top + h, FRAME_EDGE);
    }
    for y in top - 1..=top + h {
        framed.put_pixel(left - 1, y, FRAME_EDGE);
        framed.put_pixel(left + w, y, FRAME_EDGE);
    }

    imageops::replace(&mut framed, page, i64::from(left), i64::from(top));
    framed
}

/// PNG thumbnails written to uniquely named files in one directory.
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    dir: PathBuf,
}

impl ThumbnailCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load a previously saved thumbnail. Any failure is a cache miss.
    pub fn load(&self, path: &Path) -> Option<RgbaImage> {
        match image::open(path) {
            Ok(img) => Some(img.into_rgba8()),
            Err(e) => {
                log::debug!("cached thumbnail {} unusable: {e}", path.display());
                None
            }
        }
    }

    /// Write `thumbnail` to a fresh `thumb.XXXXXX.png` file and return its path.
    pub fn save(&self, thumbnail: &RgbaImage) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        let file = tempfile::Builder::new()
            .prefix("thumb.")
            .suffix(".png")
            .tempfile_in(&self.dir)
            .map_err(|e| Error::io(&self.dir, e))?;
        let (_, path) = file.keep().map_err(|e| Error::io(&self.dir, e.error))?;
        if let Err(e) = thumbnail.save_with_format(&path, image::ImageFormat::Png) {
            let _ = std::fs::remove_file(&path);
            return Err(e.into());
        }
        Ok(path)
    }

    /// Delete a thumbnail previously written by this cache. Paths outside
    /// the cache directory are left alone.
    pub fn discard(&self, path: &Path) {
        if path.parent() != Some(self.dir.as_path()) {
            return;
        }
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("cannot remove old thumbnail {}: {e}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_fits_longest_edge() {
        assert_eq!(thumbnail_scale(612.0, 792.0, 128), 128.0 / 792.0);
        assert_eq!(thumbnail_scale(1024.0, 256.0, 128), 0.125);
        assert_eq!(thumbnail_scale(64.0, 64.0, 128), 2.0);
    }

    #[test]
    fn frame_pads_every_edge() {
        let page = RgbaImage::from_pixel(10, 20, Rgba([255, 0, 0, 255]));
        let framed = embed_in_frame(&page);
        assert_eq!(framed.dimensions(), (17, 29));
        assert_eq!(framed.get_pixel(4, 3), &Rgba([255, 0, 0, 255]));
        assert_eq!(framed.get_pixel(13, 22), &Rgba([255, 0, 0, 255]));
        assert_eq!(framed.get_pixel(3, 2), &FRAME_EDGE);
        assert_eq!(framed.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn saved_thumbnail_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ThumbnailCache::new(dir.path().join("thumbs"));
        let img = RgbaImage::from_pixel(8, 6, Rgba([1, 2, 3, 255]));
        let path = cache.save(&img).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("thumb.") && name.ends_with(".png"));
        assert_eq!(cache.load(&path), Some(img));
    }

    #[test]
    fn two_saves_use_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ThumbnailCache::new(dir.path());
        let img = RgbaImage::new(2, 2);
        assert_ne!(cache.save(&img).unwrap(), cache.save(&img).unwrap());
    }

    #[test]
    fn discard_only_touches_own_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ThumbnailCache::new(dir.path().join("thumbs"));
        let own = cache.save(&RgbaImage::new(1, 1)).unwrap();
        let foreign = dir.path().join("keep.png");
        std::fs::write(&foreign, b"x").unwrap();

        cache.discard(&own);
        cache.discard(&foreign);
        assert!(!own.exists());
        assert!(foreign.exists());
    }

    #[test]
    fn missing_thumbnail_is_a_miss() {
        let cache = ThumbnailCache::new("/nonexistent");
        assert_eq!(cache.load(Path::new("/nonexistent/thumb.png")), None);
    }
}
