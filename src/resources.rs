use crate::WatermarkError;
use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where the content of a mark comes from: supplied directly, or looked up by
/// key in the watermark's [`Resources`] when the mark is first measured.
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T> {
    Inline(T),
    Resource(String),
}

/// Load an image from disk, decoding it into straight-alpha RGBA
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage, WatermarkError> {
    let path = path.as_ref();
    let is_tga = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("tga"))
        .unwrap_or(false);

    let data = std::fs::read(path)?;
    let format = if is_tga {
        image::ImageFormat::Tga
    } else {
        image::guess_format(&data)?
    };
    let image = image::load_from_memory_with_format(&data, format)?;
    Ok(image.to_rgba8())
}

/// Deferred content lookup: a string table, in-memory images, and an optional
/// directory to load images from by relative path.
#[derive(Debug, Default, Clone)]
pub struct Resources {
    strings: HashMap<String, String>,
    images: HashMap<String, RgbaImage>,
    image_dir: Option<PathBuf>,
}

impl Resources {
    pub fn new() -> Resources {
        Resources::default()
    }

    pub fn with_string<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Resources {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn with_image<K: Into<String>>(mut self, key: K, image: RgbaImage) -> Resources {
        self.images.insert(key.into(), image);
        self
    }

    /// Resolve image keys that are not registered in memory relative to `dir`
    pub fn with_image_dir<P: Into<PathBuf>>(mut self, dir: P) -> Resources {
        self.image_dir = Some(dir.into());
        self
    }

    pub fn string(&self, key: &str) -> Option<String> {
        let value = self.strings.get(key).cloned();
        if value.is_none() {
            log::warn!("no string resource named {key:?}");
        }
        value
    }

    /// Look up an image, first in memory and then on disk. Failures are logged
    /// and reported as `None`.
    pub fn image(&self, key: &str) -> Option<RgbaImage> {
        if let Some(image) = self.images.get(key) {
            return Some(image.clone());
        }
        let Some(dir) = &self.image_dir else {
            log::warn!("no image resource named {key:?}");
            return None;
        };
        let path = dir.join(key);
        match load_image(&path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("unable to load image resource {}: {e}", path.display());
                None
            }
        }
    }
}
