//! PNG snapshot output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ViewerError;

/// A named RGBA8 image waiting to be written.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Snapshot {
    pub fn new(file_name: &str, width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        Self {
            file_name: file_name.to_string(),
            width,
            height,
            pixels,
        }
    }

    /// Convert into an `image` buffer, or `None` if the pixel count does not
    /// match the dimensions.
    pub fn into_image(self) -> Option<image::RgbaImage> {
        let raw: Vec<u8> = self.pixels.into_iter().flatten().collect();
        image::RgbaImage::from_raw(self.width, self.height, raw)
    }
}

/// Write `snapshot` as a PNG inside `dir` and return its path.
pub fn write_png(dir: &Path, snapshot: &Snapshot) -> Result<PathBuf, ViewerError> {
    let path = dir.join(&snapshot.file_name);
    let image = snapshot
        .clone()
        .into_image()
        .ok_or_else(|| ViewerError::PixelCount {
            name: snapshot.file_name.clone(),
            expected: snapshot.width as usize * snapshot.height as usize,
            actual: snapshot.pixels.len(),
        })?;
    image.save(&path)?;
    debug!(path = %path.display(), "wrote snapshot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let pixels = vec![[10, 20, 30, 255]; 6];
        let path = write_png(dir.path(), &Snapshot::new("tiny.png", 3, 2, pixels)).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(dir.path(), &Snapshot::new("bad.png", 4, 4, vec![[0; 4]; 3]))
            .unwrap_err();
        assert!(matches!(
            err,
            ViewerError::PixelCount {
                expected: 16,
                actual: 3,
                ..
            }
        ));
    }
}
