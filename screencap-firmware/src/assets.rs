//! Web page, icons and artwork
//!
//! Everything is compiled in from `assets/`. An `--assets` directory may
//! replace any file by name; the logo JPEG and the gauge face bitmap only
//! exist when supplied there.

use std::fs;
use std::io;
use std::path::Path;

use screencap_core::Assets;

/// Boot screen logo size (1 bit per pixel, MSB first)
pub const LOGO_SIZE: u32 = 64;

const INDEX_HTML: &[u8] = include_bytes!("../assets/index.html");
const FAVICON: &[u8] = include_bytes!("../assets/favicon.ico");
const REFRESH_IMAGE: &[u8] = include_bytes!("../assets/refresh-40x30.png");
const BUTTON_IMAGE: &[u8] = include_bytes!("../assets/button.png");
const LOGO_BITMAP: &[u8] = include_bytes!("../assets/logo_64x64.raw");

/// File names looked up in the override directory
pub mod names {
    pub const INDEX_HTML: &str = "index.html";
    pub const FAVICON: &str = "favicon.ico";
    pub const LOGO_JPEG: &str = "electric-idea_100x100.jpg";
    pub const REFRESH_IMAGE: &str = "refresh-40x30.png";
    pub const BUTTON_IMAGE: &str = "button.png";
    pub const LOGO_BITMAP: &str = "logo_64x64.raw";
    /// Full-screen RGB565 little-endian picture
    pub const GAUGE_FACE: &str = "gauge_face.raw";
}

/// Owned copies of every asset
#[derive(Debug, Clone)]
pub struct AssetStore {
    pub index_html: Vec<u8>,
    pub favicon: Vec<u8>,
    pub logo_jpeg: Vec<u8>,
    pub refresh_image: Vec<u8>,
    pub button_image: Vec<u8>,
    pub logo_bitmap: Vec<u8>,
    pub gauge_face: Option<Vec<u8>>,
}

impl AssetStore {
    /// Compiled-in assets only
    pub fn embedded() -> Self {
        Self {
            index_html: INDEX_HTML.to_vec(),
            favicon: FAVICON.to_vec(),
            logo_jpeg: Vec::new(),
            refresh_image: REFRESH_IMAGE.to_vec(),
            button_image: BUTTON_IMAGE.to_vec(),
            logo_bitmap: LOGO_BITMAP.to_vec(),
            gauge_face: None,
        }
    }

    /// Compiled-in assets with overrides from `dir`
    pub fn load(dir: Option<&Path>) -> io::Result<Self> {
        let mut store = Self::embedded();
        let Some(dir) = dir else {
            return Ok(store);
        };
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("asset directory {} not found", dir.display()),
            ));
        }

        for (name, slot) in [
            (names::INDEX_HTML, &mut store.index_html),
            (names::FAVICON, &mut store.favicon),
            (names::LOGO_JPEG, &mut store.logo_jpeg),
            (names::REFRESH_IMAGE, &mut store.refresh_image),
            (names::BUTTON_IMAGE, &mut store.button_image),
            (names::LOGO_BITMAP, &mut store.logo_bitmap),
        ] {
            if let Some(bytes) = read_optional(&dir.join(name))? {
                tracing::info!("asset {} overridden ({} bytes)", name, bytes.len());
                *slot = bytes;
            }
        }
        store.gauge_face = read_optional(&dir.join(names::GAUGE_FACE))?;
        Ok(store)
    }

    /// Gauge face bitmap, if it covers a `width` x `height` screen exactly
    pub fn gauge_face_for(&self, width: u16, height: u16) -> Option<&[u8]> {
        let face = self.gauge_face.as_deref()?;
        let expected = usize::from(width) * usize::from(height) * 2;
        if face.len() == expected {
            Some(face)
        } else {
            tracing::warn!(
                "{} is {} bytes, expected {}; using the drawn face",
                names::GAUGE_FACE,
                face.len(),
                expected
            );
            None
        }
    }

    /// Logo bitmap, if it holds a whole 64x64 image
    pub fn logo_bitmap(&self) -> Option<&[u8]> {
        let expected = (LOGO_SIZE * LOGO_SIZE / 8) as usize;
        (self.logo_bitmap.len() == expected).then_some(self.logo_bitmap.as_slice())
    }

    /// Borrowed view for the HTTP server
    pub fn as_assets(&self) -> Assets<'_> {
        Assets {
            index_html: &self.index_html,
            favicon: &self.favicon,
            logo: &self.logo_jpeg,
            refresh_image: &self.refresh_image,
            button_image: &self.button_image,
        }
    }
}

fn read_optional(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screencap_http::Route;

    #[test]
    fn test_embedded_assets() {
        let store = AssetStore::embedded();
        let assets = store.as_assets();
        let page = std::str::from_utf8(assets.index_html).unwrap();
        assert!(page.contains("/screenshot.bmp"));
        assert!(page.contains("/button-A"));
        assert!(assets.favicon.len() > 0);
        assert!(assets.logo.is_empty());
        assert!(store.logo_bitmap().is_some());
        assert!(store.gauge_face.is_none());
    }

    #[test]
    fn test_overrides_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(names::LOGO_JPEG), b"\xFF\xD8jpeg").unwrap();
        fs::write(dir.path().join(names::INDEX_HTML), b"<html>custom</html>").unwrap();

        let store = AssetStore::load(Some(dir.path())).unwrap();
        let assets = store.as_assets();
        assert_eq!(assets.body(Route::Logo), Some(&b"\xFF\xD8jpeg"[..]));
        assert_eq!(assets.body(Route::Index), Some(&b"<html>custom</html>"[..]));
        assert_eq!(assets.favicon, FAVICON);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(AssetStore::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_gauge_face_size_checked() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(names::GAUGE_FACE), vec![0u8; 4 * 3 * 2]).unwrap();
        let store = AssetStore::load(Some(dir.path())).unwrap();
        assert!(store.gauge_face_for(4, 3).is_some());
        assert!(store.gauge_face_for(320, 240).is_none());
    }

    #[test]
    fn test_short_logo_bitmap_ignored() {
        let mut store = AssetStore::embedded();
        store.logo_bitmap.truncate(10);
        assert!(store.logo_bitmap().is_none());
    }
}
