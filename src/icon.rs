//! Turning files on disk into display-ready icons.
//!
//! Vector drawables go through parse → SVG → rasterize; anything else is handed
//! to the `image` crate. Failures never reach the caller of
//! [`IconLoader::load_thumbnail`] or [`IconLoader::load_original`]: they come back
//! as `None`, which callers are expected to render as a placeholder.

use crate::{
    error::LoadError,
    raster::{RasterImage, Rasterizer},
    svg::SvgDocument,
    vector::VectorGeometry,
};
use image::{imageops::FilterType, ImageError, ImageFormat, RgbaImage};
use log::debug;
use std::{
    fs,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

/// Edge length of the square thumbnail variant.
pub const THUMBNAIL_SIZE: u32 = 24;

pub const VECTOR_DRAWABLE_EXTENSION: &str = "xml";

const TEMP_PREFIX: &str = "vdpreview-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub source_path: PathBuf,
    pub target_size: Option<u32>,
}

impl IconRequest {
    pub fn thumbnail(path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: path.into(),
            target_size: Some(THUMBNAIL_SIZE),
        }
    }

    pub fn original(path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: path.into(),
            target_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    image: RgbaImage,
}

impl Icon {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn encode_png(&self) -> image::ImageResult<Vec<u8>> {
        let mut writer = Cursor::new(Vec::new());
        self.image.write_to(&mut writer, ImageFormat::Png)?;
        Ok(writer.into_inner())
    }
}

#[derive(Debug, Clone)]
pub struct IconLoader {
    rasterizer: Rasterizer,
    temp_dir: PathBuf,
}

impl Default for IconLoader {
    fn default() -> Self {
        Self::new(Rasterizer::default())
    }
}

impl IconLoader {
    pub fn new(rasterizer: Rasterizer) -> Self {
        Self {
            rasterizer,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Directory that receives the intermediate SVG of each vector render.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    pub fn load_thumbnail(&self, path: impl AsRef<Path>) -> Option<Icon> {
        self.load(&IconRequest::thumbnail(path.as_ref()))
    }

    pub fn load_original(&self, path: impl AsRef<Path>) -> Option<Icon> {
        self.load(&IconRequest::original(path.as_ref()))
    }

    fn load(&self, request: &IconRequest) -> Option<Icon> {
        match self.try_load(request) {
            Ok(icon) => Some(icon),
            Err(err) => {
                debug!(
                    "No icon for {}: {}",
                    request.source_path.display(),
                    format_error_chain(&err)
                );
                None
            }
        }
    }

    pub fn try_load(&self, request: &IconRequest) -> Result<Icon, LoadError> {
        let image = self.load_raster(&request.source_path)?;

        let image = match request.target_size {
            Some(size) => image::imageops::resize(&image, size, size, FilterType::Nearest),
            None => image,
        };

        Ok(Icon { image })
    }

    fn load_raster(&self, path: &Path) -> Result<RasterImage, LoadError> {
        if is_vector_drawable(path) {
            self.render_vector_drawable(path)
        } else {
            let image = image::open(path).map_err(|err| match err {
                ImageError::IoError(source) => LoadError::io(path, source),
                err => LoadError::Decode(err),
            })?;
            Ok(image.into_rgba8())
        }
    }

    fn render_vector_drawable(&self, path: &Path) -> Result<RasterImage, LoadError> {
        let text = fs::read_to_string(path).map_err(|err| LoadError::io(path, err))?;

        let geometry = VectorGeometry::parse(&text)?;
        let svg = SvgDocument::from_geometry(&geometry).map_err(|err| LoadError::io(path, err))?;

        // Removed when dropped, whichever way this function returns.
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".svg")
            .tempfile_in(&self.temp_dir)
            .map_err(|err| LoadError::io(&self.temp_dir, err))?;
        if let Err(err) = temp.write_all(svg.as_bytes()) {
            return Err(LoadError::io(temp.path(), err));
        }

        let image = self.rasterizer.rasterize_file(temp.path())?;

        Ok(image)
    }
}

pub fn is_vector_drawable(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(VECTOR_DRAWABLE_EXTENSION))
}

fn format_error_chain(err: &dyn std::error::Error) -> String {
    let mut output = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        output.push_str(&format!(": {cause}"));
        source = cause.source();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, RasterizeError};
    use image::Rgba;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn square(size: u32, fill: &str) -> String {
        format!(
            r#"<vector xmlns:android="http://schemas.android.com/apk/res/android" android:width="{size}dp" android:height="{size}dp"><path android:pathData="M0 0H{size}V{size}H0Z" {fill}/></vector>"#
        )
    }

    #[test]
    fn dispatches_on_extension() {
        assert!(is_vector_drawable(Path::new("res/drawable/ic_add.xml")));
        assert!(is_vector_drawable(Path::new("IC_ADD.XML")));
        assert!(!is_vector_drawable(Path::new("ic_add.png")));
        assert!(!is_vector_drawable(Path::new("xml")));
    }

    #[test]
    fn thumbnail_is_always_24_square() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        let path = write(&dir, "big.xml", &square(96, r##"android:fillColor="#0000FF""##));
        let icon = loader.load_thumbnail(&path).unwrap();

        assert_eq!((icon.width(), icon.height()), (THUMBNAIL_SIZE, THUMBNAIL_SIZE));
        assert_eq!(icon.image().get_pixel(12, 12), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn original_keeps_native_size() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        let path = write(&dir, "big.xml", &square(40, ""));
        let icon = loader.load_original(&path).unwrap();

        assert_eq!((icon.width(), icon.height()), (40, 40));
    }

    #[test]
    fn default_fill_is_black() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        let path = write(&dir, "plain.xml", &square(10, ""));
        let icon = loader.load_original(&path).unwrap();

        assert_eq!(icon.image().get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn decodes_bitmaps() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        let path = dir.path().join("photo.png");
        RgbaImage::from_pixel(64, 32, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let original = loader.load_original(&path).unwrap();
        assert_eq!((original.width(), original.height()), (64, 32));

        let thumbnail = loader.load_thumbnail(&path).unwrap();
        assert_eq!((thumbnail.width(), thumbnail.height()), (24, 24));
        assert_eq!(thumbnail.image().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn failures_keep_their_kind() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        let missing = dir.path().join("missing.xml");
        assert!(matches!(
            loader.try_load(&IconRequest::thumbnail(&missing)),
            Err(LoadError::Io { .. })
        ));

        let no_path = write(
            &dir,
            "empty.xml",
            r#"<vector android:width="24dp" android:height="24dp"/>"#,
        );
        assert!(matches!(
            loader.try_load(&IconRequest::original(&no_path)),
            Err(LoadError::Parse(ParseError::MissingPath))
        ));

        let bad_size = write(
            &dir,
            "bad_size.xml",
            r#"<vector android:width="@dimen/ic_size" android:height="24dp"><path android:pathData="M0 0H7V5H0Z"/></vector>"#,
        );
        assert!(matches!(
            loader.try_load(&IconRequest::original(&bad_size)),
            Err(LoadError::Parse(ParseError::InvalidSize("width")))
        ));

        let huge = write(
            &dir,
            "huge.xml",
            r#"<vector android:width="100000dp" android:height="100000dp"><path android:pathData="M0 0H7V5H0Z"/></vector>"#,
        );
        assert!(matches!(
            loader.try_load(&IconRequest::original(&huge)),
            Err(LoadError::Rasterize(RasterizeError::Canvas { .. }))
        ));

        let garbage = write(&dir, "garbage.png", "definitely not a png");
        assert!(matches!(
            loader.try_load(&IconRequest::original(&garbage)),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn non_numeric_sizes_become_absent() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        for (width, height) in [
            ("@dimen/ic_size", "@dimen/ic_size"),
            ("24dip", "24dip"),
            ("abc", "24dp"),
        ] {
            let path = write(
                &dir,
                "sized.xml",
                &format!(
                    r#"<vector android:width="{width}" android:height="{height}"><path android:pathData="M0 0H7V5H0Z"/></vector>"#
                ),
            );
            assert!(loader.load_original(&path).is_none(), "{width} x {height}");
            assert!(loader.load_thumbnail(&path).is_none(), "{width} x {height}");
        }
    }

    #[test]
    fn failures_become_absent() {
        let dir = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(dir.path());

        let garbage = write(&dir, "garbage.xml", "\u{1}\u{2} nonsense <<<");
        assert!(loader.load_thumbnail(&garbage).is_none());
        assert!(loader.load_original(dir.path().join("nope.png")).is_none());
    }

    #[test]
    fn temp_files_are_removed() {
        let dir = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();
        let loader = IconLoader::default().with_temp_dir(temp.path());

        let good = write(&dir, "good.xml", &square(8, ""));
        let huge = write(
            &dir,
            "huge.xml",
            r#"<vector android:width="100000dp" android:height="100000dp"><path/></vector>"#,
        );

        assert!(loader.load_original(&good).is_some());
        assert!(loader.load_original(&huge).is_none());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
