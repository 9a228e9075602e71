use std::{io, path::PathBuf};
use thiserror::Error;

/// Why a file could not be read as a vector drawable.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Document has no <vector> root element")]
    NotVectorDrawable,

    #[error("<vector> element is missing the `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("<vector> `{0}` is not a positive number")]
    InvalidSize(&'static str),

    #[error("<vector> element has no <path> child")]
    MissingPath,

    #[error("Malformed XML: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("Failed to parse SVG document")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Failed to allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("Failed to read SVG document")]
    Io(#[from] io::Error),
}

/// Everything that can go wrong while turning a file into an icon.
///
/// The public loaders collapse this into `None`; it is surfaced by
/// [`IconLoader::try_load`](crate::icon::IconLoader::try_load) for diagnostics.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse vector drawable")]
    Parse(#[from] ParseError),

    #[error("Failed to rasterize vector drawable")]
    Rasterize(#[from] RasterizeError),

    #[error("Failed to decode image")]
    Decode(#[source] image::ImageError),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
