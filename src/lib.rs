//! Render Android vector drawables (and ordinary bitmaps) as preview icons.
//!
//! ```no_run
//! use vdpreview::IconLoader;
//!
//! let loader = IconLoader::default();
//! match loader.load_thumbnail("res/drawable/ic_add.xml") {
//!     Some(icon) => println!("{}x{}", icon.width(), icon.height()),
//!     None => println!("placeholder"),
//! }
//! ```

pub mod error;
pub mod icon;
pub mod raster;
pub mod svg;
pub mod vector;

pub use error::{LoadError, ParseError, RasterizeError};
pub use icon::{Icon, IconLoader, IconRequest, THUMBNAIL_SIZE};
pub use raster::{RasterImage, Rasterizer};
pub use svg::SvgDocument;
pub use vector::VectorGeometry;
