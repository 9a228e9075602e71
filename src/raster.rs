use crate::{error::RasterizeError, svg::SvgDocument};
use image::{Rgba, RgbaImage};
use resvg::{
    tiny_skia::Pixmap,
    usvg::{
        fontdb::Database, ImageRendering, Options, ShapeRendering, TextRendering, Transform,
        Tree,
    },
};
use std::{fs, path::Path, sync::Arc};

/// Decoded bitmap with straight (non-premultiplied) RGBA pixels.
pub type RasterImage = RgbaImage;

const RENDERING_HINTS: &str = "* { \
    shape-rendering: geometricPrecision; \
    text-rendering: geometricPrecision; \
    image-rendering: optimizeQuality; \
    color-rendering: optimizeQuality; \
}";

/// Largest canvas edge, in pixels, that will be allocated.
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// Renders SVG documents at their intrinsic size.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    fontdb: Arc<Database>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(Arc::new(Database::new()))
    }
}

impl Rasterizer {
    pub fn new(fontdb: Arc<Database>) -> Self {
        Self { fontdb }
    }

    fn options(&self) -> Options<'static> {
        Options {
            fontdb: self.fontdb.clone(),
            shape_rendering: ShapeRendering::GeometricPrecision,
            text_rendering: TextRendering::GeometricPrecision,
            image_rendering: ImageRendering::OptimizeQuality,
            style_sheet: Some(RENDERING_HINTS.to_string()),
            ..Default::default()
        }
    }

    pub fn rasterize(&self, data: &[u8]) -> Result<RasterImage, RasterizeError> {
        let opt = self.options();

        let rtree = Tree::from_data(data, &opt)?;
        let size = rtree.size().to_int_size();
        let canvas_error = RasterizeError::Canvas {
            width: size.width(),
            height: size.height(),
        };

        if size.width() > MAX_CANVAS_SIZE || size.height() > MAX_CANVAS_SIZE {
            return Err(canvas_error);
        }
        let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or(canvas_error)?;
        resvg::render(&rtree, Transform::identity(), &mut pixmap.as_mut());

        Ok(demultiply(&pixmap))
    }

    pub fn rasterize_document(&self, svg: &SvgDocument) -> Result<RasterImage, RasterizeError> {
        self.rasterize(svg.as_bytes())
    }

    pub fn rasterize_file(&self, path: &Path) -> Result<RasterImage, RasterizeError> {
        let data = fs::read(path)?;
        self.rasterize(&data)
    }
}

fn demultiply(pixmap: &Pixmap) -> RasterImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    image
}
