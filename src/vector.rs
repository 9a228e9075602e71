//! Reading the geometry out of Android vector drawables.
//!
//! Only the `<vector>` size and the first `<path>` below it are modeled. Groups,
//! gradients, clip paths and any further paths are skipped without error.

use crate::{error::ParseError, svg::single_line};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::fmt::Display;

const ANDROID_PREFIX: &[u8] = b"android";
const DP_SUFFIX: &str = "dp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorGeometry {
    /// Width without its `dp` suffix, e.g. `"24"`.
    pub width: String,
    pub height: String,
    /// SVG path data of the first `<path>`. Empty when the path has none.
    pub path_data: String,
    pub fill_color: Option<String>,
}

impl VectorGeometry {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut scan = Scan::default();
        let mut depth = 0usize;

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(e) => {
                    scan.element(&e, depth)?;
                    depth += 1;
                }
                Event::Empty(e) => scan.element(&e, depth)?,
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Text(t) if depth == 0 && t.iter().any(|b| !b.is_ascii_whitespace()) => {
                    return Err(malformed("text outside of the root element"));
                }
                Event::Eof if depth > 0 => {
                    return Err(malformed("unexpected end of document"));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let (width, height) = scan.size.ok_or(ParseError::NotVectorDrawable)?;
        let (path_data, fill_color) = scan.path.ok_or(ParseError::MissingPath)?;

        Ok(Self {
            width,
            height,
            path_data,
            fill_color,
        })
    }
}

#[derive(Default)]
struct Scan {
    size: Option<(String, String)>,
    path: Option<(String, Option<String>)>,
}

impl Scan {
    fn element(&mut self, e: &BytesStart, depth: usize) -> Result<(), ParseError> {
        for attr in e.attributes() {
            attr.map_err(malformed)?;
        }

        let name = e.local_name();

        if depth == 0 {
            if self.size.is_some() {
                return Err(malformed("more than one root element"));
            }
            if name.as_ref() != b"vector" {
                return Err(ParseError::NotVectorDrawable);
            }

            let width = attribute(e, "width")?.ok_or(ParseError::MissingAttribute("width"))?;
            let height = attribute(e, "height")?.ok_or(ParseError::MissingAttribute("height"))?;
            self.size = Some((size(&width, "width")?, size(&height, "height")?));
        } else if self.path.is_none() && name.as_ref() == b"path" {
            let path_data = attribute(e, "pathData")?.unwrap_or_default();
            let fill_color = attribute(e, "fillColor")?;
            self.path = Some((path_data, fill_color));
        }

        Ok(())
    }
}

/// Looks up `android:{name}`, also accepting the bare `{name}`.
fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        let in_namespace = attr
            .key
            .prefix()
            .map_or(true, |prefix| prefix.as_ref() == ANDROID_PREFIX);

        if in_namespace && attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(malformed)?;
            return Ok(Some(single_line(&value).into_owned()));
        }
    }

    Ok(None)
}

fn strip_dp(value: &str) -> String {
    let value = value.trim();
    value
        .strip_suffix(DP_SUFFIX)
        .unwrap_or(value)
        .trim_end()
        .to_string()
}

/// Strips the unit and checks that what remains is a usable canvas length.
fn size(value: &str, name: &'static str) -> Result<String, ParseError> {
    let value = strip_dp(value);
    match value.parse::<f32>() {
        Ok(length) if length.is_finite() && length > 0.0 => Ok(value),
        _ => Err(ParseError::InvalidSize(name)),
    }
}

fn malformed(err: impl Display) -> ParseError {
    ParseError::Malformed(err.to_string())
}
