use crate::vector::VectorGeometry;
use quick_xml::{
    events::{BytesEnd, BytesStart, Event},
    Writer,
};
use std::{borrow::Cow, fmt, io};

const PROLOGUE: &str = r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#;
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A single-line SVG 1.1 document with one `<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument(String);

impl SvgDocument {
    pub fn from_geometry(geometry: &VectorGeometry) -> io::Result<Self> {
        let width = single_line(&geometry.width);
        let height = single_line(&geometry.height);
        let view_box = format!("0 0 {width} {height}");

        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NAMESPACE));
        root.push_attribute(("width", &*width));
        root.push_attribute(("height", &*height));
        root.push_attribute(("viewBox", view_box.as_str()));

        let path_data = single_line(&geometry.path_data);
        let mut path = BytesStart::new("path");
        path.push_attribute(("d", &*path_data));
        if let Some(fill) = geometry
            .fill_color
            .as_deref()
            .filter(|fill| !fill.trim().is_empty())
        {
            path.push_attribute(("fill", &*single_line(fill)));
        }

        let mut writer = Writer::new(PROLOGUE.as_bytes().to_vec());
        writer
            .write_event(Event::Start(root))
            .map_err(io::Error::other)?;
        writer
            .write_event(Event::Empty(path))
            .map_err(io::Error::other)?;
        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(io::Error::other)?;

        let text = String::from_utf8(writer.into_inner()).map_err(io::Error::other)?;

        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces every run of line breaks with a single space.
pub(crate) fn single_line(value: &str) -> Cow<'_, str> {
    if !value.contains(['\r', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut in_break = false;
    for c in value.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }

    Cow::Owned(out)
}
