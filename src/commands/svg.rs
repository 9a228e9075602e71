use crate::cli::SvgArgs;
use anyhow::Context;
use tokio::fs;
use vdpreview::{SvgDocument, VectorGeometry};

pub async fn svg(args: SvgArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let geometry = VectorGeometry::parse(&text).context("Failed to parse vector drawable")?;
    let svg = SvgDocument::from_geometry(&geometry).context("Failed to write SVG document")?;

    println!("{svg}");

    Ok(())
}
