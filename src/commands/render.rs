use crate::{cli::RenderArgs, config::Config, progress_bar::ProgressBar};
use anyhow::{bail, Context};
use indicatif::MultiProgress;
use log::{debug, info, warn};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, task::JoinSet};
use vdpreview::{Icon, IconLoader};
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: &[&str] = &["xml", "png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub async fn render(args: RenderArgs, multi_progress: MultiProgress) -> anyhow::Result<()> {
    let config = Config::read().await?;
    let output_path = args.output.unwrap_or(config.output_path);

    let files = collect_files(&args.paths);
    if files.is_empty() {
        bail!("No files to render");
    }
    let total = files.len();
    let (jobs, clashes) = assign_targets(files, &output_path)?;

    fs::create_dir_all(&output_path)
        .await
        .context("Failed to create output directory")?;

    let mut loader = IconLoader::default();
    if let Some(temp_dir) = args.temp_dir.or(config.temp_dir) {
        loader = loader.with_temp_dir(temp_dir);
    }
    let loader = Arc::new(loader);

    let mut failed = 0;
    for (path, target) in clashes {
        warn!(
            "Skipping file {} because {} is already written by another file",
            path.display(),
            target.display()
        );
        failed += 1;
    }

    let prefix = if args.original {
        "Rendering icons"
    } else {
        "Rendering thumbnails"
    };
    let pb = ProgressBar::new(&multi_progress, prefix, jobs.len())?;

    let mut tasks = JoinSet::new();
    for (path, target) in jobs {
        let loader = loader.clone();
        let original = args.original;

        tasks.spawn_blocking(move || {
            let icon = if original {
                loader.load_original(&path)
            } else {
                loader.load_thumbnail(&path)
            };
            (path, target, icon)
        });
    }

    while let Some(result) = tasks.join_next().await {
        let (path, target, icon) = result.context("Render task panicked")?;
        pb.advance(&path);

        let Some(icon) = icon else {
            warn!("Skipping file {} because it produced no icon", path.display());
            failed += 1;
            continue;
        };

        if let Err(err) = write_icon(&icon, &target).await {
            warn!("Skipping file {} because {err:?}", path.display());
            failed += 1;
            continue;
        }

        debug!("Rendered {} to {}", path.display(), target.display());
    }

    pb.finish();

    info!(
        "Rendered {} of {total} files into {}",
        total - failed,
        output_path.display()
    );

    if failed > 0 {
        bail!("{failed} files could not be rendered");
    }

    Ok(())
}

async fn write_icon(icon: &Icon, target: &Path) -> anyhow::Result<()> {
    let png = icon.encode_png().context("Failed to encode PNG")?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(target, png)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(())
}

#[derive(Debug, PartialEq)]
struct InputFile {
    path: PathBuf,
    /// Where the file sits below the directory it was found in. Just the file
    /// name for files named on the command line.
    relative: PathBuf,
}

/// Expands directories into the supported files below them, sorted for stable output.
/// Explicitly named files are always kept.
fn collect_files(paths: &[PathBuf]) -> Vec<InputFile> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            let relative = path.file_name().map(PathBuf::from).unwrap_or_default();
            files.push(InputFile {
                path: path.clone(),
                relative,
            });
            continue;
        }

        let mut found = WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && is_supported(entry.path()))
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(path).ok()?.to_path_buf();
                Some(InputFile {
                    path: entry.into_path(),
                    relative,
                })
            })
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.path.cmp(&b.path));

        files.extend(found);
    }

    files
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

type Job = (PathBuf, PathBuf);

/// Pairs every file with its PNG target. Files whose target is already taken by an
/// earlier file are returned separately.
fn assign_targets(
    files: Vec<InputFile>,
    output_path: &Path,
) -> anyhow::Result<(Vec<Job>, Vec<Job>)> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::new();
    let mut clashes = Vec::new();

    for file in files {
        let target = output_file(output_path, &file.relative)?;
        if seen.insert(target.clone()) {
            jobs.push((file.path, target));
        } else {
            clashes.push((file.path, target));
        }
    }

    Ok((jobs, clashes))
}

fn output_file(output_path: &Path, relative: &Path) -> anyhow::Result<PathBuf> {
    let stem = relative
        .file_stem()
        .with_context(|| format!("File {} has no name", relative.display()))?;
    let file_name = format!("{}.png", stem.to_string_lossy());

    Ok(match relative.parent() {
        Some(parent) => output_path.join(parent).join(file_name),
        None => output_path.join(file_name),
    })
}
