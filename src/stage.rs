use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::*;

use crate::config::{BuildLayout, DevConfig};

const INDEX_HTML: &str = "index.html";

#[derive(Debug, Args)]
pub struct Command {
    /// Built application to stage, defaults to the configured bundle.
    #[arg(long, value_name = "DIR")]
    from: Option<PathBuf>,
    /// Overrides the configured output directory.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Staged {
    pub index: PathBuf,
    pub assets: Vec<String>,
}

pub fn execute_command(config: &DevConfig, cmd: &Command) -> Result<()> {
    let from = cmd.from.as_ref().unwrap_or(&config.dist);
    let mut layout = config.build.clone();
    if let Some(output) = &cmd.output {
        layout.output_dir = output.clone();
    }

    let staged = stage(from, &layout)?;

    info!(
        index = %staged.index.display(),
        assets = staged.assets.len(),
        "staged"
    );

    Ok(())
}

/// Copies a built bundle into `layout`: `index.html` at the root and every
/// other file below the assets directory, with references in `index.html`
/// pointed at the new locations. Existing output is removed first.
pub fn stage(from: &Path, layout: &BuildLayout) -> Result<Staged> {
    let index_source = from.join(INDEX_HTML);
    if !index_source.is_file() {
        return Err(anyhow!("no {} in {}", INDEX_HTML, from.display()));
    }

    let output = &layout.output_dir;

    let from_abs = from.canonicalize()?;
    let output_abs = resolve_path(output)?;
    if from_abs.starts_with(&output_abs) || output_abs.starts_with(&from_abs) {
        return Err(anyhow!(
            "refusing to stage {} into overlapping {}",
            from.display(),
            output.display()
        ));
    }

    fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;

    debug!(output = %output.display(), "stage: clearing");
    clear_dir(output)?;

    let assets_root = output.join(&layout.assets_dir);
    fs::create_dir_all(&assets_root)
        .with_context(|| format!("creating {}", assets_root.display()))?;

    let mut assets = Vec::new();
    copy_assets(from, from, &assets_root, &mut assets)?;
    assets.sort();

    let html = fs::read_to_string(&index_source)
        .with_context(|| format!("reading {}", index_source.display()))?;
    let html = relocate_references(&html, &layout.assets_dir, &assets);

    let index = output.join(INDEX_HTML);
    fs::write(&index, html).with_context(|| format!("writing {}", index.display()))?;

    Ok(Staged { index, assets })
}

/// Absolute form of a path that may not exist yet, resolved through its
/// nearest existing ancestor.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_owned()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = path.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("resolving {}", path.display()))?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }

    Ok(resolved)
}

fn clear_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn copy_assets(root: &Path, dir: &Path, assets_root: &Path, assets: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let relative = path.strip_prefix(root)?.to_owned();

        if path.is_dir() {
            fs::create_dir_all(assets_root.join(&relative))?;
            copy_assets(root, &path, assets_root, assets)?;
            continue;
        }

        if dir == root && relative == Path::new(INDEX_HTML) {
            continue;
        }

        trace!(file = %relative.display(), "stage: copying");
        fs::copy(&path, assets_root.join(&relative))
            .with_context(|| format!("copying {}", path.display()))?;

        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        assets.push(name);
    }

    Ok(())
}

/// Rewrites quoted absolute references to staged files, e.g. `"/app.js"`
/// becomes `"/static/app.js"`. Each reference is looked at once, in the
/// original text.
fn relocate_references(html: &str, assets_dir: &str, assets: &[String]) -> String {
    let assets_dir = assets_dir.trim_matches('/');
    let staged: HashSet<&str> = assets.iter().map(String::as_str).collect();

    let mut relocated = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find(|c: char| c == '"' || c == '\'') {
        let quote = &rest[open..=open];
        relocated.push_str(&rest[..=open]);
        rest = &rest[open + 1..];

        let reference = rest
            .strip_prefix('/')
            .and_then(|tail| tail.find(quote).map(|close| &tail[..close]))
            .filter(|path| staged.contains(*path));

        if let Some(path) = reference {
            relocated.push_str(&format!("/{assets_dir}/{path}{quote}"));
            rest = &rest[path.len() + 2..];
        }
    }

    relocated.push_str(rest);
    relocated
}
