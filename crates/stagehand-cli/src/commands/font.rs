//! Font command implementation.
//!
//! Glue around the external `msdf-bmfont` packer. Every font in a batch
//! is packed into the same atlas slot via the packer's `--reuse`
//! config, and the metrics files are patched afterwards so the recorded
//! atlas dimensions agree across the batch.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use stagehand_external::process;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Install fonts through the atlas packer
#[derive(Debug, Parser)]
pub struct FontCommand {
    /// Font files to install
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Font size to render glyphs at
    #[arg(short = 's', long, default_value_t = 40)]
    pub size: u32,

    /// Set the distance range
    #[arg(long, default_value_t = 4)]
    pub range: u32,

    /// Charset file restricting the packed glyphs
    #[arg(short = 'i', long)]
    pub charset: Option<PathBuf>,
}

impl FontCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        tools::require("msdf-bmfont", &["-h"])?;

        let mut names = Vec::new();
        for file in &self.files {
            let name = file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    CliError::user(format!(
                        "font file has no usable name: {}",
                        file.display()
                    ))
                })?;
            println!("{name} from {}", file.display());
            names.push(name);
        }
        confirm(
            "You are going to install the above font(s), continue?",
            ctx.assume_yes,
        )?;

        let project = Project::open(".")?;
        let fonts_dir = project.root().join("assets/fonts");
        fs::create_dir_all(&fonts_dir)?;

        // First unused atlas slot.
        let mut slot = 0u32;
        while fonts_dir.join(format!("font_{slot}.png")).exists() {
            slot += 1;
        }
        let texture = fonts_dir.join(format!("font_{slot}.png"));
        let cfg = fonts_dir.join(format!("font_{slot}.cfg"));

        for (file, name) in self.files.iter().zip(&names) {
            self.pack(file, name, &fonts_dir, &texture, &cfg)?;
        }
        if cfg.exists() {
            fs::remove_file(&cfg)?;
        }

        unify_atlas_dimensions(&fonts_dir, &names)?;

        for name in &names {
            println!(
                "Success. Now add `(\"{name}\", FontRes \"assets/fonts/font_{slot}.png\" \
                 \"assets/fonts/{name}.json\")` to `allFonts` in `src/Lib/Resources.elm`."
            );
        }
        Ok(())
    }

    fn pack(
        &self,
        file: &Path,
        name: &str,
        fonts_dir: &Path,
        texture: &Path,
        cfg: &Path,
    ) -> Result<(), CliError> {
        let staged = match file.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => fonts_dir.join(format!("{name}.{ext}")),
            None => fonts_dir.join(name),
        };
        fs::copy(file, &staged)?;

        let size = self.size.to_string();
        let range = self.range.to_string();
        let texture_arg = texture.to_string_lossy().to_string();
        let cfg_arg = cfg.to_string_lossy().to_string();
        let staged_arg = staged.to_string_lossy().to_string();
        let charset_arg;

        let mut args = vec![
            "--smart-size",
            "--pot",
            "-d",
            "2",
            "-s",
            &size,
            "-r",
            &range,
        ];
        if let Some(charset) = &self.charset {
            charset_arg = charset.to_string_lossy().to_string();
            args.extend(["-i", &charset_arg]);
        }
        args.extend(["-f", "json", "--reuse", &cfg_arg, "-o", &texture_arg, &staged_arg]);

        let result = process::run_checked("msdf-bmfont", &args, None);
        // The staged copy is temporary either way.
        let _ = fs::remove_file(&staged);
        result?;

        compress_json(&fonts_dir.join(format!("{name}.json")))?;
        Ok(())
    }
}

/// Rewrite a metrics file without whitespace.
fn compress_json(path: &Path) -> Result<(), CliError> {
    let value = read_metrics(path)?;
    fs::write(path, render_metrics(path, &value)?)?;
    Ok(())
}

/// Patch `common.scaleW`/`common.scaleH` in every batch member to the
/// last font's values. The packer records per-run dimensions, but a
/// shared atlas must agree on one size.
fn unify_atlas_dimensions(fonts_dir: &Path, names: &[String]) -> Result<(), CliError> {
    let Some(last) = names.last() else {
        return Ok(());
    };
    let last_value = read_metrics(&fonts_dir.join(format!("{last}.json")))?;
    let scale_w = last_value["common"]["scaleW"].clone();
    let scale_h = last_value["common"]["scaleH"].clone();

    for name in names {
        let path = fonts_dir.join(format!("{name}.json"));
        let mut value = read_metrics(&path)?;
        value["common"]["scaleW"] = scale_w.clone();
        value["common"]["scaleH"] = scale_h.clone();
        fs::write(&path, render_metrics(&path, &value)?)?;
    }
    Ok(())
}

fn read_metrics(path: &Path) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(&fs::read_to_string(path)?).map_err(|err| {
        CliError::user(format!("invalid font metrics in {}: {err}", path.display()))
    })
}

fn render_metrics(path: &Path, value: &serde_json::Value) -> Result<String, CliError> {
    serde_json::to_string(value).map_err(|err| {
        CliError::user(format!(
            "could not re-encode font metrics for {}: {err}",
            path.display()
        ))
    })
}
