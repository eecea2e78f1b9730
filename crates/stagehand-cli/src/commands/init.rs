//! Init command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use stagehand_external::{git, process};
use stagehand_manifest::{Manifest, TemplateRepo};
use stagehand_templates::{TemplateStore, STORE_DIR};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Template repository cloned when `--template-repo` is not given.
const DEFAULT_TEMPLATE_REPO: &str = "https://github.com/stagehand-engine/stagehand-templates";

/// Initialize a new Stagehand project
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Project name
    pub name: String,

    /// Use a customized repository for cloning templates
    #[arg(short = 't', long, default_value = DEFAULT_TEMPLATE_REPO)]
    pub template_repo: String,

    /// Tag or branch of the template repository to clone
    #[arg(short = 'b', long)]
    pub template_tag: Option<String>,

    /// Automatically commit generated code
    #[arg(short = 'g', long)]
    pub auto_commit: bool,

    /// Use a CDN for the WebGL runtime
    #[arg(long)]
    pub use_cdn: bool,

    /// Use the minimal runtime without the builtin font
    #[arg(long = "min")]
    pub minimal: bool,

    /// Create the project in the current directory
    #[arg(short = 'c', long)]
    pub current_dir: bool,
}

impl InitCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        tools::require("elm", &["--help"])?;
        tools::require("elm-format", &["--help"])?;

        let placement = if self.current_dir {
            format!(
                "Use the current directory (project name {} will be ignored)",
                self.name
            )
        } else {
            format!("Create a directory named {}", self.name)
        };
        confirm(
            &format!(
                "Thanks for using Stagehand.\n\
                 Here is the plan:\n\n\
                 - {placement}\n\
                 - Clone the template store into {STORE_DIR}\n\
                 - Install the runtime sources and web assets\n\n\
                 Continue?"
            ),
            ctx.assume_yes,
        )?;

        let root: PathBuf = if self.current_dir {
            PathBuf::from(".")
        } else {
            fs::create_dir_all(&self.name)?;
            PathBuf::from(&self.name)
        };

        println!("Cloning templates...");
        git::clone(
            &self.template_repo,
            self.template_tag.as_deref(),
            STORE_DIR,
            &root,
        )?;
        let store = TemplateStore::new(&root);

        let src = root.join("src");
        if src.exists() {
            return Err(CliError::user_with_hint(
                "src directory already exists",
                "remove or rename it first",
            ));
        }
        copy_tree(&store.runtime_src(), &src)?;

        let public = root.join("public");
        fs::create_dir_all(&public)?;
        for file in ["audio.js", "stagehand.js", "style.css"] {
            fs::copy(store.public().join(file), public.join(file))?;
        }
        let index = if self.use_cdn {
            if self.minimal {
                "index.min.html"
            } else {
                "index.html"
            }
        } else {
            "index.local.html"
        };
        fs::copy(store.public().join(index), public.join("index.html"))?;
        if !self.use_cdn {
            let regl = if self.minimal { "regl.min.js" } else { "regl.js" };
            fs::copy(store.public().join(regl), public.join("regl.js"))?;
        }
        for file in [".gitignore", "Makefile", "elm.json"] {
            fs::copy(store.project_file(file), root.join(file))?;
        }
        fs::create_dir_all(root.join("src/Scenes"))?;
        fs::create_dir_all(root.join("assets/fonts"))?;

        println!("Creating stagehand.json...");
        let mut manifest = Manifest::default();
        manifest.template_repo = TemplateRepo {
            url: self.template_repo.clone(),
            tag: self.template_tag.clone().unwrap_or_default(),
        };
        manifest.auto_commit = self.auto_commit;
        manifest.save(&root)?;

        println!("Installing dependencies...");
        // A failed first build (e.g. offline package fetch) leaves a
        // usable project, so the exit status is deliberately ignored.
        let _ = process::run("elm", &["make"], Some(&root));

        if self.auto_commit {
            if !git::is_work_tree(&root) {
                println!("Initializing git repository...");
                git::init(&root)?;
            }
            println!("Adding files to git...");
            git::add(
                &root,
                &[
                    "src",
                    "public",
                    ".gitignore",
                    "Makefile",
                    "elm.json",
                    "assets/fonts",
                    "stagehand.json",
                ],
            )?;
            println!("Making git commit...");
            git::commit(&root, "build(Stagehand): initialize project")?;
        }

        println!("Done!");
        if self.current_dir {
            println!("Now add scenes and components.");
        } else {
            println!("Now go to {} and add scenes and components.", self.name);
        }
        Ok(())
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<(), CliError> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
