//! Version-control collaborator.
//!
//! Thin wrappers over the `git` executable. Queries that are allowed to
//! fail (remote/tag/branch inspection) return `Result` and leave the
//! degradation policy to the caller.

use std::path::Path;

use crate::process::{run, run_checked, ExternalError};

/// Shallow-clone `url` into `dest` (relative to `cwd`), optionally
/// pinned to a tag or branch.
pub fn clone(
    url: &str,
    reference: Option<&str>,
    dest: &str,
    cwd: &Path,
) -> Result<(), ExternalError> {
    let mut args = vec!["clone"];
    if let Some(reference) = reference {
        args.extend(["-b", reference]);
    }
    args.extend([url, dest, "--depth=1"]);
    run_checked("git", &args, Some(cwd))?;
    Ok(())
}

/// Whether `dir` is inside a git work tree.
pub fn is_work_tree(dir: &Path) -> bool {
    run("git", &["rev-parse", "--is-inside-work-tree"], Some(dir))
        .map(|out| out.success())
        .unwrap_or(false)
}

/// Porcelain status output; empty means the work tree is clean.
pub fn status_porcelain(dir: &Path) -> Result<String, ExternalError> {
    let output = run_checked("git", &["status", "--porcelain"], Some(dir))?;
    Ok(output.stdout)
}

/// URL of the `origin` remote.
pub fn remote_url(dir: &Path) -> Result<String, ExternalError> {
    let output = run_checked("git", &["remote", "get-url", "origin"], Some(dir))?;
    Ok(output.stdout.trim().to_string())
}

/// Tag pointing exactly at HEAD, if any.
pub fn exact_tag(dir: &Path) -> Result<String, ExternalError> {
    let output = run_checked("git", &["describe", "--tags", "--exact-match"], Some(dir))?;
    Ok(output.stdout.trim().to_string())
}

/// Upstream branch of HEAD (e.g. `origin/main`).
pub fn upstream_branch(dir: &Path) -> Result<String, ExternalError> {
    let output = run_checked("git", &["rev-parse", "--abbrev-ref", "@{u}"], Some(dir))?;
    Ok(output.stdout.trim().to_string())
}

/// Stage the given paths.
pub fn add<P: AsRef<Path>>(dir: &Path, paths: &[P]) -> Result<(), ExternalError> {
    let mut args = vec!["add".to_string()];
    args.extend(
        paths
            .iter()
            .map(|p| p.as_ref().to_string_lossy().to_string()),
    );
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_checked("git", &arg_refs, Some(dir))?;
    Ok(())
}

/// Commit staged changes with `message`.
pub fn commit(dir: &Path, message: &str) -> Result<(), ExternalError> {
    run_checked("git", &["commit", "-m", message], Some(dir))?;
    Ok(())
}

/// Initialize a repository in `dir`.
pub fn init(dir: &Path) -> Result<(), ExternalError> {
    run_checked("git", &["init"], Some(dir))?;
    Ok(())
}
