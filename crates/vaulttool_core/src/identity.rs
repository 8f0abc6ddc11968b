use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BacklinkError;
use crate::frontmatter::parse_front_matter;

pub const NOTE_EXTENSION: &str = "md";

/// The set of names under which a target note can be referenced: its base
/// name plus every alias declared in its front matter. Built once per query.
#[derive(Debug, Clone)]
pub struct TargetIdentity {
    path: PathBuf,
    names: BTreeSet<String>,
}

impl TargetIdentity {
    /// Absolute path of the resolved target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exact, case-sensitive membership test against the identity set; no
    /// substring or prefix matching.
    pub fn matches(&self, reference: &str) -> bool {
        self.names.contains(reference)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Resolve the requested vault-relative target path to a file on disk and
/// build its identity set. A path without an extension falls back to the
/// standard note extension when the exact path does not exist.
pub fn resolve_target(
    vault_root: &Path,
    target_path: &str,
) -> Result<TargetIdentity, BacklinkError> {
    let requested = vault_root.join(target_path);
    let resolved = if requested.is_file() {
        requested
    } else if requested.extension().is_none() {
        let with_extension = requested.with_extension(NOTE_EXTENSION);
        if with_extension.is_file() {
            with_extension
        } else {
            return Err(BacklinkError::TargetNotFound(requested));
        }
    } else {
        return Err(BacklinkError::TargetNotFound(requested));
    };

    let content = fs::read_to_string(&resolved).map_err(|source| BacklinkError::Io {
        path: resolved.clone(),
        source,
    })?;
    let front_matter = parse_front_matter(&content);

    let base_name = resolved
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut names = BTreeSet::new();
    names.insert(base_name);
    // Aliases are names, not filenames: kept verbatim, never extension-stripped.
    names.extend(front_matter.aliases);

    Ok(TargetIdentity {
        path: resolved,
        names,
    })
}
