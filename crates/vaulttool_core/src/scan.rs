use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::BacklinkError;
use crate::identity::{NOTE_EXTENSION, TargetIdentity, resolve_target};
use crate::links::{link_tokens, parse_link_reference};

/// One referencing document. `path` is vault-relative with forward-slash
/// separators; `filename` is its final segment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BacklinkResult {
    pub path: String,
    pub filename: String,
}

/// Scan the vault for documents that reference the target note.
///
/// Walks every subdirectory of `vault_root`, skipping the target itself, and
/// records each document with at least one matching wiki-link exactly once.
/// Results are sorted by path; documents that cannot be read are skipped.
pub fn discover_backlinks(
    vault_root: &Path,
    target_path: &str,
) -> Result<Vec<BacklinkResult>, BacklinkError> {
    if !vault_root.is_dir() {
        return Err(BacklinkError::VaultNotFound(vault_root.to_path_buf()));
    }
    let target = resolve_target(vault_root, target_path)?;

    let mut results: BTreeMap<String, BacklinkResult> = BTreeMap::new();
    for entry in WalkDir::new(vault_root).follow_links(false) {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(NOTE_EXTENSION) {
            continue;
        }
        if path == target.path() {
            continue;
        }
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };
        if !references_target(&content, &target) {
            continue;
        }

        let relative = relative_from_root(vault_root, path);
        let filename = relative
            .rsplit('/')
            .next()
            .unwrap_or(relative.as_str())
            .to_string();
        results
            .entry(relative.clone())
            .or_insert(BacklinkResult {
                path: relative,
                filename,
            });
    }

    Ok(results.into_values().collect())
}

/// Short-circuits on the first matching reference.
fn references_target(content: &str, target: &TargetIdentity) -> bool {
    for token in link_tokens(content) {
        if let Some(reference) = parse_link_reference(&token)
            && target.matches(&reference.normalized_target)
        {
            return true;
        }
    }
    false
}

fn relative_from_root(vault_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(vault_root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::{BacklinkResult, discover_backlinks};
    use crate::error::BacklinkError;

    fn write_file(path: &Path, content: &str) {
        let parent = path.parent().expect("parent");
        fs::create_dir_all(parent).expect("create parent");
        fs::write(path, content).expect("write file");
    }

    fn result_paths(results: &[BacklinkResult]) -> Vec<&str> {
        results.iter().map(|result| result.path.as_str()).collect()
    }

    fn basic_vault(root: &Path) {
        write_file(&root.join("target.md"), "# Target Note\n\nThis is the target.");
        write_file(&root.join("linker.md"), "# Linker\n\nSee [[target]] for details.");
        write_file(&root.join("other.md"), "# Other\n\nNo links here.");
    }

    #[test]
    fn single_backlink_is_found_with_path_and_filename() {
        let temp = tempdir().expect("tempdir");
        basic_vault(temp.path());

        let results = discover_backlinks(temp.path(), "target.md").expect("scan");
        assert_eq!(
            results,
            vec![BacklinkResult {
                path: "linker.md".to_string(),
                filename: "linker.md".to_string(),
            }]
        );
    }

    #[test]
    fn no_backlinks_is_an_empty_result_not_an_error() {
        let temp = tempdir().expect("tempdir");
        basic_vault(temp.path());

        let results = discover_backlinks(temp.path(), "other.md").expect("scan");
        assert!(results.is_empty());
    }

    #[test]
    fn target_never_appears_in_its_own_results() {
        let temp = tempdir().expect("tempdir");
        basic_vault(temp.path());
        // Self-references must not produce a self-backlink.
        write_file(
            &temp.path().join("target.md"),
            "# Target Note\n\nSee [[target]] recursively.",
        );

        let results = discover_backlinks(temp.path(), "target.md").expect("scan");
        assert!(results.iter().all(|result| result.path != "target.md"));
    }

    #[test]
    fn all_reference_forms_match_and_results_sort_by_path() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(
            &root.join("target.md"),
            "---\naliases: [goal, objective]\n---\n# Target Note",
        );
        write_file(&root.join("note1.md"), "See [[target.md]] here.");
        write_file(&root.join("note2.md"), "See [[target]] here.");
        write_file(&root.join("note3.md"), "See [[goal]] for info.");
        write_file(&root.join("note4.md"), "See [[target|the target]] here.");
        write_file(&root.join("note5.md"), "Both [[target]] and [[target.md]] mentioned.");
        write_file(&root.join("note6.md"), "Just plain text.");
        write_file(&root.join("projects").join("project.md"), "Reference: [[target]]");

        let results = discover_backlinks(root, "target.md").expect("scan");
        assert_eq!(
            result_paths(&results),
            vec![
                "note1.md",
                "note2.md",
                "note3.md",
                "note4.md",
                "note5.md",
                "projects/project.md",
            ]
        );
    }

    #[test]
    fn document_with_many_matching_links_appears_once() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("target.md"), "# Target");
        write_file(
            &root.join("heavy.md"),
            "[[target]] then [[target.md]] then [[target|again]]",
        );

        let results = discover_backlinks(root, "target.md").expect("scan");
        assert_eq!(result_paths(&results), vec!["heavy.md"]);
    }

    #[test]
    fn deeply_nested_documents_are_discovered() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("target.md"), "# Target");
        write_file(
            &root.join("a").join("b").join("c").join("deep.md"),
            "[[target]]",
        );

        let results = discover_backlinks(root, "target.md").expect("scan");
        assert_eq!(result_paths(&results), vec!["a/b/c/deep.md"]);
    }

    #[test]
    fn similar_names_are_not_confused() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("meeting.md"), "# Meeting Notes");
        write_file(&root.join("meeting-2024.md"), "Different file");
        write_file(&root.join("agenda.md"), "See [[meeting]] notes.");
        write_file(&root.join("review.md"), "See [[meeting-2024]] notes.");

        let results = discover_backlinks(root, "meeting.md").expect("scan");
        assert_eq!(result_paths(&results), vec!["agenda.md"]);

        let results = discover_backlinks(root, "meeting-2024.md").expect("scan");
        assert_eq!(result_paths(&results), vec!["review.md"]);
    }

    #[test]
    fn code_regions_and_escapes_do_not_count() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("meeting.md"), "# Meeting Notes");
        write_file(&root.join("code.md"), "```\n[[meeting]] should not count\n```");
        write_file(&root.join("inline.md"), "The `[[meeting]]` link is in inline code.");
        write_file(&root.join("escaped.md"), "\\[[meeting]] is escaped.");
        write_file(&root.join("agenda.md"), "See [[meeting]] notes.");

        let results = discover_backlinks(root, "meeting.md").expect("scan");
        assert_eq!(result_paths(&results), vec!["agenda.md"]);
    }

    #[test]
    fn non_note_files_are_ignored() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("target.md"), "# Target");
        write_file(&root.join("notes.txt"), "[[target]]");
        write_file(&root.join("data.json"), "\"[[target]]\"");

        let results = discover_backlinks(root, "target.md").expect("scan");
        assert!(results.is_empty());
    }

    #[test]
    fn target_path_without_extension_resolves() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("target.md"), "# Target");
        write_file(&root.join("linker.md"), "[[target]]");

        let results = discover_backlinks(root, "target").expect("scan");
        assert_eq!(result_paths(&results), vec!["linker.md"]);
    }

    #[test]
    fn missing_target_fails() {
        let temp = tempdir().expect("tempdir");
        basic_vault(temp.path());

        let error = discover_backlinks(temp.path(), "nonexistent.md").expect_err("must fail");
        assert!(matches!(error, BacklinkError::TargetNotFound(_)));
    }

    #[test]
    fn missing_vault_fails() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("no-such-vault");

        let error = discover_backlinks(&missing, "target.md").expect_err("must fail");
        assert!(matches!(error, BacklinkError::VaultNotFound(_)));
    }

    #[test]
    fn vault_path_pointing_at_a_file_fails() {
        let temp = tempdir().expect("tempdir");
        let file = temp.path().join("note.md");
        write_file(&file, "content");

        let error = discover_backlinks(&file, "note.md").expect_err("must fail");
        assert!(matches!(error, BacklinkError::VaultNotFound(_)));
    }
}
