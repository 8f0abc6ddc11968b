//! Backlink discovery over a vault of plain-text markdown notes.
//!
//! Given a target note, find every other note that references it through an
//! inline `[[wiki-link]]`, by base name, by `.md`-suffixed name, or by any
//! alias declared in the target's front matter. References inside fenced
//! code blocks or inline code spans, and escaped `\[[...]]` occurrences, are
//! ignored. Each query is a self-contained read-only scan; nothing is cached
//! between invocations.

pub mod error;
pub mod frontmatter;
pub mod identity;
pub mod links;
pub mod request;
pub mod scan;

pub use error::BacklinkError;
pub use request::{BacklinkRequest, run_request};
pub use scan::{BacklinkResult, discover_backlinks};
