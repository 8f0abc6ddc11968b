use std::path::Path;

use serde::Deserialize;

use crate::error::BacklinkError;
use crate::scan::{BacklinkResult, discover_backlinks};

/// Argument bundle of one backlink query as the surrounding tool layer
/// supplies it. Both fields are required; presence is validated here so a
/// caller deserializing loose input gets a named error instead of a default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BacklinkRequest {
    pub target_path: Option<String>,
    pub vault_path: Option<String>,
}

pub fn run_request(request: &BacklinkRequest) -> Result<Vec<BacklinkResult>, BacklinkError> {
    let target_path = request
        .target_path
        .as_deref()
        .ok_or(BacklinkError::MissingArgument("target_path"))?;
    let vault_path = request
        .vault_path
        .as_deref()
        .ok_or(BacklinkError::MissingArgument("vault_path"))?;
    discover_backlinks(Path::new(vault_path), target_path)
}
