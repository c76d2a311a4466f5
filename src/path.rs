//! Path normalization for the flat, slash-delimited namespace.

use crate::config::ROOT;
use crate::{Error, Result};

/// Normalizes `path` to the unrooted form names are stored in.
/// `""`, `"/"` and `"."` become the root `"."`; one leading and one trailing `/` are dropped.
/// Empty, `.` and `..` components are rejected.
pub fn normalize(path: &str) -> Result<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed == ROOT {
        return Ok(ROOT);
    }
    if trimmed
        .split('/')
        .any(|c| c.is_empty() || c == "." || c == "..")
    {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(trimmed)
}

/// Prefix a stored name must start with to live below `dir`. Empty for the root.
pub fn dir_prefix(dir: &str) -> String {
    if dir == ROOT {
        String::new()
    } else {
        format!("{}/", dir)
    }
}

/// Last component of a normalized path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
