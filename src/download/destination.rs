//! Final destination and staging directory resolution.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use url::Url;

use super::client::parse_http_url;
use super::constants::FALLBACK_FILENAME;
use super::error::TransferError;

/// Resolves where the downloaded file ends up.
///
/// `out` wins when given (relative paths are taken from `cwd`); otherwise the
/// file is named after the URL's last path segment inside `cwd`.
///
/// # Errors
///
/// Returns [`TransferError::InvalidUrl`] if `url` is not an http(s) URL.
pub fn resolve_destination(
    url: &str,
    out: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf, TransferError> {
    let parsed = parse_http_url(url)?;

    let destination = match out {
        Some(out) if out.is_absolute() => out.to_path_buf(),
        Some(out) => cwd.join(out),
        None => cwd.join(basename_from_url(&parsed)),
    };
    debug!(destination = %destination.display(), "resolved destination");
    Ok(destination)
}

/// Directory the staging file is created in: next to the destination so the
/// final move is a same-filesystem rename.
#[must_use]
pub fn staging_dir_for(destination: &Path) -> PathBuf {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Last non-empty path segment of `url`, percent-decoded and sanitized.
///
/// Query and fragment are ignored. Falls back to `index.html` for URLs that
/// end in `/` or have no path.
#[must_use]
pub fn basename_from_url(url: &Url) -> String {
    let Some(last) = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
    else {
        return FALLBACK_FILENAME.to_string();
    };

    let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
        debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
        std::borrow::Cow::Borrowed(last)
    });
    sanitize_filename(&decoded)
}

/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > | and control characters.
///
/// `.` and `..` are rewritten so the result is never a directory reference.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    if is_plain_filename(&sanitized) {
        sanitized
    } else {
        sanitized.replace('.', "_")
    }
}

fn is_plain_filename(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
