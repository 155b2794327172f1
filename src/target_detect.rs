use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::DEFAULT_KEY;
use crate::constraint::strip_operator;
use crate::version::VersionString;

/// Environment variable overriding every other source: `PV=7.2 php-dispatch ...`
pub const VERSION_ENV_VAR: &str = "PV";

const MARKER_FILE_NAME: &str = "phpver";
const MANIFEST_FILE_NAME: &str = "composer.json";

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("{} must name a version, not '{DEFAULT_KEY}'", .0.display())]
    MarkerIsDefault(PathBuf),
    #[error("reading {}", .0.display())]
    Read(PathBuf, #[source] io::Error),
    #[error("parsing {}", .0.display())]
    ManifestParse(PathBuf, #[source] serde_json::Error),
}

/// The slice of composer.json this tool cares about: `require.php`.
#[derive(Debug, Deserialize)]
struct Composer {
    #[serde(default)]
    require: Require,
}

#[derive(Debug, Deserialize, Default)]
struct Require {
    php: Option<String>,
}

/// Find the raw constraint for the current invocation.
///
/// Precedence: env override, then a `phpver` marker file in `cwd`, then the
/// `require.php` range in `cwd`'s composer.json. `Ok(None)` means no source
/// applied and the caller should fall back to the configured default. A
/// marker pinning `default` and malformed composer JSON are hard errors, not
/// fallthroughs.
pub fn detect_target(
    env_override: Option<&str>,
    cwd: &Path,
) -> Result<Option<String>, DetectError> {
    if let Some(raw) = env_override {
        if !raw.trim().is_empty() {
            return Ok(Some(raw.trim().to_string()));
        }
    }

    if let Some(raw) = read_marker(cwd)? {
        return Ok(Some(raw));
    }

    read_manifest_range(cwd)
}

pub fn env_override() -> Option<String> {
    std::env::var(VERSION_ENV_VAR).ok()
}

fn read_marker(cwd: &Path) -> Result<Option<String>, DetectError> {
    let path = cwd.join(MARKER_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|err| DetectError::Read(path.clone(), err))?;
    let content = content.trim();
    if content == DEFAULT_KEY {
        return Err(DetectError::MarkerIsDefault(path));
    }
    Ok(Some(content.to_string()))
}

fn read_manifest_range(cwd: &Path) -> Result<Option<String>, DetectError> {
    let path = cwd.join(MANIFEST_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|err| DetectError::Read(path.clone(), err))?;
    let manifest: Composer = serde_json::from_str(&content)
        .map_err(|err| DetectError::ManifestParse(path, err))?;

    let Some(range) = manifest.require.php else {
        return Ok(None);
    };
    if range.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(smallest_alternative(&range)))
}

/// Pick one alternative from a pipe-separated range like `^7.2|^8.0`.
///
/// The alternative whose bare version (operator stripped) is smallest wins,
/// reproducing the original tool's "lowest-looking bound" heuristic. This is
/// not range intersection and can pick an alternative whose operator points
/// the other way; kept as-is for compatibility.
fn smallest_alternative(range: &str) -> String {
    range
        .split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .min_by_key(|alt| VersionString::new(strip_operator(alt)))
        .unwrap_or(range.trim())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{DetectError, detect_target, smallest_alternative};
    use std::fs;

    #[test]
    fn env_override_wins_over_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phpver"), "7.4\n").unwrap();

        let got = detect_target(Some(">=8.0"), dir.path()).unwrap();
        assert_eq!(got.as_deref(), Some(">=8.0"));
    }

    #[test]
    fn empty_env_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phpver"), "7.4\n").unwrap();

        let got = detect_target(Some("  "), dir.path()).unwrap();
        assert_eq!(got.as_deref(), Some("7.4"));
    }

    #[test]
    fn marker_file_content_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phpver"), "  >=7.2  \n").unwrap();

        let got = detect_target(None, dir.path()).unwrap();
        assert_eq!(got.as_deref(), Some(">=7.2"));
    }

    #[test]
    fn marker_pinning_default_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phpver"), "default\n").unwrap();

        let err = detect_target(None, dir.path()).unwrap_err();
        assert!(matches!(err, DetectError::MarkerIsDefault(_)));
    }

    #[test]
    fn manifest_range_is_used_when_no_marker_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"require": {"php": ">=7.2"}}"#,
        )
        .unwrap();

        let got = detect_target(None, dir.path()).unwrap();
        assert_eq!(got.as_deref(), Some(">=7.2"));
    }

    #[test]
    fn manifest_with_alternatives_picks_the_smallest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"require": {"php": "^7.2|^8.0"}}"#,
        )
        .unwrap();

        let got = detect_target(None, dir.path()).unwrap();
        assert_eq!(got.as_deref(), Some("^7.2"));
    }

    #[test]
    fn manifest_without_php_requirement_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"require": {"ext-json": "*"}}"#,
        )
        .unwrap();

        let got = detect_target(None, dir.path()).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("composer.json"), "{not json").unwrap();

        let err = detect_target(None, dir.path()).unwrap_err();
        assert!(matches!(err, DetectError::ManifestParse(..)));
    }

    #[test]
    fn no_source_at_all_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let got = detect_target(None, dir.path()).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn smallest_alternative_compares_stripped_versions_numerically() {
        assert_eq!(smallest_alternative("^7.2|^8.0"), "^7.2");
        assert_eq!(smallest_alternative(">=8.0 | ^7.10 | ^7.2"), "^7.2");
        assert_eq!(smallest_alternative("^8.0"), "^8.0");
    }
}
