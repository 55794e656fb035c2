//! Runtime configuration for the snapshot mirror.
//!
//! All values are externally supplied (flags or environment) and passed
//! through untouched; nothing here is derived from document content.

use std::path::PathBuf;
use tracing::warn;

/// Where the mirrored configuration file lands.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory holding the mirrored file
    pub dir: PathBuf,
    /// Filename inside `dir`
    pub filename: String,
}

impl OutputConfig {
    /// Resolve the output location, deriving the filename from the current
    /// username when none is given.
    pub fn new(dir: impl Into<PathBuf>, filename: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.unwrap_or_else(default_output_filename),
        }
    }

    /// Full path of the mirrored configuration file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Default output filename: `<username>.yaml`, with a fixed fallback when
/// the username cannot be determined.
pub fn default_output_filename() -> String {
    let user = std::env::var("USER").unwrap_or_else(|_| {
        warn!("Cannot determine current user, falling back to \"gateway\"");
        "gateway".to_string()
    });
    format!("{user}.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filename_wins_over_the_default() {
        let output = OutputConfig::new("/etc/gateway/conf.d", Some("edge.yaml".to_string()));
        assert_eq!(
            output.path(),
            PathBuf::from("/etc/gateway/conf.d/edge.yaml")
        );
    }

    #[test]
    fn default_filename_is_yaml_suffixed() {
        let output = OutputConfig::new("/tmp", None);
        assert!(output.filename.ends_with(".yaml"));
        assert!(output.path().starts_with("/tmp"));
    }
}
