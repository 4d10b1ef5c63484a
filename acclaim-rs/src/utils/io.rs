//! File loading helpers shared by the commands

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use acclaim_amc::{Motion, parse_motion};
use acclaim_asf::{Skeleton, parse_skeleton};

/// Read and parse an ASF file
pub fn load_skeleton(path: &Path) -> Result<Skeleton> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    parse_skeleton(&text)
        .with_context(|| format!("Failed to parse ASF file: {}", path.display()))
}

/// Read and parse an AMC file against `skeleton`
pub fn load_motion(path: &Path, skeleton: &Skeleton) -> Result<Motion> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    parse_motion(&text, skeleton)
        .with_context(|| format!("Failed to parse AMC file: {}", path.display()))
}

/// File name for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_skeleton_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ":bonedata\nbegin\nname a\nlength x\nend").unwrap();

        let err = load_skeleton(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to parse ASF file"));
        assert!(message.contains("line 4"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/data/walk.asf")), "walk.asf");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
