use crate::types::{ExportedEntry, Palette};
use snafu::prelude::*;
use std::path::{Path, PathBuf};

pub const PALETTE_FILE_NAME: &str = "palette.json";

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ExportError {
    #[snafu(display("failed to serialize palette"))]
    Serialize { source: serde_json::Error },

    #[snafu(display("failed to write palette to {}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Palette {
    /// Pretty-printed JSON array of `{ "hex", "rgb", "count" }` objects, in
    /// palette order.
    pub fn to_json(&self) -> Result<String, ExportError> {
        let entries: Vec<ExportedEntry> = self.iter().map(ExportedEntry::from).collect();
        serde_json::to_string_pretty(&entries).context(SerializeSnafu)
    }

    /// Writes [`Palette::to_json`] to `path`. Use [`PALETTE_FILE_NAME`] for the
    /// conventional file name.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).context(WriteSnafu { path })?;
        tracing::debug!(path = %path.display(), entries = self.len(), "palette written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rgb::RGB8;

    fn sample_palette() -> Palette {
        Palette::from_centroids(
            &[RGB8 { r: 0, g: 255, b: 0 }, RGB8 { r: 255, g: 0, b: 0 }],
            &[1, 2],
        )
    }

    #[test]
    fn json_layout() {
        let json = sample_palette().to_json().unwrap();
        let expected = r##"[
  {
    "hex": "#FF0000",
    "rgb": [
      255,
      0,
      0
    ],
    "count": 2
  },
  {
    "hex": "#00FF00",
    "rgb": [
      0,
      255,
      0
    ],
    "count": 1
  }
]"##;
        assert_eq!(json, expected);
    }

    #[test]
    fn empty_palette_is_empty_array() {
        assert_eq!(Palette::default().to_json().unwrap(), "[]");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PALETTE_FILE_NAME);
        sample_palette().write_json(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["hex"], "#FF0000");
        assert_eq!(written[1]["count"], 1);
    }

    #[test]
    fn write_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(PALETTE_FILE_NAME);
        let err = sample_palette().write_json(&path).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
