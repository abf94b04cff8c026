use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use ignore::{DirEntry, WalkBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

const LOSSY_UTF8_LABELS: [&str; 2] = ["utf-8-lossy", "utf8-lossy"];

/// How hand history files are decoded.
///
/// Accepts any WHATWG encoding label (`utf-8`, `cp1251`, `koi8-r`, ...).
/// Decoding is strict: malformed bytes fail the file. The extra label
/// `utf-8-lossy` replaces them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct InputEncoding {
    encoding: &'static Encoding,
    lossy: bool,
}

impl InputEncoding {
    pub fn utf8_lossy() -> Self {
        Self {
            encoding: UTF_8,
            lossy: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode `bytes`, or `None` if they are malformed in strict mode.
    /// A byte-order mark overrides the configured encoding.
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, _, had_errors) = self.encoding.decode(bytes);
        if had_errors && !self.lossy {
            return None;
        }
        Some(text.into_owned())
    }
}

impl Default for InputEncoding {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            lossy: false,
        }
    }
}

impl FromStr for InputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if LOSSY_UTF8_LABELS
            .iter()
            .any(|lossy| lossy.eq_ignore_ascii_case(label))
        {
            return Ok(Self::utf8_lossy());
        }
        Encoding::for_label(label.as_bytes())
            .map(|encoding| Self {
                encoding,
                lossy: false,
            })
            .ok_or_else(|| format!("Unknown encoding: {}", s))
    }
}

impl TryFrom<String> for InputEncoding {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Which files under the input root count as hand histories.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub recursive: bool,
    pub all_files: bool,
    pub extensions: Vec<String>,
}

impl DiscoveryOptions {
    fn accepts(&self, path: &Path) -> bool {
        if self.all_files {
            return true;
        }
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// List hand history files under `root`, sorted by path.
///
/// A file given as the root is returned as-is.
pub fn discover_hand_files(root: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("Path {} does not exist", root.display());
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = if options.recursive {
        walk_files(WalkBuilder::new(root).standard_filters(false).build())
    } else {
        let entries = std::fs::read_dir(root)
            .with_context(|| format!("Failed to read directory: {}", root.display()))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths
    };

    files.retain(|path| options.accepts(path));
    files.sort();

    debug!(root = %root.display(), files = files.len(), "Discovered hand files");
    Ok(files)
}

/// Files from a directory walk; entries the walk cannot read are logged and skipped.
fn walk_files<I>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = Result<DirEntry, ignore::Error>>,
{
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.into_path();
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }
    files
}

/// Read and decode one hand history file.
pub fn read_hand_file(path: &Path, encoding: InputEncoding) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    encoding.decode(&bytes).with_context(|| {
        format!("{} is not valid {}", path.display(), encoding.name())
    })
}

/// Read every file, skipping (and logging) the ones that cannot be read.
pub fn read_sources(paths: &[PathBuf], encoding: InputEncoding) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| match read_hand_file(path, encoding) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Skipping file {}: {:#}", path.display(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn txt_only() -> DiscoveryOptions {
        DiscoveryOptions {
            recursive: false,
            all_files: false,
            extensions: vec!["txt".to_string()],
        }
    }

    fn create_hands_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "Hand #2").unwrap();
        fs::write(dir.path().join("a.TXT"), "Hand #1").unwrap();
        fs::write(dir.path().join("notes.md"), "notes").unwrap();
        fs::create_dir(dir.path().join("2024")).unwrap();
        fs::write(dir.path().join("2024").join("c.txt"), "Hand #3").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "Hand #4").unwrap();
        dir
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_discover_top_level_only() {
        let dir = create_hands_dir();
        let files = discover_hand_files(dir.path(), &txt_only()).unwrap();
        assert_eq!(names(dir.path(), &files), vec![".hidden.txt", "a.TXT", "b.txt"]);
    }

    #[test]
    fn test_discover_recursive() {
        let dir = create_hands_dir();
        let options = DiscoveryOptions {
            recursive: true,
            ..txt_only()
        };
        let files = discover_hand_files(dir.path(), &options).unwrap();
        assert_eq!(
            names(dir.path(), &files),
            vec![".hidden.txt", "2024/c.txt", "a.TXT", "b.txt"]
        );
    }

    #[test]
    fn test_discover_all_files() {
        let dir = create_hands_dir();
        let options = DiscoveryOptions {
            all_files: true,
            ..txt_only()
        };
        let files = discover_hand_files(dir.path(), &options).unwrap();
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = TempDir::new().unwrap();
        let result = discover_hand_files(&dir.path().join("nope"), &txt_only());
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_single_file_root() {
        let dir = create_hands_dir();
        let file = dir.path().join("notes.md");
        let files = discover_hand_files(&file, &txt_only()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_read_sources_skips_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "Hand #1").unwrap();
        fs::write(&bad, b"H\xff\xfe!").unwrap();
        let paths = vec![bad, good, dir.path().join("missing.txt")];

        let strict = read_sources(&paths, InputEncoding::default());
        assert_eq!(strict, vec!["Hand #1".to_string()]);

        let lossy = read_sources(&paths, InputEncoding::utf8_lossy());
        assert_eq!(lossy.len(), 2);
        assert!(lossy[0].starts_with('H'));
        assert!(lossy[0].contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_cp1251_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pokerdom.txt");
        // "Hand #1 Герой won 1" in Windows-1251
        let mut bytes = b"Hand #1 ".to_vec();
        bytes.extend_from_slice(&[0xC3, 0xE5, 0xF0, 0xEE, 0xE9]);
        bytes.extend_from_slice(b" won 1");
        fs::write(&path, &bytes).unwrap();

        let cp1251: InputEncoding = "cp1251".parse().unwrap();
        assert_eq!(cp1251.name(), "windows-1251");
        assert_eq!(read_hand_file(&path, cp1251).unwrap(), "Hand #1 Герой won 1");

        assert!(read_hand_file(&path, InputEncoding::default()).is_err());
        let paths = vec![path];
        assert!(read_sources(&paths, InputEncoding::default()).is_empty());
        assert_eq!(read_sources(&paths, cp1251).len(), 1);
    }

    #[test]
    fn test_parse_encoding_labels() {
        assert_eq!("UTF-8".parse::<InputEncoding>(), Ok(InputEncoding::default()));
        assert_eq!(
            "utf8-lossy".parse::<InputEncoding>(),
            Ok(InputEncoding::utf8_lossy())
        );
        assert_eq!(
            "windows-1251".parse::<InputEncoding>().unwrap(),
            "cp1251".parse::<InputEncoding>().unwrap()
        );
        assert!("klingon".parse::<InputEncoding>().is_err());
    }

    #[test]
    fn test_walk_errors_are_skipped() {
        let dir = create_hands_dir();
        let denied = ignore::Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let entries = WalkBuilder::new(dir.path())
            .standard_filters(false)
            .build()
            .chain(std::iter::once(Err(denied)));

        let files = walk_files(entries);
        assert_eq!(files.len(), 5);
    }
}
