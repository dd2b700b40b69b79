//! Source storage for a generation run.
//!
//! Stores Go sources as owned strings. Every file of the package being
//! processed lives here, so diagnostics can point back into any of them.

use std::path::{Path, PathBuf};

use strenum_core::SourceId;
use tracing::debug;

use crate::build_constraints::BuildContext;
use crate::{Error, Result};

/// Describes the origin of a source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// An in-memory snippet (tests, library callers).
    OneLiner,
    /// Input read from stdin.
    Stdin,
    /// A file with its path.
    File(String),
}

impl SourceKind {
    /// Returns the display name for diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            SourceKind::OneLiner => "<source>",
            SourceKind::Stdin => "<stdin>",
            SourceKind::File(path) => path,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            SourceKind::File(path) => Some(path),
            _ => None,
        }
    }
}

/// A borrowed view of a source: id, kind, and content.
#[derive(Clone, Debug)]
pub struct Source<'s> {
    pub id: SourceId,
    pub kind: &'s SourceKind,
    pub content: &'s str,
}

impl<'s> Source<'s> {
    pub fn as_str(&self) -> &'s str {
        self.content
    }
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

/// Registry of all sources.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load Go sources from files and directories.
    ///
    /// Directories contribute the `*.go` files `go build` would compile,
    /// sorted by path: test files, files starting with `_` or `.` and files
    /// whose build constraints exclude the target are left out. Files named
    /// explicitly are taken as given.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let build = BuildContext::from_env();
        let mut map = Self::new();
        for path in paths {
            let path = path.as_ref();
            if !path.is_dir() {
                map.add_file(&path.to_string_lossy(), &read(path)?);
                continue;
            }
            for file in go_files_in(path)? {
                let content = read(&file)?;
                let name = file.file_name().unwrap_or_default().to_string_lossy();
                if !build.includes(&name, &content) {
                    debug!(path = %file.display(), "excluded by build constraints");
                    continue;
                }
                map.add_file(&file.to_string_lossy(), &content);
            }
        }

        if map.is_empty() {
            return Err(Error::NoSources(
                paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            ));
        }

        debug!(files = map.len(), "loaded Go sources");
        Ok(map)
    }

    /// Add an in-memory source.
    pub fn add_one_liner(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::OneLiner, content)
    }

    /// Add a source read from stdin.
    pub fn add_stdin(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Stdin, content)
    }

    /// Add a file source with its path.
    pub fn add_file(&mut self, path: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::File(path.to_owned()), content)
    }

    /// Create a SourceMap with a single in-memory source.
    pub fn one_liner(content: &str) -> Self {
        let mut map = Self::new();
        map.add_one_liner(content);
        map
    }

    /// Get a source by ID, `None` if the ID belongs to another map.
    pub fn try_get(&self, id: SourceId) -> Option<Source<'_>> {
        self.entries.get(id.index()).map(|entry| Source {
            id,
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    /// Get the content of a source by ID.
    pub fn content(&self, id: SourceId) -> Option<&str> {
        self.try_get(id).map(|s| s.content)
    }

    /// Get the file path if this source is a file.
    pub fn path(&self, id: SourceId) -> Option<&str> {
        self.entries.get(id.index()).and_then(|e| e.kind.path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all sources in load order.
    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> {
        self.entries.iter().enumerate().map(|(idx, entry)| Source {
            id: SourceId::from_raw(idx as u32),
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    fn push_entry(&mut self, kind: SourceKind, content: &str) -> SourceId {
        let id = SourceId::from_raw(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            kind,
            content: content.to_owned(),
        });
        id
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn go_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && is_package_source(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_package_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // Go ignores files starting with `_` or `.`.
    name.ends_with(".go") && !name.ends_with("_test.go") && !name.starts_with(['_', '.'])
}
