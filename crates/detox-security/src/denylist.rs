use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Exact-match set of artifact strings
#[derive(Debug, Clone, Default)]
pub struct ArtifactDenylist {
    entries: HashSet<String>,
}

impl ArtifactDenylist {
    /// Create a denylist from entries. Empty entries are dropped, they can never match a token.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(Into::into)
            .filter(|entry: &String| !entry.is_empty())
            .collect();

        Self { entries }
    }

    /// Read one entry per line, stripping trailing whitespace
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            entries.push(line?.trim_end().to_string());
        }
        Ok(Self::new(entries))
    }

    /// Load an artifact list file
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let denylist = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), entries = denylist.len(), "Loaded artifact list");
        Ok(denylist)
    }

    /// Case-sensitive, no normalization
    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
