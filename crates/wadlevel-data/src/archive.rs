//! Access to the named lumps of a container (WAD, PK3 directory, ...).
//!
//! Decoding never opens files itself; it works against a [`LumpSource`],
//! which lists entries in directory order and hands out their bytes.

use std::borrow::Cow;
use std::collections::HashMap;

use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("lump index {index} out of range ({count} lumps)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("cannot open nested container {name}: {msg}")]
    Nested { name: String, msg: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A directory entry: the lump's name and its size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumpEntry {
    pub name: String,
    pub size: usize,
}

pub trait LumpSource {
    /// Entries in directory order.
    fn entries(&self) -> &[LumpEntry];

    fn data(&self, index: usize) -> Result<Cow<'_, [u8]>, ArchiveError>;

    /// Open the entry at `index` as a container of its own, if it is one.
    fn open_nested(&self, index: usize) -> Result<Option<Box<dyn LumpSource + '_>>, ArchiveError> {
        let _ = index;
        Ok(None)
    }

    /// Index of the last entry named exactly `name`.
    fn find_by_name(&self, name: &str) -> Option<usize> {
        self.entries().iter().rposition(|e| e.name == name)
    }

    /// Index of the last entry whose name, stripped of directories and
    /// extension, equals `basename` ignoring case.
    fn find_basename(&self, basename: &str) -> Option<usize> {
        self.entries()
            .iter()
            .rposition(|e| file_stem(&e.name).eq_ignore_ascii_case(basename))
    }

    fn find_all_matching(&self, pattern: &Regex) -> Vec<usize> {
        self.entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| pattern.is_match(&e.name))
            .map(|(i, _)| i)
            .collect()
    }
}

/// `maps/MAP01.wad` -> `MAP01`.
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// Lumps held in memory, with optional nested containers.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: Vec<LumpEntry>,
    data: Vec<Vec<u8>>,
    nested: HashMap<usize, MemoryArchive>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> usize {
        let data = data.into();
        self.entries.push(LumpEntry {
            name: name.into(),
            size: data.len(),
        });
        self.data.push(data);
        self.entries.len() - 1
    }

    pub fn with_lump(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.push(name, data);
        self
    }

    /// Add an entry that opens as `archive`.
    pub fn with_nested(mut self, name: impl Into<String>, archive: MemoryArchive) -> Self {
        let index = self.push(name, Vec::new());
        self.nested.insert(index, archive);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LumpSource for MemoryArchive {
    fn entries(&self) -> &[LumpEntry] {
        &self.entries
    }

    fn data(&self, index: usize) -> Result<Cow<'_, [u8]>, ArchiveError> {
        self.data
            .get(index)
            .map(|d| Cow::Borrowed(d.as_slice()))
            .ok_or(ArchiveError::IndexOutOfRange {
                index,
                count: self.data.len(),
            })
    }

    fn open_nested(&self, index: usize) -> Result<Option<Box<dyn LumpSource + '_>>, ArchiveError> {
        if index >= self.entries.len() {
            return Err(ArchiveError::IndexOutOfRange {
                index,
                count: self.entries.len(),
            });
        }
        Ok(self
            .nested
            .get(&index)
            .map(|archive| Box::new(archive) as Box<dyn LumpSource + '_>))
    }
}

impl<T: LumpSource + ?Sized> LumpSource for &T {
    fn entries(&self) -> &[LumpEntry] {
        (**self).entries()
    }

    fn data(&self, index: usize) -> Result<Cow<'_, [u8]>, ArchiveError> {
        (**self).data(index)
    }

    fn open_nested(&self, index: usize) -> Result<Option<Box<dyn LumpSource + '_>>, ArchiveError> {
        (**self).open_nested(index)
    }
}
