//! Dot-path adapter over a TOML document tree.
//!
//! [`Document`] is the storage abstraction the store reads and writes
//! through: path-based typed reads, path-based writes that create
//! intermediate tables, and whole-document transfer to and from a backing
//! file. Writes to disk are atomic — the content lands in a temporary file
//! in the destination directory and is renamed into place while an
//! exclusive advisory lock is held on the destination.

use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    path::Path,
};

use fs2::FileExt;
use tempfile::NamedTempFile;
use toml::{Table, Value};

use crate::error::Error;

/// An in-memory TOML tree addressed by dot-delimited paths.
#[derive(Debug, Clone, Default)]
pub struct Document {
    root: Table,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from TOML text.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let root = toml::from_str::<Table>(text)?;
        Ok(Self { root })
    }

    /// Reads a document from a file, holding a shared lock for the duration
    /// of the read. A missing file yields an empty document.
    pub fn read_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut text = String::new();
        (&file).read_to_string(&mut text)?;

        Self::parse(&text)
    }

    /// Rewrites the whole document to `path`, creating missing parent
    /// directories. The content goes to a temporary file first and is
    /// renamed over the destination, so readers never observe a partial
    /// write.
    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        let text = self.to_toml_string()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        // Blocks until the exclusive lock is acquired; released on close.
        let guard = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        guard.lock_exclusive()?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|err| err.error)?;

        Ok(())
    }

    /// Renders the document as pretty-printed TOML.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(&self.root)?)
    }

    /// Whether `path` names a table (a section) in the document.
    pub fn has_table(&self, path: &str) -> bool {
        self.value_at(path).is_some_and(Value::is_table)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.value_at(path).and_then(Value::as_str)
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.value_at(path).and_then(Value::as_integer)
    }

    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.value_at(path).and_then(Value::as_float)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.value_at(path).and_then(Value::as_bool)
    }

    pub fn get_array(&self, path: &str) -> Option<&[Value]> {
        self.value_at(path).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Reads a list of strings. Scalar elements that are not strings are
    /// stringified; nested tables and arrays are skipped.
    pub fn get_string_list(&self, path: &str) -> Option<Vec<String>> {
        let items = self.get_array(path)?;
        Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Integer(n) => Some(n.to_string()),
                    Value::Float(f) => Some(f.to_string()),
                    Value::Boolean(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Writes `value` at `path`, creating intermediate tables as needed.
    /// A non-table value sitting in the middle of the path is replaced by a
    /// fresh table.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = match segments.pop() {
            Some(last) => last,
            None => return,
        };

        let mut table = &mut self.root;
        for segment in segments {
            let slot = table
                .entry(segment)
                .or_insert_with(|| Value::Table(Table::new()));
            if !slot.is_table() {
                *slot = Value::Table(Table::new());
            }
            let Value::Table(next) = slot else {
                unreachable!();
            };
            table = next;
        }

        table.insert(last.to_string(), value);
    }

    fn value_at(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}
