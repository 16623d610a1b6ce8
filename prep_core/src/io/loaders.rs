use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::core::Table;
use crate::error::{PrepError, PrepResult};
use crate::parsing::{csv_parser, json_parser, xlsx_parser};

/// Options passed through to the concrete reader.
///
/// Readers ignore options that do not apply to their format (the JSON reader
/// uses none of them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Field separator for delimited text
    pub delimiter: char,
    /// WHATWG encoding label for delimited text (`utf-8`, `latin1`, ...)
    pub encoding: String,
    /// Whether the first row holds column names
    pub has_header: bool,
    /// Worksheet to read from a spreadsheet; the first one when `None`
    pub sheet: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            encoding: "utf-8".to_string(),
            has_header: true,
            sheet: None,
        }
    }
}

/// Reader strategy selected from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    Delimited,
    Spreadsheet,
    Records,
}

impl ReaderKind {
    /// Read `path` with this strategy, mapping any reader error to
    /// [`PrepError::ReadFailure`].
    pub fn read(self, path: &Path, options: &LoadOptions) -> PrepResult<Table> {
        let result = match self {
            ReaderKind::Delimited => csv_parser::parse_delimited(path, options),
            ReaderKind::Spreadsheet => xlsx_parser::parse_spreadsheet(path, options),
            ReaderKind::Records => json_parser::parse_records_json(path),
        };
        result.map_err(|e| PrepError::read_failure(path, e))
    }
}

static DEFAULT_LOADER: Lazy<TableLoader> = Lazy::new(TableLoader::new);

/// Dispatch table from file extension to reader
#[derive(Debug, Clone)]
pub struct TableLoader {
    readers: HashMap<String, ReaderKind>,
}

impl TableLoader {
    /// Loader with the built-in extensions registered
    pub fn new() -> Self {
        let mut loader = Self::empty();
        loader.register("csv", ReaderKind::Delimited);
        loader.register("txt", ReaderKind::Delimited);
        loader.register("xlsx", ReaderKind::Spreadsheet);
        loader.register("xls", ReaderKind::Spreadsheet);
        loader.register("json", ReaderKind::Records);
        loader
    }

    /// Loader with no extensions registered
    pub fn empty() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Map an extension (with or without the leading dot) to a reader.
    pub fn register(&mut self, extension: &str, kind: ReaderKind) {
        self.readers.insert(normalize_extension(extension), kind);
    }

    /// Registered extensions, sorted, with leading dots
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.readers.keys().map(|e| format!(".{}", e)).collect();
        extensions.sort();
        extensions
    }

    /// Resolve the reader for a path from its extension
    pub fn reader_for(&self, path: &Path) -> PrepResult<ReaderKind> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(normalize_extension)
            .unwrap_or_default();

        self.readers
            .get(&extension)
            .copied()
            .ok_or_else(|| PrepError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{}", extension)
                },
            })
    }

    /// Load a file into a [`Table`] using the reader registered for its extension
    pub fn load(&self, path: &Path, options: &LoadOptions) -> PrepResult<Table> {
        let kind = self.reader_for(path)?;
        log::info!("Loading {} with {:?} reader", path.display(), kind);

        let table = kind.read(path, options)?;
        log::debug!(
            "Loaded {} rows x {} columns from {}",
            table.height(),
            table.width(),
            path.display()
        );
        Ok(table)
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a file with the built-in reader registry
pub fn load_table(path: &Path, options: &LoadOptions) -> PrepResult<Table> {
    DEFAULT_LOADER.load(path, options)
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}
