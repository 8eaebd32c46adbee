// THEORY:
// A `CsvSheet` is a read-once, in-memory view of a simple delimited text file:
// a header line naming the columns, then one record per line. There is no
// quoting or escaping; a field is whatever lies between two delimiters.
//
// Reading rules:
// 1.  The header must be present and non-blank.
// 2.  A line equal to the sentinel (`EOF` by default) ends the sheet, even if
//     more lines follow. End of file also ends it.
// 3.  A line without the delimiter is not a record. The lenient reader skips
//     it; the strict reader rejects the whole file.
// 4.  Trailing empty fields are dropped when a line is split, so `a,b,,` has two
//     fields.
//
// Lookups never fail: a missing cell reads as the empty string with a warning.

use crate::config::CsvConfig;
use crate::error::{Result, RudimentsError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct CsvSheet {
    filename: PathBuf,
    header: Vec<String>,
    records: Vec<Vec<String>>,
    sentinel: String,
}

fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields: Vec<String> = line.split(delimiter).map(str::to_owned).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

impl CsvSheet {
    /// Reads a sheet with the default (lenient) settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &CsvConfig::default())
    }

    pub fn open_with(path: impl AsRef<Path>, config: &CsvConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RudimentsError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => RudimentsError::Io(e),
        })?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        if header.trim().is_empty() {
            return Err(RudimentsError::parse(1, "blank header line"));
        }
        let header = split_fields(&header, config.delimiter);
        if config.strict {
            info!(path = %path.display(), "reading csv file");
        }

        let mut records = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            let line_number = index + 2;
            if line == config.sentinel {
                break;
            }
            if !line.contains(config.delimiter) {
                if config.strict {
                    return Err(RudimentsError::parse(
                        line_number,
                        format!("no '{}' delimiter in line", config.delimiter),
                    ));
                }
                debug!(line_number, "skipping line without delimiter");
                continue;
            }
            if config.strict {
                debug!(line_number, %line, "csv line");
            }
            records.push(split_fields(&line, config.delimiter));
        }

        info!(
            path = %path.display(),
            rows = records.len(),
            cols = header.len(),
            fields = %header.join(", "),
            "read csv file"
        );

        Ok(Self {
            filename: path.to_path_buf(),
            header,
            records,
            sentinel: config.sentinel.clone(),
        })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Column titles from the first line.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of records (the header is not a record).
    pub fn rows(&self) -> usize {
        self.records.len()
    }

    /// Number of header columns.
    pub fn cols(&self) -> usize {
        self.header.len()
    }

    /// The field at `(row, col)`; out of range reads as `""`.
    pub fn value(&self, row: usize, col: usize) -> &str {
        match self.records.get(row).and_then(|r| r.get(col)) {
            Some(field) => field,
            None => {
                warn!(row, col, "csv cell out of range, using empty value");
                ""
            }
        }
    }

    /// Field `col2` of the first record whose field `col1` equals `value`.
    pub fn lookup(&self, col1: usize, col2: usize, value: &str) -> &str {
        self.find_row(col1, value)
            .and_then(|record| record.get(col2))
            .map_or("", String::as_str)
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.records.get(row).map(Vec::as_slice)
    }

    /// The first record whose field `col` equals `value`. The scan stops at a
    /// record that starts with the sentinel.
    pub fn find_row(&self, col: usize, value: &str) -> Option<&[String]> {
        for record in &self.records {
            if record.get(col).is_some_and(|field| field == value) {
                return Some(record);
            }
            if record.first().is_some_and(|field| *field == self.sentinel) {
                break;
            }
        }
        None
    }

    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        self.records.iter().map(Vec::as_slice)
    }
}
