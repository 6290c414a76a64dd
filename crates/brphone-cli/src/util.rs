use crate::error::not_found;
use anyhow::{Context as _, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub fn read_lines(path: Option<&Path>) -> Result<Vec<String>> {
    let contents = match path {
        Some(path) => {
            ensure_exists(path)?;
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut buf)
                .with_context(|| "read stdin")?;
            buf
        }
    };
    Ok(contents.lines().map(str::to_string).collect())
}

/// A CSV export loaded into memory, header row first.
#[derive(Debug)]
pub struct Table {
    pub path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader
            .headers()
            .with_context(|| format!("read headers of {}", path.display()))?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.with_context(|| format!("read {}", path.display()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Exact header match first, then case-insensitive.
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers
            .iter()
            .position(|header| header == name)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(name))
            })
    }

    /// First header containing `hint`, ignoring case.
    pub fn find_column(&self, hint: &str) -> Option<usize> {
        let hint = hint.to_lowercase();
        self.headers
            .iter()
            .position(|header| header.to_lowercase().contains(&hint))
    }

    pub fn header(&self, column: usize) -> &str {
        self.headers.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell values of one column; short rows yield empty cells.
    pub fn values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(column).map(String::as_str).unwrap_or(""))
    }
}

pub fn read_table(path: &Path) -> Result<Table> {
    ensure_exists(path)?;
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    Table::from_reader(path, file)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(not_found(format!("file {}", path.display())));
    }
    Ok(())
}
