//! Readers for the OEIS flat-file dumps.
//!
//! `stripped` lines hold an identifier and the comma-joined terms:
//!
//! ```text
//! # Greetings from The On-Line Encyclopedia of Integer Sequences!
//! A000045 ,0,1,1,2,3,5,8,13,21,34,
//! ```
//!
//! `names` lines hold an identifier, one space, and the sequence name:
//!
//! ```text
//! A000045 Fibonacci numbers: F(n) = F(n-1) + F(n-2) with F(0) = 0 and F(1) = 1.
//! ```

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::parsing::open_text;
use crate::utils::validation::is_catalog_id;

/// One usable line of a `stripped` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedEntry {
    pub a_number: String,
    /// Term text with all spaces removed, e.g. `,0,1,1,2,`
    pub terms: String,
}

/// Parse one `stripped` line.
///
/// Returns `None` for comments, blank lines, lines with fewer than two
/// columns, and lines whose identifier is not a catalog id.
#[must_use]
pub fn parse_stripped_line(line: &str) -> Option<StrippedEntry> {
    if line.starts_with('#') {
        return None;
    }
    let line = line.trim_end_matches(['\n', '\r']);
    let (a_number, rest) = line.trim_start().split_once(char::is_whitespace)?;
    let a_number = a_number.trim();
    if !is_catalog_id(a_number) {
        return None;
    }

    let terms: String = rest.trim().chars().filter(|c| *c != ' ').collect();
    if terms.is_empty() {
        return None;
    }

    Some(StrippedEntry {
        a_number: a_number.to_string(),
        terms,
    })
}

/// Parse one `names` line into `(a_number, name)`.
#[must_use]
pub fn parse_names_line(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('#') {
        return None;
    }
    let line = line.trim_end_matches(['\n', '\r']);
    let (a_number, name) = line.split_once(' ')?;
    let a_number = a_number.trim();
    is_catalog_id(a_number).then_some((a_number, name.trim()))
}

/// Iterator over the usable entries of a `stripped` reader.
///
/// Invalid UTF-8 is replaced rather than treated as an error.
pub struct StrippedReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> StrippedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for StrippedReader<R> {
    type Item = std::io::Result<StrippedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    if let Some(entry) = parse_stripped_line(&String::from_utf8_lossy(&self.buf)) {
                        return Some(Ok(entry));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Load a `names` file (plain or gzip) into an `A-number -> name` map.
///
/// Stops after `limit` names when a limit is given.
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened or read.
pub fn load_names(path: &Path, limit: Option<usize>) -> std::io::Result<HashMap<String, String>> {
    let mut reader = open_text(path)?;
    let mut names = HashMap::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some((a_number, name)) = parse_names_line(&line) {
            names.insert(a_number.to_string(), name.to_string());
        }
        if limit.is_some_and(|limit| names.len() >= limit) {
            break;
        }
    }

    Ok(names)
}
