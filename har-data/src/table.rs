//! Readers for the header-less, whitespace-delimited text tables of the dataset.
//!
//! All readers skip blank lines and report 1-based line numbers in errors.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use ndarray::Array2;

use crate::error::{DatasetError, Result};

/// Opens `path` for buffered line reading.
pub fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Reads `index name` rows, as found in `features.txt` and `activity_labels.txt`.
pub fn read_index_name_pairs<R: BufRead>(reader: R, source: &Path) -> Result<Vec<(u32, String)>> {
    let mut pairs = Vec::new();
    for_each_record(reader, source, |line, fields| {
        if fields.len() != 2 {
            return Err(DatasetError::ColumnCount {
                path: source.to_path_buf(),
                line,
                expected: 2,
                found: fields.len(),
            });
        }
        let index = parse_field::<u32>(fields[0], source, line)?;
        pairs.push((index, fields[1].to_string()));
        Ok(())
    })?;
    debug!(
        target: "har_data::table",
        "Read {} index/name rows from {}",
        pairs.len(),
        source.display()
    );
    Ok(pairs)
}

/// Reads a rectangular matrix of floating-point values, one sample per line.
///
/// When `expected_columns` is supplied every row must have exactly that many
/// values; otherwise the first row fixes the width. An input with no rows
/// yields a `0 x expected_columns` matrix.
pub fn read_matrix<R: BufRead>(
    reader: R,
    source: &Path,
    expected_columns: Option<usize>,
) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut rows = 0usize;
    let mut width = expected_columns;

    for_each_record(reader, source, |line, fields| {
        let current = width;
        match current {
            Some(expected) if fields.len() != expected => {
                return Err(if expected_columns.is_some() {
                    DatasetError::ColumnCount {
                        path: source.to_path_buf(),
                        line,
                        expected,
                        found: fields.len(),
                    }
                } else {
                    DatasetError::RaggedRow {
                        path: source.to_path_buf(),
                        line,
                        expected,
                        found: fields.len(),
                    }
                });
            }
            Some(_) => {}
            None => width = Some(fields.len()),
        }
        for field in fields {
            values.push(parse_field::<f64>(field, source, line)?);
        }
        rows += 1;
        Ok(())
    })?;

    let columns = width.unwrap_or(0);
    debug!(
        target: "har_data::table",
        "Read {}x{} matrix from {}",
        rows,
        columns,
        source.display()
    );
    Array2::from_shape_vec((rows, columns), values).map_err(|err| DatasetError::Parse {
        path: source.to_path_buf(),
        line: rows,
        message: format!("matrix shape error: {err}"),
    })
}

/// Reads one integer activity id per line, paired with the line it came from.
pub fn read_label_ids<R: BufRead>(reader: R, source: &Path) -> Result<Vec<(usize, u32)>> {
    let mut ids = Vec::new();
    for_each_record(reader, source, |line, fields| {
        if fields.len() != 1 {
            return Err(DatasetError::ColumnCount {
                path: source.to_path_buf(),
                line,
                expected: 1,
                found: fields.len(),
            });
        }
        ids.push((line, parse_field::<u32>(fields[0], source, line)?));
        Ok(())
    })?;
    debug!(
        target: "har_data::table",
        "Read {} labels from {}",
        ids.len(),
        source.display()
    );
    Ok(ids)
}

fn for_each_record<R, F>(reader: R, source: &Path, mut visitor: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, Vec<&str>) -> Result<()>,
{
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source_err| DatasetError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        visitor(index + 1, fields)?;
    }
    Ok(())
}

fn parse_field<T>(text: &str, source: &Path, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>().map_err(|err| DatasetError::Parse {
        path: source.to_path_buf(),
        line,
        message: format!("invalid value `{text}`: {err}"),
    })
}
