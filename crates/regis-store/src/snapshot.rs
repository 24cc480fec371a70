//! Dataset snapshot files.
//!
//! A snapshot is one JSON object with a key per table. Reading does not
//! validate; callers that load a snapshot into a repository go through
//! [`MemoryRepository::from_dataset`](crate::MemoryRepository::from_dataset)
//! or [`import_dataset`](crate::import_dataset), both of which do.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use regis_core::Dataset;

use crate::StoreError;

/// Read a dataset snapshot from a JSON file.
pub fn read_dataset(path: &Path) -> Result<Dataset, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a dataset snapshot as pretty-printed JSON, replacing the file.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dataset).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
