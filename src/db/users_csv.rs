use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::PersistedUser,
};

/// Column holding the user key in every users file
pub const USER_ID_COLUMN: &str = "user_id";

type RawRow = HashMap<String, String>;

/// Streaming reader over the rows of a users CSV file
///
/// Each item is a `(user_id, attributes)` pair where the attributes are
/// every other column of the row. Rows are matched to the header by
/// position: a short row leaves its trailing columns out of the
/// attributes, a row too short to reach `user_id` is skipped, and fields
/// past the last header are ignored. Reading stops
/// being useful after the first error; callers keep whatever they
/// consumed before it.
pub struct UserRows {
    path: PathBuf,
    headers: csv::StringRecord,
    records: csv::StringRecordsIntoIter<File>,
}

impl UserRows {
    /// Pairs fields with headers; `None` when the row stops before `user_id`
    fn split_record(&self, record: &csv::StringRecord) -> Option<(String, RawRow)> {
        let mut row: RawRow = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.to_string(), field.to_string()))
            .collect();

        row.remove(USER_ID_COLUMN).map(|user_id| (user_id, row))
    }
}

impl Iterator for UserRows {
    type Item = AppResult<(String, RawRow)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    return Some(Err(AppError::Read {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };

            match self.split_record(&record) {
                Some(row) => return Some(Ok(row)),
                None => {
                    let line = record.position().map(|p| p.line());
                    tracing::warn!(?line, "Skipping row without a user_id field");
                }
            }
        }
    }
}

/// Opens a users file for reading
///
/// Returns `Ok(None)` when the file does not exist. A present file whose
/// header lacks a `user_id` column is rejected before any row is read.
pub fn open_users(path: &Path) -> AppResult<Option<UserRows>> {
    let read_error = |source: csv::Error| AppError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(read_error(e.into())),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers().map_err(read_error)?.clone();
    if !headers.is_empty() && !headers.iter().any(|h| h == USER_ID_COLUMN) {
        return Err(AppError::MissingColumn(path.to_path_buf()));
    }

    Ok(Some(UserRows {
        path: path.to_path_buf(),
        headers,
        records: reader.into_records(),
    }))
}

/// Appends one user row to the users file
///
/// The file is created when absent. The header is written only when the
/// file is empty at open time. The handle is dropped before returning on
/// every path.
pub fn append_user(path: &Path, row: &PersistedUser) -> AppResult<()> {
    let persistence_error = |source: csv::Error| AppError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| persistence_error(e.into()))?;
    let is_empty = file
        .metadata()
        .map_err(|e| persistence_error(e.into()))?
        .len()
        == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(is_empty)
        .from_writer(file);
    writer.serialize(row).map_err(persistence_error)?;
    writer.flush().map_err(|e| persistence_error(e.into()))?;

    tracing::debug!(path = %path.display(), header = is_empty, "Appended user row");
    Ok(())
}
