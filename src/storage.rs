use std::{ffi::OsString, fs, path::Path};

use csv::Trim;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read or write ledger state: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to replace ledger state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Account id `{id}` in ledger state is not a positive integer")]
    MalformedId { id: String },
}

/// One line of the state file, in column order
/// `account_id,owner_name,balance`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct AccountRow {
    pub account_id: String,
    pub owner_name: String,
    pub balance: Decimal,
}

/// Reads every row of the state file, in file order. The header row is
/// required; field values are trimmed.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<AccountRow>, StorageError> {
    let mut reader = csv::ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Rewrites the state file wholesale. The new content goes to a sibling
/// temp file first and is renamed over the target, so an interrupted
/// write never leaves a truncated state file behind.
pub(crate) fn write_rows(
    path: &Path,
    rows: impl Iterator<Item = AccountRow>,
) -> Result<(), StorageError> {
    let mut tmp_path = OsString::from(path.as_os_str());
    tmp_path.push(".tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp_path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn row(id: &str, owner: &str, balance: &str) -> AccountRow {
        AccountRow {
            account_id: id.to_string(),
            owner_name: owner.to_string(),
            balance: Decimal::from_str(balance).unwrap(),
        }
    }

    #[test]
    fn round_trips_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.csv");
        let rows = vec![row("1", "Alice", "100.0"), row("2", "Bob", "25.0")];
        write_rows(&path, rows.into_iter()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "account_id,owner_name,balance\n1,Alice,100.0\n2,Bob,25.0\n"
        );

        let read = read_rows(&path).unwrap();
        assert_eq!(read, vec![row("1", "Alice", "100.0"), row("2", "Bob", "25.0")]);
    }

    #[test]
    fn quotes_owner_names_containing_the_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.csv");
        write_rows(&path, std::iter::once(row("1", "Smith, Jane", "5"))).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Smith, Jane\""));

        let read = read_rows(&path).unwrap();
        assert_eq!(read[0].owner_name, "Smith, Jane");
    }

    #[test]
    fn rewrite_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.csv");
        write_rows(&path, vec![row("1", "Alice", "100.0")].into_iter()).unwrap();
        write_rows(&path, vec![row("1", "Alice", "70.0")].into_iter()).unwrap();

        let read = read_rows(&path).unwrap();
        assert_eq!(read, vec![row("1", "Alice", "70.0")]);
        assert!(!dir.path().join("state.csv.tmp").exists());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, StorageError::Csv(_)));
    }
}
