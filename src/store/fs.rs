use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ByteRecord, ReaderBuilder, Writer};

use super::{LibraryStore, BORROW_HEADER, CATALOG_HEADER, TRANSACTION_HEADER};
use crate::config::LibrisConfig;
use crate::error::{LibrisError, Result};
use crate::model::{Book, BorrowRecord, ProcessType, TransactionRecord, DATE_FORMAT, TIMESTAMP_FORMAT};

/// CSV-file backend. Paths come from [`LibrisConfig`]; nothing here is
/// hardcoded. Every method opens, writes and closes its file within the
/// call, so a handle never outlives the operation that used it.
#[derive(Debug)]
pub struct FileStore {
    catalog_path: PathBuf,
    transactions_path: PathBuf,
    ledger_path: PathBuf,
}

impl FileStore {
    pub fn new(config: &LibrisConfig) -> Self {
        Self {
            catalog_path: config.catalog_path.clone(),
            transactions_path: config.transaction_log_path.clone(),
            ledger_path: config.borrow_ledger_path.clone(),
        }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Create a header-only catalog file when none exists. Returns whether a
    /// file was created. First-run convenience for the binary; `load_catalog`
    /// itself still treats an absent file as an error.
    pub fn ensure_catalog(&self) -> Result<bool> {
        if self.catalog_path.exists() {
            return Ok(false);
        }
        let mut writer = Writer::from_writer(File::create(&self.catalog_path)?);
        writer.write_record(CATALOG_HEADER)?;
        writer.flush()?;
        Ok(true)
    }
}

/// Decode one CSV field, tolerating legacy Latin-1 catalogs. Latin-1 bytes
/// map 1:1 onto Unicode code points, so the fallback is lossless.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn field(record: &ByteRecord, index: usize) -> String {
    record.get(index).map(decode_field).unwrap_or_default()
}

fn row_error(path: &Path, record: &ByteRecord, detail: impl std::fmt::Display) -> LibrisError {
    let line = record
        .position()
        .map(|p| p.line().to_string())
        .unwrap_or_else(|| "?".to_string());
    LibrisError::Storage(format!(
        "malformed row in {} (line {}): {}",
        path.display(),
        line,
        detail
    ))
}

/// Append one row, writing the header first when the file is new or empty.
fn append_row(path: &Path, header: &[&str], row: &[String]) -> Result<()> {
    let fresh = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = Writer::from_writer(file);
    if fresh {
        writer.write_record(header)?;
    }
    writer.write_record(row)?;
    writer.flush()?;
    Ok(())
}

impl LibraryStore for FileStore {
    fn load_catalog(&self) -> Result<Vec<Book>> {
        if !self.catalog_path.exists() {
            return Err(LibrisError::Storage(format!(
                "catalog file missing: {}",
                self.catalog_path.display()
            )));
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(File::open(&self.catalog_path)?);

        let mut books = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            if record.len() != CATALOG_HEADER.len() {
                return Err(row_error(
                    &self.catalog_path,
                    &record,
                    format!("expected {} fields, got {}", CATALOG_HEADER.len(), record.len()),
                ));
            }
            let book = Book::parse(
                field(&record, 0),
                field(&record, 1),
                field(&record, 2),
                &field(&record, 3),
                &field(&record, 4),
            )
            .map_err(|e| row_error(&self.catalog_path, &record, e))?;
            books.push(book);
        }
        Ok(books)
    }

    fn save_catalog(&mut self, books: &[Book]) -> Result<()> {
        // Write beside the target, then rename over it, so a failed write
        // leaves the previous catalog intact.
        let tmp = self.catalog_path.with_extension("csv.tmp");
        {
            let mut writer = Writer::from_writer(File::create(&tmp)?);
            writer.write_record(CATALOG_HEADER)?;
            for book in books {
                let date = book.published.format(DATE_FORMAT).to_string();
                let price = book.price_display();
                writer.write_record([
                    book.id.as_str(),
                    book.title.as_str(),
                    book.author.as_str(),
                    date.as_str(),
                    price.as_str(),
                ])?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.catalog_path)?;
        Ok(())
    }

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<()> {
        append_row(
            &self.transactions_path,
            &TRANSACTION_HEADER,
            &[
                record.process_type.to_string(),
                record.timestamp_display(),
                record.actor_name.clone(),
                record.actor_id.clone(),
                record.book_title.clone(),
                record.book_id.clone(),
                record.price_display(),
            ],
        )
    }

    fn read_transactions(&self) -> Result<Vec<TransactionRecord>> {
        if !self.transactions_path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(File::open(&self.transactions_path)?);

        let mut records = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            if record.len() != TRANSACTION_HEADER.len() {
                return Err(row_error(
                    &self.transactions_path,
                    &record,
                    format!(
                        "expected {} fields, got {}",
                        TRANSACTION_HEADER.len(),
                        record.len()
                    ),
                ));
            }
            let process_type = ProcessType::from_str(&field(&record, 0))
                .map_err(|e| row_error(&self.transactions_path, &record, e))?;
            let timestamp =
                chrono::NaiveDateTime::parse_from_str(&field(&record, 1), TIMESTAMP_FORMAT)
                    .map_err(|e| row_error(&self.transactions_path, &record, e))?;
            let raw_price = field(&record, 6);
            let price = if raw_price.is_empty() {
                None
            } else {
                Some(raw_price.parse().map_err(|_| {
                    row_error(&self.transactions_path, &record, "non-numeric price")
                })?)
            };
            records.push(TransactionRecord {
                process_type,
                timestamp,
                actor_name: field(&record, 2),
                actor_id: field(&record, 3),
                book_title: field(&record, 4),
                book_id: field(&record, 5),
                price,
            });
        }
        Ok(records)
    }

    fn append_borrow(&mut self, record: &BorrowRecord) -> Result<()> {
        append_row(
            &self.ledger_path,
            &BORROW_HEADER,
            &[
                record.actor_id.clone(),
                record.actor_name.clone(),
                record.book_title.clone(),
                record.book_id.clone(),
            ],
        )
    }

    fn read_borrows(&self) -> Result<Vec<BorrowRecord>> {
        if !self.ledger_path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(File::open(&self.ledger_path)?);

        let mut records = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            if record.len() != BORROW_HEADER.len() {
                return Err(row_error(
                    &self.ledger_path,
                    &record,
                    format!("expected {} fields, got {}", BORROW_HEADER.len(), record.len()),
                ));
            }
            records.push(BorrowRecord {
                actor_id: field(&record, 0),
                actor_name: field(&record, 1),
                book_title: field(&record, 2),
                book_id: field(&record, 3),
            });
        }
        Ok(records)
    }
}
