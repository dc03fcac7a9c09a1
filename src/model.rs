use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LibrisError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One catalog entry. The `id` is a string equal to the book's 1-based
/// position in the catalog's canonical order; removals renumber the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published: NaiveDate,
    pub price: f64,
    pub is_borrowed: bool,
}

impl Book {
    /// Build a book from raw field strings. Fails fast on a malformed date
    /// or a price that is not a non-negative number, so a bad row never
    /// produces a half-initialized book.
    pub fn parse(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        published: &str,
        price: &str,
    ) -> Result<Self> {
        let published = NaiveDate::parse_from_str(published.trim(), DATE_FORMAT).map_err(|_| {
            LibrisError::Validation(format!(
                "invalid publication date '{}', expected YYYY-MM-DD",
                published.trim()
            ))
        })?;
        let price = parse_price(price)?;
        Ok(Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            published,
            price,
            is_borrowed: false,
        })
    }

    /// Price with exactly two fractional digits, as persisted and displayed.
    pub fn price_display(&self) -> String {
        format!("{:.2}", self.price)
    }
}

/// Accepts any plain numeric string convertible to a non-negative value.
/// No currency symbols.
pub fn parse_price(raw: &str) -> Result<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| LibrisError::Validation(format!("invalid price '{}'", raw.trim())))?;
    if !price.is_finite() || price < 0.0 {
        return Err(LibrisError::Validation(format!(
            "price must be a non-negative number, got '{}'",
            raw.trim()
        )));
    }
    Ok(price)
}

/// The person driving the current session. The id is generated once per run
/// and is never persisted.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub id: Uuid,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessType {
    Add,
    Remove,
    Borrow,
    Buy,
    Return,
}

impl ProcessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessType::Add => "Add",
            ProcessType::Remove => "Remove",
            ProcessType::Borrow => "Borrow",
            ProcessType::Buy => "Buy",
            ProcessType::Return => "Return",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessType {
    type Err = LibrisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Add" => Ok(ProcessType::Add),
            "Remove" => Ok(ProcessType::Remove),
            "Borrow" => Ok(ProcessType::Borrow),
            "Buy" => Ok(ProcessType::Buy),
            "Return" => Ok(ProcessType::Return),
            other => Err(LibrisError::Storage(format!(
                "unknown process type '{}'",
                other
            ))),
        }
    }
}

/// Identity and capture-time of one operation execution. Taken once when the
/// operation starts; the same timestamp is what lands in the transaction
/// log, not the time of the final write.
#[derive(Debug, Clone)]
pub struct Stamp {
    pub process_id: Uuid,
    pub timestamp: NaiveDateTime,
}

impl Stamp {
    pub fn now() -> Self {
        Self {
            process_id: Uuid::new_v4(),
            timestamp: Local::now().naive_local(),
        }
    }

    pub fn timestamp_display(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// One append-only audit row. Only Borrow, Return and Buy produce these;
/// `price` is present only for Buy.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub process_type: ProcessType,
    pub timestamp: NaiveDateTime,
    pub actor_name: String,
    pub actor_id: String,
    pub book_title: String,
    pub book_id: String,
    pub price: Option<f64>,
}

impl TransactionRecord {
    pub fn new(
        process_type: ProcessType,
        stamp: &Stamp,
        actor: &Actor,
        book_title: impl Into<String>,
        book_id: impl Into<String>,
        price: Option<f64>,
    ) -> Self {
        Self {
            process_type,
            timestamp: stamp.timestamp,
            actor_name: actor.name.clone(),
            actor_id: actor.id.to_string(),
            book_title: book_title.into(),
            book_id: book_id.into(),
            price,
        }
    }

    pub fn timestamp_display(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Empty string for non-Buy rows, two decimals otherwise.
    pub fn price_display(&self) -> String {
        match self.price {
            Some(p) => format!("{:.2}", p),
            None => String::new(),
        }
    }
}

/// Historical borrow event. Never removed or updated by Return.
#[derive(Debug, Clone)]
pub struct BorrowRecord {
    pub actor_id: String,
    pub actor_name: String,
    pub book_title: String,
    pub book_id: String,
}

impl BorrowRecord {
    pub fn new(actor: &Actor, book: &Book) -> Self {
        Self {
            actor_id: actor.id.to_string(),
            actor_name: actor.name.clone(),
            book_title: book.title.clone(),
            book_id: book.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_book() {
        let book = Book::parse("1", "Dune", "Herbert", "1965-08-01", "15.00").unwrap();
        assert_eq!(book.id, "1");
        assert_eq!(book.published, NaiveDate::from_ymd_opt(1965, 8, 1).unwrap());
        assert_eq!(book.price_display(), "15.00");
        assert!(!book.is_borrowed);
    }

    #[test]
    fn rejects_malformed_date() {
        let err = Book::parse("1", "Dune", "Herbert", "08/01/1965", "15.00").unwrap_err();
        assert!(matches!(err, LibrisError::Validation(_)));
    }

    #[test]
    fn rejects_negative_or_non_numeric_price() {
        assert!(matches!(
            Book::parse("1", "Dune", "Herbert", "1965-08-01", "-1").unwrap_err(),
            LibrisError::Validation(_)
        ));
        assert!(matches!(
            Book::parse("1", "Dune", "Herbert", "1965-08-01", "$15").unwrap_err(),
            LibrisError::Validation(_)
        ));
    }

    #[test]
    fn price_display_pads_to_two_decimals() {
        let book = Book::parse("1", "Dune", "Herbert", "1965-08-01", "15.5").unwrap();
        assert_eq!(book.price_display(), "15.50");
    }

    #[test]
    fn transaction_price_empty_unless_present() {
        let actor = Actor::new("Ana");
        let stamp = Stamp::now();
        let rec = TransactionRecord::new(ProcessType::Borrow, &stamp, &actor, "Dune", "1", None);
        assert_eq!(rec.price_display(), "");
        let rec = TransactionRecord::new(
            ProcessType::Buy,
            &stamp,
            &actor,
            "Dune",
            "1",
            Some(15.0),
        );
        assert_eq!(rec.price_display(), "15.00");
    }

    #[test]
    fn process_type_round_trips_through_str() {
        for pt in [
            ProcessType::Add,
            ProcessType::Remove,
            ProcessType::Borrow,
            ProcessType::Buy,
            ProcessType::Return,
        ] {
            assert_eq!(pt.as_str().parse::<ProcessType>().unwrap(), pt);
        }
        assert!("Steal".parse::<ProcessType>().is_err());
    }
}
