//! Menu-driven sessions. A session binds an actor and a [`Ui`] collaborator
//! to the engine: patrons borrow, return and buy; the administrator adds,
//! removes and views reports. Every failure, storage included, is rendered
//! as a message and the menu keeps running; only a dead input stream ends a
//! session early.

use crate::engine::{Engine, OpReport, Operation};
use crate::error::{LibrisError, Result};
use crate::model::{Actor, Book, BorrowRecord, TransactionRecord, DATE_FORMAT};
use crate::store::LibraryStore;
use crate::ui::Ui;

const MAX_LOGIN_ATTEMPTS: usize = 3;

/// Administrator identity check: exact id and password match. A new
/// password must be all digits and at least 8 characters.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    id: String,
    password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new("12356", "123456789")
    }
}

impl AdminCredentials {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, id: &str, password: &str) -> bool {
        self.id == id && self.password == password
    }

    /// Rejects an invalid password with no state change.
    pub fn set_password(&mut self, new_password: &str) -> Result<()> {
        if !is_valid_password(new_password) {
            return Err(LibrisError::Validation(
                "password must be all digits and at least 8 characters".to_string(),
            ));
        }
        self.password = new_password.to_string();
        Ok(())
    }
}

pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8 && password.chars().all(|c| c.is_ascii_digit())
}

pub struct Session<S: LibraryStore, U: Ui> {
    engine: Engine<S>,
    ui: U,
}

impl<S: LibraryStore, U: Ui> Session<S, U> {
    pub fn new(engine: Engine<S>, ui: U) -> Self {
        Self { engine, ui }
    }

    pub fn into_parts(self) -> (Engine<S>, U) {
        (self.engine, self.ui)
    }

    /// Patron menu loop: borrow, return, buy, exit.
    pub fn run_patron(&mut self, name: Option<String>) -> Result<()> {
        self.ui.display("Welcome to the Library!");
        let name = match name {
            Some(name) => name,
            None => self.ui.prompt("Enter Your Name: ")?,
        };
        let actor = Actor::new(name.trim());
        self.ui.display(&format!("Hello {}!", actor.name));

        loop {
            self.ui.display("");
            self.ui.display("1. Borrow Book");
            self.ui.display("2. Return Book");
            self.ui.display("3. Buy Book");
            self.ui.display("4. Exit");
            let choice = self.ui.prompt("Enter Your Choice: ")?;
            self.ui.clear();
            match choice.trim() {
                "1" => {
                    let title = self.ui.prompt("Enter Book Name: ")?;
                    self.run_operation(&actor, Operation::Borrow { title });
                }
                "2" => {
                    let title = self.ui.prompt("Enter Book Name to Return: ")?;
                    self.run_operation(&actor, Operation::Return { title });
                }
                "3" => {
                    let title = self.ui.prompt("Enter Book Name: ")?;
                    self.run_operation(&actor, Operation::Buy { title });
                }
                "4" => {
                    self.ui.display("Thank you for using the library.");
                    return Ok(());
                }
                _ => self.ui.display("Invalid choice. Please try again."),
            }
        }
    }

    /// Administrator entry: at most three login attempts, then the admin
    /// menu loop.
    pub fn run_admin(&mut self, creds: &mut AdminCredentials) -> Result<()> {
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            let id = self.ui.prompt("Enter Your ID: ")?;
            let password = self.ui.prompt("Enter Your Password: ")?;
            if creds.verify(id.trim(), password.trim()) {
                self.ui.display("Welcome, administrator.");
                return self.admin_menu(creds);
            }
            self.ui.display("Invalid ID or Password. Please try again.");
        }
        self.ui.display("Too many failed attempts.");
        Ok(())
    }

    fn admin_menu(&mut self, creds: &mut AdminCredentials) -> Result<()> {
        let actor = Actor::new("administrator");
        loop {
            self.ui.display("");
            self.ui.display("1. Add Book");
            self.ui.display("2. Remove Book");
            self.ui.display("3. View All Books");
            self.ui.display("4. View Borrowed Books");
            self.ui.display("5. Change Password");
            self.ui.display("6. View Transactions");
            self.ui.display("7. Exit");
            let choice = self.ui.prompt("Enter Your Choice: ")?;
            self.ui.clear();
            match choice.trim() {
                "1" => {
                    let title = self.ui.prompt("Enter Book Name: ")?;
                    let author = self.ui.prompt("Enter Author Name: ")?;
                    let published = self.ui.prompt("Enter Publication Date (YYYY-MM-DD): ")?;
                    let price = self.ui.prompt("Enter Price: ")?;
                    self.run_operation(
                        &actor,
                        Operation::Add {
                            title,
                            author,
                            published,
                            price,
                        },
                    );
                }
                "2" => {
                    let title = self.ui.prompt("Enter Book Name: ")?;
                    self.run_operation(&actor, Operation::Remove { title });
                }
                "3" => self.view_books(),
                "4" => self.view_borrowed(),
                "5" => {
                    let new_password = self.ui.prompt("Enter Your New Password: ")?;
                    match creds.set_password(new_password.trim()) {
                        Ok(()) => self.ui.display("Password changed successfully."),
                        Err(e) => self.ui.display(&e.to_string()),
                    }
                }
                "6" => self.view_transactions(),
                "7" => {
                    self.ui.display("Thank you for using the library.");
                    return Ok(());
                }
                _ => self.ui.display("Invalid choice. Please try again."),
            }
        }
    }

    /// Execute one operation and render the outcome. Storage failures are
    /// fatal to the operation, not to the session.
    fn run_operation(&mut self, actor: &Actor, operation: Operation) {
        match self.engine.execute(actor, operation) {
            Ok(report) => self.display_report(&report),
            Err(e) => self.ui.display(&format!("Operation failed: {}", e)),
        }
    }

    fn display_report(&mut self, report: &OpReport) {
        for notice in &report.notices {
            self.ui.display(&notice.text);
        }
    }

    fn view_books(&mut self) {
        if self.engine.catalog().is_empty() {
            self.ui.display("The catalog is empty.");
            return;
        }
        let rendered: Vec<String> = self.engine.catalog().books().iter().map(render_book).collect();
        for text in rendered {
            self.ui.display(&text);
            self.ui.display("");
        }
    }

    fn view_borrowed(&mut self) {
        match self.engine.borrows() {
            Ok(rows) if rows.is_empty() => self.ui.display("No borrowed books."),
            Ok(rows) => {
                for row in &rows {
                    self.ui.display(&render_borrow(row));
                }
            }
            Err(e) => self.ui.display(&format!("Cannot read borrow ledger: {}", e)),
        }
    }

    fn view_transactions(&mut self) {
        match self.engine.transactions() {
            Ok(rows) if rows.is_empty() => self.ui.display("No transactions found."),
            Ok(rows) => {
                self.ui.display("=== Transactions ===");
                for row in &rows {
                    self.ui.display(&render_transaction(row));
                    self.ui.display(&"-".repeat(40));
                }
            }
            Err(e) => self.ui.display(&format!("Cannot read transactions: {}", e)),
        }
    }
}

fn render_book(book: &Book) -> String {
    format!(
        "Id: {}\nTitle: {}\nAuthor: {}\nPublication Date: {}\nPrice: {}",
        book.id,
        book.title,
        book.author,
        book.published.format(DATE_FORMAT),
        book.price_display()
    )
}

fn render_borrow(row: &BorrowRecord) -> String {
    format!(
        "{} (id {}) borrowed by {} ({})",
        row.book_title, row.book_id, row.actor_name, row.actor_id
    )
}

fn render_transaction(tx: &TransactionRecord) -> String {
    let price = match tx.price {
        Some(_) => tx.price_display(),
        None => "0".to_string(),
    };
    format!(
        "Process Type : {}\nTime         : {}\nCustomer Name: {}\nCustomer ID  : {}\nBook Name    : {}\nBook ID      : {}\nPrice        : {}",
        tx.process_type,
        tx.timestamp_display(),
        tx.actor_name,
        tx.actor_id,
        tx.book_title,
        tx.book_id,
        price
    )
}
