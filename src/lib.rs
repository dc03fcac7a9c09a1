//! # Libris
//!
//! A terminal-driven library inventory manager backed by flat CSV files.
//! Patrons borrow, return and buy books; the administrator adds and removes
//! them. Every mutating operation keeps four things reconciled: the
//! in-memory catalog, the per-session borrowed flags, the persisted catalog
//! file, and the append-only transaction/borrow logs.
//!
//! ## Layers
//!
//! ```text
//! main.rs / args.rs     argument parsing, wiring, terminal I/O
//!        │
//! session               menu loops, rendering, admin credentials
//!        │
//! engine                the five operations (Add, Remove, Borrow, Return,
//!        │              Buy) as one sum type with a single dispatch point
//! catalog / search      in-memory state and linear title lookup
//!        │
//! store                 LibraryStore trait: FileStore (CSV) or InMemoryStore
//! ```
//!
//! From `engine` inward nothing touches a terminal: operations take plain
//! arguments and return structured reports, so the same core drives the
//! interactive binary and the scripted tests.
//!
//! ## Invariants
//!
//! - A book's id equals its 1-based catalog position after every operation;
//!   Remove and Buy renumber, Borrow and Return never change membership.
//! - The catalog file is rewritten atomically (temp file + rename) and only
//!   after an operation's preconditions have all passed.
//! - The transaction log and borrow ledger are append-only; a Return does
//!   not erase the Borrow row it answers.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
pub mod ui;
