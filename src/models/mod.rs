//! Data models for the bookshelf catalog

pub mod book;

pub use book::{Book, BookPayload, BookQuery, BookSummary};
