//! A terminal vocabulary notebook: genres of words kept in SQLite, browsed
//! and quizzed one screen at a time.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod screen;
pub mod session;
pub mod store;
pub mod ui;
pub mod validate;

pub use error::{Error, Result};
