//! Error types and result definitions for the LLKV page frame engine.
//!
//! This crate provides a unified error type ([`Error`]) and result type alias
//! ([`Result<T>`]) used throughout the LLKV crates. All operations that could
//! fail return `Result<T>`, where the error variant contains detailed
//! information about what went wrong.
//!
//! # Error Categories
//!
//! - **User input errors** ([`Error::InvalidArgumentError`]): bad configuration, malformed ranges
//! - **Lookup failures** ([`Error::NotFound`]): missing partitions, columns, symbol tables
//! - **Lifecycle errors** ([`Error::CursorClosed`], [`Error::NotAttached`]): cursor misuse
//! - **Metadata violations** ([`Error::InconsistentColumnTop`], [`Error::PageOutOfBounds`]):
//!   the table accessor disagrees with itself
//! - **Internal errors** ([`Error::Internal`]): bugs or unexpected states

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
