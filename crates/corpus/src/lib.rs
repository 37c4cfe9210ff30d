//! The rant corpus: loading, indexing, and selection.
//!
//! Entries are loaded eagerly once at startup from a JSON resource and are
//! immutable afterwards; every other crate borrows them through an `Arc`.

pub mod entry;
pub mod error;
pub mod select;
pub mod store;

pub use {
    entry::{Category, RantEntry},
    error::{Error, Result},
    select::Strategy,
    store::RantStore,
};
