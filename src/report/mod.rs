//! Report renderers for aggregated license data.
//!
//! - [`tree`] — `licenses → license → package → fields` tree, the default view.
//! - [`table`] — fixed six-column rows, as a JSON table or a terminal table.
//! - [`disclaimer`] — flat JSON array of non-private packages for legal notices.

pub mod disclaimer;
pub mod table;
pub mod tree;
