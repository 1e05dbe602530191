//! Grammar productions for the Flow language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Items (`flow`, `build`) live in `items`, flow-body statements in `statements`,
//! and the Pratt expression parser in `expressions`.

mod expressions;
mod items;
mod statements;
