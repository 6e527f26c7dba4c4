//! Model layer - the guide table and the operations on it
//!
//! - `table` - rows, cells, markers and the summary attribute
//! - `classify` - plantable classification of a row
//! - `filter` - filter values and the engine applying them
//! - `sort` - column sorting and per-column direction state
//! - `modal` - overlay stack for the terminal front-end

pub mod classify;
pub mod filter;
pub mod modal;
pub mod sort;
pub mod table;
