//! Query results: the cursor handed to row-mapping functions, the rows it
//! yields, and a fully materialised result set.

mod cursor;
mod result_set;
mod row;

pub use cursor::Cursor;
pub use result_set::ResultSet;
pub use row::DbRow;
