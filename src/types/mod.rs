//! Data types shared by the query, windowing and selection stages.

mod column;
mod row;
mod selection;
mod sort;
mod window;

pub use column::*;
pub use row::*;
pub use selection::*;
pub use sort::*;
pub use window::*;
