mod columns;
pub use columns::*;

pub mod datetime;

mod row;
pub use row::*;

mod export;
pub use export::*;

mod import;
pub use import::*;
