// Operations
mod operations;
pub use operations::*;

// Models
mod members;
pub use members::*;
