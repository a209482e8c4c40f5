mod members;
pub use members::*;

mod transfer;
pub use transfer::*;
