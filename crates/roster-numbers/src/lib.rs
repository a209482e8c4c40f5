mod allocate;
pub use allocate::*;
