pub mod ancestors;

pub use ancestors::*;
