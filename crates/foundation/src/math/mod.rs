pub mod damp;
pub mod vec;

pub use damp::*;
pub use vec::*;
