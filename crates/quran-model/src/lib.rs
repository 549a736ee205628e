pub mod envelope;
pub mod passage;

pub use envelope::*;
pub use passage::*;
