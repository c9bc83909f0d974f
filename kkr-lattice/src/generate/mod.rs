mod vectors;

pub use vectors::*;
