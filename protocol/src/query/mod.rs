mod payload;

pub use payload::*;
