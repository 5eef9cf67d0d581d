mod report;
mod snapshot;

pub use report::*;
pub use snapshot::*;
