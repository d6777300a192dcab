mod raw_payload;
mod raw_snapshot;

pub use raw_payload::*;
pub use raw_snapshot::*;
