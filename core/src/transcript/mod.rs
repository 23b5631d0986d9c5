//! Run transcript recording

pub mod entry;
pub mod recorder;

pub use entry::{EntryKind, TranscriptEntry};
pub use recorder::TranscriptRecorder;
