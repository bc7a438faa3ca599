#![forbid(unsafe_code)]

//! Deterministic fixtures for sheet tests.
//!
//! - [`RecordingSurface`]: a presenting surface that logs every call.
//! - [`EventRecorder`]: subscribes to every sheet notification in order.
//! - [`FrameClock`]: fixed-step frame timestamps and drive loops.
//!
//! Transcripts of surface calls and events render as JSONL and hash with
//! blake3, so scenario outputs can be compared across runs.

pub mod clock;
pub mod recorder;
pub mod surface;

pub use clock::{FrameClock, frame_step_ms};
pub use recorder::{EventRecorder, SheetEvent};
pub use surface::{RecordingSurface, SurfaceOp};

/// `blake3:<hex>` checksum of newline-joined lines.
#[must_use]
pub fn transcript_checksum<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = blake3::Hasher::new();
    for line in lines {
        hasher.update(line.as_ref().as_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}
