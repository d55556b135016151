//! Shape of Us protocol crate.
//! Host-driven: parsing, codec and metrics are pure; framed I/O is generic over tokio streams.

pub mod engine;
pub mod profile;
pub mod protocol;
pub mod wire;

pub use engine::{compute, ComputationError};
pub use profile::{parse_line, parse_profile, Field, ProfileError};
pub use protocol::{Gender, HealthReport, ImcStatus, Nutrients, Profile, DEFAULT_ADDR};
pub use wire::{
    decode_frame, decode_payload, encode_frame, encode_payload, read_frame, within, write_frame,
    FrameDecodeError, FrameEncodeError,
};
