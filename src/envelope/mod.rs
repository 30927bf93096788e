//! ADSR brightness envelopes for addressable outputs.
//!
//! The envelope side of the crate splits into the shared per-channel
//! parameter set ([`EnvelopeParams`]) and the per-output runtime state
//! ([`LightSlot`]) whose stage machine turns elapsed wall-clock time into a
//! brightness level.

mod params;
mod slot;

pub use params::EnvelopeParams;
pub use slot::{EnvelopeStage, LightSlot};
