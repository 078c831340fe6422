//! Consensus domain
//!
//! A consensus run asks an ordered list of participants, each a
//! (model, stance) pair, to evaluate one proposal and then synthesizes
//! their answers. The run is driven by the caller across several calls:
//!
//! ```text
//! step 1            step 2..            last participant
//! ┌──────────┐     ┌──────────────┐     ┌────────────┐
//! │ Proposal │ ──▶ │ Consultation │ ──▶ │ Synthesis  │
//! │ capture  │     │ (one / call) │     │            │
//! └──────────┘     └──────────────┘     └────────────┘
//! ```
//!
//! All progress (`current_model_index`, `model_responses`) round-trips
//! through the caller's payload; nothing is held between calls except the
//! conversation thread.

pub mod entities;
pub mod state;

pub use entities::{ConsensusModel, ModelResponseRecord, Stance};
pub use state::{ConsensusPhase, ConsensusRequest, ConsensusState, validate_participants};
