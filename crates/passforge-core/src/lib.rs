//! `passforge-core` — Credential generation and strength analysis engine.
//!
//! Pure and synchronous: zero I/O, zero async, no global state. Randomness
//! is injected through [`SecureRandomSource`]; persistence and presentation
//! belong to the caller.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod rng;

pub mod charset;
pub mod policy;

pub mod candidate;
pub mod generator;

pub mod validate;

pub mod entropy;
pub mod strength;

pub mod orchestrator;

pub use candidate::Candidate;
pub use charset::{build_alphabet, Alphabet, CharClass};
pub use entropy::{estimate_entropy, CrackTime, EntropyConvention, EntropyResult};
pub use error::ForgeError;
pub use generator::Generator;
pub use orchestrator::{
    forge, forge_with, generate_satisfying, generate_satisfying_with, ForgedSecret,
    GenerateOptions, DEFAULT_MAX_ATTEMPTS,
};
pub use policy::{ClassSelection, GenerationPolicy, RequirementsPolicy, Strategy};
pub use rng::{OsRandom, SecureRandomSource, SeededRandom};
pub use strength::{score_strength, StrengthBreakdown, StrengthLabel, SubScore, Suggestion};
pub use validate::{is_common_secret, validate, ValidationReport, Violation, COMMON_SECRETS};
