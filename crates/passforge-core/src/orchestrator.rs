//! Bounded generate-then-validate loop and the result bundle.

use serde::Serialize;

use crate::candidate::Candidate;
use crate::entropy::{EntropyConvention, EntropyResult};
use crate::error::ForgeError;
use crate::generator::Generator;
use crate::policy::{GenerationPolicy, RequirementsPolicy};
use crate::rng::{OsRandom, SecureRandomSource};
use crate::strength::{score_strength, StrengthBreakdown};
use crate::validate::{is_common_secret, validate, Violation, COMMON_SECRETS};

/// Default retry budget per candidate.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Upper bound on candidates per call.
pub const MAX_BATCH: usize = 10_000;

/// Retry budget and batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Generate/validate attempts per candidate before giving up.
    pub max_attempts: u32,
    /// Number of independent candidates.
    pub count: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            count: 1,
        }
    }
}

impl GenerateOptions {
    fn check(&self) -> Result<(), ForgeError> {
        if self.max_attempts == 0 {
            return Err(ForgeError::InvalidPolicy(
                "max attempts must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_BATCH).contains(&self.count) {
            return Err(ForgeError::InvalidPolicy(format!(
                "count must be between 1 and {MAX_BATCH}, got {}",
                self.count
            )));
        }
        Ok(())
    }
}

/// Per-candidate outcomes of a batch, in request order.
pub type Batch<T> = Vec<Result<T, ForgeError>>;

/// Generate `options.count` candidates with the OS CSPRNG.
///
/// See [`generate_satisfying_with`].
///
/// # Errors
///
/// Same as [`generate_satisfying_with`].
pub fn generate_satisfying(
    policy: &GenerationPolicy,
    requirements: Option<&RequirementsPolicy>,
    options: &GenerateOptions,
) -> Result<Batch<Candidate>, ForgeError> {
    generate_satisfying_with(&mut OsRandom, policy, requirements, options)
}

/// Generate `options.count` independent candidates drawn from `rng`.
///
/// Without `requirements` each candidate is a single generator call. With
/// them, each candidate gets up to `options.max_attempts` generate/validate
/// rounds and the first valid one wins; exhaustion yields
/// [`ForgeError::RequirementsUnsatisfiable`] for that slot, carrying the
/// last attempt's violations. A failing candidate never stops the rest of
/// the batch, and no slot ever holds a candidate that fails validation.
///
/// A no-repeat candidate shorter than requested is reported as
/// [`ForgeError::AlphabetExhausted`], never as success.
///
/// # Errors
///
/// The whole call fails, before or during the batch, on:
/// - invalid options, policy, or requirements;
/// - [`ForgeError::EmptyAlphabet`];
/// - [`ForgeError::RngUnavailable`], which is never retried.
pub fn generate_satisfying_with<R: SecureRandomSource>(
    rng: &mut R,
    policy: &GenerationPolicy,
    requirements: Option<&RequirementsPolicy>,
    options: &GenerateOptions,
) -> Result<Batch<Candidate>, ForgeError> {
    options.check()?;
    if let Some(requirements) = requirements {
        requirements.check()?;
    }
    let generator = Generator::from_policy(policy)?;

    let mut batch = Vec::with_capacity(options.count);
    for _ in 0..options.count {
        match generate_one(&generator, rng, requirements, options.max_attempts) {
            Err(e) if e.is_fatal() => {
                tracing::error!(error = %e, "aborting generation");
                return Err(e);
            }
            outcome => batch.push(outcome),
        }
    }
    Ok(batch)
}

fn generate_one<R: SecureRandomSource>(
    generator: &Generator,
    rng: &mut R,
    requirements: Option<&RequirementsPolicy>,
    max_attempts: u32,
) -> Result<Candidate, ForgeError> {
    let Some(requirements) = requirements else {
        return reject_truncated(generator.generate(rng)?);
    };

    let mut last: Vec<Violation> = Vec::new();
    for attempt in 1..=max_attempts {
        let candidate = reject_truncated(generator.generate(rng)?)?;
        let report = validate(candidate.expose(), requirements);
        if report.valid {
            tracing::debug!(attempt, strategy = generator.strategy().as_str(), "candidate accepted");
            return Ok(candidate);
        }
        last = report.violations;
    }

    tracing::warn!(
        attempts = max_attempts,
        violations = last.len(),
        strategy = generator.strategy().as_str(),
        "retry budget exhausted"
    );
    Err(ForgeError::RequirementsUnsatisfiable {
        attempts: max_attempts,
        violations: last,
    })
}

fn reject_truncated(candidate: Candidate) -> Result<Candidate, ForgeError> {
    match candidate.requested_length() {
        Some(requested) if candidate.is_truncated() => {
            tracing::debug!(requested, produced = candidate.len(), "no-repeat candidate truncated");
            Err(ForgeError::AlphabetExhausted {
                requested,
                produced: candidate.len(),
            })
        }
        _ => Ok(candidate),
    }
}

/// A candidate together with its analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgedSecret {
    pub candidate: Candidate,
    /// Entropy from the nominal alphabet size.
    pub entropy: EntropyResult,
    /// Entropy from the producing strategy's true keyspace.
    pub structural_entropy: EntropyResult,
    pub strength: StrengthBreakdown,
    /// Advisory: the value resembles a well-known secret.
    pub common_secret: bool,
}

impl ForgedSecret {
    /// Analyze `candidate` against the built-in denylist.
    #[must_use]
    pub fn analyze(candidate: Candidate) -> Self {
        Self::analyze_against(candidate, COMMON_SECRETS)
    }

    /// Analyze `candidate` against a caller-supplied denylist.
    #[must_use]
    pub fn analyze_against<I, S>(candidate: Candidate, denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let common_secret = is_common_secret(candidate.expose(), denylist);
        if common_secret {
            tracing::warn!(strategy = candidate.strategy().as_str(), "candidate resembles a common secret");
        }
        Self {
            entropy: candidate.entropy(EntropyConvention::Nominal),
            structural_entropy: candidate.entropy(EntropyConvention::Structural),
            strength: score_strength(candidate.expose()),
            common_secret,
            candidate,
        }
    }
}

/// [`generate_satisfying`] followed by [`ForgedSecret::analyze`] on every
/// successful candidate.
///
/// # Errors
///
/// Same as [`generate_satisfying_with`].
pub fn forge(
    policy: &GenerationPolicy,
    requirements: Option<&RequirementsPolicy>,
    options: &GenerateOptions,
) -> Result<Batch<ForgedSecret>, ForgeError> {
    forge_with(&mut OsRandom, policy, requirements, options)
}

/// [`forge`] with an injected random source.
///
/// # Errors
///
/// Same as [`generate_satisfying_with`].
pub fn forge_with<R: SecureRandomSource>(
    rng: &mut R,
    policy: &GenerationPolicy,
    requirements: Option<&RequirementsPolicy>,
    options: &GenerateOptions,
) -> Result<Batch<ForgedSecret>, ForgeError> {
    Ok(generate_satisfying_with(rng, policy, requirements, options)?
        .into_iter()
        .map(|outcome| outcome.map(ForgedSecret::analyze))
        .collect())
}
