#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for alphabet construction, generation, and the
//! retry orchestrator.

use proptest::prelude::*;
use passforge_core::{
    build_alphabet, generate_satisfying_with, validate, ClassSelection, ForgeError,
    GenerateOptions, GenerationPolicy, RequirementsPolicy, SeededRandom, Strategy as Mode,
};

/// Strategy for a class selection with at least one class enabled.
fn classes_strategy() -> impl Strategy<Value = ClassSelection> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_filter("at least one class", |(u, l, d, s)| *u || *l || *d || *s)
        .prop_map(|(upper, lower, digits, symbols)| ClassSelection {
            upper,
            lower,
            digits,
            symbols,
        })
}

/// Strategy for a uniform-style policy.
fn policy_strategy() -> impl Strategy<Value = GenerationPolicy> {
    (
        1usize..64,
        classes_strategy(),
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(Mode::Uniform),
            Just(Mode::NoConsecutive),
            Just(Mode::NoRepeated),
        ],
    )
        .prop_map(
            |(length, classes, exclude_similar, exclude_ambiguous, strategy)| GenerationPolicy {
                length,
                classes,
                exclude_similar,
                exclude_ambiguous,
                strategy,
                ..GenerationPolicy::default()
            },
        )
}

proptest! {
    /// `build_alphabet` is a pure function of the policy.
    #[test]
    fn alphabet_is_deterministic(policy in policy_strategy()) {
        let a = build_alphabet(&policy).unwrap();
        let b = build_alphabet(&policy).unwrap();
        prop_assert_eq!(a.symbols(), b.symbols());
    }

    /// Alphabets never contain duplicates.
    #[test]
    fn alphabet_has_no_duplicates(policy in policy_strategy()) {
        let alphabet = build_alphabet(&policy).unwrap();
        let unique: std::collections::HashSet<&char> = alphabet.symbols().iter().collect();
        prop_assert_eq!(unique.len(), alphabet.len());
    }

    /// Every generated symbol comes from the policy alphabet, and a
    /// candidate is only returned at full length.
    #[test]
    fn candidates_draw_from_alphabet(policy in policy_strategy(), seed in any::<u64>()) {
        let alphabet = build_alphabet(&policy).unwrap();
        let mut rng = SeededRandom::new(seed);
        let batch =
            generate_satisfying_with(&mut rng, &policy, None, &GenerateOptions::default()).unwrap();
        match &batch[0] {
            Ok(candidate) => {
                prop_assert_eq!(candidate.len(), policy.length);
                prop_assert!(candidate.expose().chars().all(|c| alphabet.contains(c)));
            }
            Err(ForgeError::AlphabetExhausted { requested, produced }) => {
                prop_assert_eq!(policy.strategy, Mode::NoRepeated);
                prop_assert_eq!(*requested, policy.length);
                prop_assert_eq!(*produced, alphabet.len());
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    /// With feasible requirements every returned candidate validates.
    #[test]
    fn feasible_requirements_always_hold(
        length in 8usize..48,
        min_digit in 0usize..3,
        seed in any::<u64>(),
    ) {
        let requirements = RequirementsPolicy {
            min_length: 8,
            max_length: 64,
            require_upper: true,
            require_lower: true,
            min_digit,
            ..RequirementsPolicy::default()
        };
        let options = GenerateOptions { count: 3, ..GenerateOptions::default() };
        let mut rng = SeededRandom::new(seed);
        let batch = generate_satisfying_with(
            &mut rng,
            &GenerationPolicy::uniform(length),
            Some(&requirements),
            &options,
        )
        .unwrap();
        for outcome in batch {
            let candidate = outcome.unwrap();
            prop_assert!(validate(candidate.expose(), &requirements).valid);
        }
    }

    /// Requiring uppercase from an alphabet without it never yields a
    /// false-valid candidate.
    #[test]
    fn infeasible_requirements_never_pass(min_upper in 1usize..6, seed in any::<u64>()) {
        let policy = GenerationPolicy {
            classes: ClassSelection { upper: false, lower: true, digits: true, symbols: true },
            ..GenerationPolicy::uniform(20)
        };
        let requirements = RequirementsPolicy { min_upper, ..RequirementsPolicy::default() };
        let options = GenerateOptions { max_attempts: 10, count: 1 };
        let mut rng = SeededRandom::new(seed);
        let batch = generate_satisfying_with(&mut rng, &policy, Some(&requirements), &options).unwrap();
        let is_unsatisfiable = matches!(
            batch[0],
            Err(ForgeError::RequirementsUnsatisfiable { attempts: 10, .. })
        );
        prop_assert!(is_unsatisfiable);
    }

    /// Pronounceable output keeps its shape for every length.
    #[test]
    fn pronounceable_length_matches(length in 1usize..40, seed in any::<u64>()) {
        let policy = GenerationPolicy {
            strategy: Mode::Pronounceable,
            ..GenerationPolicy::uniform(length)
        };
        let mut rng = SeededRandom::new(seed);
        let batch =
            generate_satisfying_with(&mut rng, &policy, None, &GenerateOptions::default()).unwrap();
        let candidate = batch[0].as_ref().unwrap();
        prop_assert_eq!(candidate.len(), length);
        prop_assert!(candidate.expose().starts_with(|c: char| c.is_ascii_uppercase()));
    }
}
