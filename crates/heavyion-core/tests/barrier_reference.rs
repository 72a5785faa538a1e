use heavyion_core::domain::{BarrierResult, ReactionSystem};
use heavyion_core::modules::barrier::{BarrierModel, barrier, barrier_by_key, compare_all_barriers};
use proptest::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("barrier_reference.json")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BarrierFixtures {
    barrier_cases: Vec<BarrierCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BarrierCase {
    id: String,
    model: String,
    zp: u32,
    ap: u32,
    zt: u32,
    at: u32,
    expected: BarrierResult,
    abs_tol: f64,
}

fn load_fixtures() -> BarrierFixtures {
    let content = fs::read_to_string(fixture_path()).expect("barrier fixture should be readable");
    serde_json::from_str(&content).expect("barrier fixture should parse")
}

fn assert_within(case_id: &str, field: &str, actual: f64, expected: f64, abs_tol: f64) {
    assert!(
        (actual - expected).abs() <= abs_tol,
        "{case_id} {field}: expected {expected}, got {actual}"
    );
}

#[test]
fn barrier_models_match_hand_computed_references() {
    let fixtures = load_fixtures();
    assert!(!fixtures.barrier_cases.is_empty());

    for case in &fixtures.barrier_cases {
        let reaction = ReactionSystem::new(case.zp, case.ap, case.zt, case.at);
        let result = barrier_by_key(&case.model, &reaction)
            .unwrap_or_else(|error| panic!("{}: {error}", case.id));

        assert_within(&case.id, "vb", result.vb, case.expected.vb, case.abs_tol);
        assert_within(&case.id, "rb", result.rb, case.expected.rb, case.abs_tol);
        assert_within(&case.id, "hw", result.hw, case.expected.hw, case.abs_tol);
    }
}

#[test]
fn bass_calcium_lead_rounds_to_documented_values() {
    let result = barrier(BarrierModel::Bass, &ReactionSystem::new(20, 48, 82, 208)).rounded(3);
    assert_eq!(result, BarrierResult::new(214.078, 10.768, 3.607));
}

#[test]
fn polynomial_curvature_is_floored_for_lead_targets() {
    let result = barrier(BarrierModel::Actinide, &ReactionSystem::new(20, 48, 82, 208));
    assert_eq!(result.hw, 0.5);
}

#[test]
fn compare_all_returns_eight_models_in_registry_order() {
    let comparison = compare_all_barriers(&ReactionSystem::new(20, 48, 82, 208));
    let keys: Vec<_> = comparison.iter().map(|(model, _)| model.key()).collect();

    assert_eq!(
        keys,
        ["bass", "dutt", "manju", "acti", "adam", "arora", "ws", "prox"]
    );
    assert!(comparison.iter().all(|(_, result)| !result.is_zero()));
}

proptest! {
    #[test]
    fn any_missing_nucleon_number_yields_zero_sentinel(
        zp in 1u32..120,
        ap in 1u32..300,
        zt in 1u32..120,
        at in 1u32..300,
        missing in 0usize..4,
    ) {
        let mut values = [zp, ap, zt, at];
        values[missing] = 0;
        let reaction = ReactionSystem::new(values[0], values[1], values[2], values[3]);

        for model in BarrierModel::ALL {
            prop_assert_eq!(barrier(model, &reaction), BarrierResult::ZERO);
        }
    }

    #[test]
    fn complete_reactions_always_give_finite_barriers(
        zp in 1u32..120,
        extra_p in 0u32..180,
        zt in 1u32..120,
        extra_t in 0u32..180,
    ) {
        let reaction = ReactionSystem::new(zp, zp + extra_p, zt, zt + extra_t);
        for (_, result) in compare_all_barriers(&reaction) {
            prop_assert!(result.is_finite());
        }
    }

    #[test]
    fn repeated_evaluation_is_bit_identical(
        zp in 1u32..100,
        ap in 1u32..260,
        zt in 1u32..100,
        at in 1u32..260,
    ) {
        let reaction = ReactionSystem::new(zp, ap, zt, at);
        prop_assert_eq!(compare_all_barriers(&reaction), compare_all_barriers(&reaction));
    }
}
