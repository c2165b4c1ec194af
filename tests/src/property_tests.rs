//! Property-Based Tests for the Derived Metrics Engine
//!
//! These tests check the engine's numeric guarantees over wide input ranges:
//! - Allocation never shrinks as emergency pressure grows
//! - Every displayed percentage stays within 0..=99, for any finite input
//! - Route ETA and risk follow from the distance
//! - Trial predictions respect their floors and ceilings
//! - Overall status is never better than either panel
//!
//! Uses proptest for randomized property testing with shrinking.

#[cfg(test)]
mod allocation_properties {
    use dashboard_metrics::{predict_allocation, DeploymentState, EmergencySnapshot, ResourceKind};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn recommendations_monotone_in_high(high in 0u32..500, medium in 0u32..500, low in 0u32..500, pct in 0.0f64..150.0) {
            let deployment = DeploymentState::new(pct).unwrap();
            let base = predict_allocation(&EmergencySnapshot::new(high, medium, low), &deployment);
            let more = predict_allocation(&EmergencySnapshot::new(high + 1, medium, low), &deployment);
            for kind in ResourceKind::ALL {
                prop_assert!(more.get(kind).recommended >= base.get(kind).recommended);
            }
        }

        #[test]
        fn recommendations_monotone_in_medium(high in 0u32..500, medium in 0u32..500, pct in 0.0f64..150.0) {
            let deployment = DeploymentState::new(pct).unwrap();
            let base = predict_allocation(&EmergencySnapshot::new(high, medium, 0), &deployment);
            let more = predict_allocation(&EmergencySnapshot::new(high, medium + 1, 0), &deployment);
            for kind in ResourceKind::ALL {
                prop_assert!(more.get(kind).recommended >= base.get(kind).recommended);
            }
        }

        #[test]
        fn risk_is_a_display_percentage(high in 0u32..10_000, medium in 0u32..10_000, low in 0u32..10_000, pct in -50.0f64..200.0) {
            let deployment = DeploymentState::new(pct).unwrap();
            let plan = predict_allocation(&EmergencySnapshot::new(high, medium, low), &deployment);
            for rec in plan.iter() {
                prop_assert!(rec.risk_percent <= 99);
            }
        }

        #[test]
        fn any_finite_deployment_is_safe(counts in any::<(u32, u32, u32)>(), pct in crate::finite_f64()) {
            let deployment = DeploymentState::new(pct).unwrap();
            let snapshot = EmergencySnapshot::new(counts.0, counts.1, counts.2);
            let plan = predict_allocation(&snapshot, &deployment);
            for rec in plan.iter() {
                prop_assert!(rec.risk_percent <= 99);
                prop_assert!(rec.shortfall() >= 0);
            }
            prop_assert!(plan.peak_risk() <= 99);
            prop_assert_eq!(snapshot.total(), u64::from(counts.0) + u64::from(counts.1) + u64::from(counts.2));
        }
    }
}

#[cfg(test)]
mod route_properties {
    use dashboard_metrics::{plan_route, Coordinate, RiskLevel, ScriptedSource};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn eta_and_risk_follow_distance(
            lat1 in 37.0f64..38.5, lng1 in -123.0f64..-121.5,
            lat2 in 37.0f64..38.5, lng2 in -123.0f64..-121.5,
            blocked in 0u32..10,
        ) {
            let origin = Coordinate::new(lat1, lng1).unwrap();
            let destination = Coordinate::new(lat2, lng2).unwrap();
            let mut rng = ScriptedSource::constant(0.5);
            let plan = plan_route(Some(origin), destination, blocked, &mut rng);

            prop_assert_eq!(plan.eta_minutes, (plan.distance_km / 0.6 + 0.5).floor() as i64);
            let expected = if plan.eta_minutes > 14 { RiskLevel::Elevated } else { RiskLevel::Normal };
            prop_assert_eq!(plan.risk_level, expected);
            prop_assert_eq!(plan.blocked_segment_count, blocked);
            prop_assert_eq!(rng.consumed(), 0);
        }

        #[test]
        fn fallback_distance_in_band(draw in 0.0f64..1.0) {
            let destination = Coordinate::new(37.76, -122.41).unwrap();
            let mut rng = ScriptedSource::constant(draw);
            let plan = plan_route(None, destination, 1, &mut rng);
            prop_assert!(plan.fallback);
            prop_assert!((7.0..9.0).contains(&plan.distance_km));
            prop_assert!((12..=15).contains(&plan.eta_minutes));
        }
    }
}

#[cfg(test)]
mod twin_properties {
    use dashboard_metrics::{simulate_twin, Comorbidities, GeneticsRisk, PatientProfile, ScriptedSource};
    use proptest::prelude::*;

    fn genetics() -> impl Strategy<Value = GeneticsRisk> {
        prop_oneof![
            Just(GeneticsRisk::Low),
            Just(GeneticsRisk::Medium),
            Just(GeneticsRisk::High),
        ]
    }

    proptest! {
        #[test]
        fn outputs_are_display_percentages(
            age in any::<i32>(),
            vitals in -50.0f64..200.0,
            risk in genetics(),
            flags in any::<(bool, bool, bool)>(),
            draws in prop::collection::vec(0.0f64..1.0, 3),
        ) {
            let comorbidities = Comorbidities { diabetes: flags.0, hypertension: flags.1, cardiovascular: flags.2 };
            let profile = PatientProfile::new(age, vitals, risk, comorbidities).unwrap();
            let mut rng = ScriptedSource::new(draws);
            let twin = simulate_twin(&profile, &mut rng);
            prop_assert!(twin.survival_percent <= 99);
            prop_assert!(twin.response_percent <= 99);
            prop_assert!(twin.side_effect_percent <= 99);
            prop_assert_eq!(rng.consumed(), 3);
        }

        #[test]
        fn any_finite_vitals_are_safe(
            age in any::<i32>(),
            vitals in crate::finite_f64(),
            risk in genetics(),
            draw in 0.0f64..1.0,
        ) {
            let profile = PatientProfile::new(age, vitals, risk, Comorbidities::default()).unwrap();
            let twin = simulate_twin(&profile, &mut ScriptedSource::constant(draw));
            prop_assert!(twin.survival_percent <= 99);
            prop_assert!(twin.response_percent <= 99);
            prop_assert!(twin.side_effect_percent <= 99);
        }
    }
}

#[cfg(test)]
mod trial_properties {
    use dashboard_metrics::{predict_trial_outcome, TrialAggregate};
    use proptest::prelude::*;

    #[test]
    fn dropout_reference_points() {
        let dropout = |m: f64| predict_trial_outcome(&TrialAggregate::new(42, m).unwrap()).dropout_percent;
        assert_eq!(dropout(100.0), 20);
        assert_eq!(dropout(130.0), 5);
        assert_eq!(dropout(0.0), 70);
    }

    proptest! {
        #[test]
        fn floors_and_ceiling_hold(count in 0u32..1_000, m in -500.0f64..500.0) {
            let outcome = predict_trial_outcome(&TrialAggregate::new(count, m).unwrap());
            prop_assert!(outcome.completion_percent <= 99);
            prop_assert!(outcome.dropout_percent >= 5);
            prop_assert!(outcome.adverse_event_percent >= 8);
        }

        #[test]
        fn any_finite_match_rate_is_safe(count in any::<u32>(), m in crate::finite_f64()) {
            let outcome = predict_trial_outcome(&TrialAggregate::new(count, m).unwrap());
            prop_assert!(outcome.completion_percent <= 99);
            prop_assert!(outcome.dropout_percent >= 5);
            prop_assert!(outcome.adverse_event_percent >= 8);
        }

        #[test]
        fn count_does_not_matter(a in 0u32..1_000, b in 0u32..1_000, m in 0.0f64..100.0) {
            let first = predict_trial_outcome(&TrialAggregate::new(a, m).unwrap());
            let second = predict_trial_outcome(&TrialAggregate::new(b, m).unwrap());
            prop_assert_eq!(first, second);
        }
    }
}

#[cfg(test)]
mod status_properties {
    use dashboard_metrics::{classify, StatusDomain, StatusInputs, StatusLevel};
    use proptest::prelude::*;

    fn inputs() -> impl Strategy<Value = StatusInputs> {
        (0.0f64..8.0, 50.0f64..100.0, 60.0f64..100.0, 70.0f64..100.0, 0.0f64..2.5).prop_map(
            |(rt, res, coord, rate, time)| StatusInputs::new(rt, res, coord, rate, time).unwrap(),
        )
    }

    proptest! {
        #[test]
        fn classify_is_pure(input in inputs()) {
            prop_assert_eq!(classify(&input), classify(&input));
        }

        #[test]
        fn overall_is_worst_panel(input in inputs()) {
            let report = classify(&input);
            prop_assert!(report.overall.level <= report.disaster.level);
            prop_assert!(report.overall.level <= report.trials.level);
            if report.disaster.level == StatusLevel::Risk || report.trials.level == StatusLevel::Risk {
                prop_assert_eq!(report.overall.level, StatusLevel::Risk);
            }
            prop_assert_eq!(report.overall.label, StatusDomain::Overall.label(report.overall.level));
        }
    }
}
