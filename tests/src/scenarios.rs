//! Dashboard Scenario Tests
//!
//! Walk the dashboard through realistic sequences of activity and check
//! what the panels would show afterwards.

use dashboard_metrics::{RandomSource, SeededSource};
use dashboard_sim::{Dashboard, SimConfig, SimError};

/// Open a dashboard and inject `count` incoming emergencies
pub fn dashboard_after_incidents<R: RandomSource>(
    count: usize,
    rng: &mut R,
) -> Result<Dashboard, SimError> {
    let mut dashboard = Dashboard::new(&SimConfig::default())?;
    for _ in 0..count {
        dashboard.simulate_new_emergency(rng);
    }
    Ok(dashboard)
}

/// Peak shortfall risk across resource kinds
pub fn peak_risk(dashboard: &Dashboard) -> Result<u8, SimError> {
    Ok(dashboard.allocation()?.peak_risk())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_metrics::{Coordinate, GeneticsRisk, RiskLevel, ScriptedSource, StatusLevel};
    use dashboard_sim::{MatchCriteria, PatientForm, Simulation};

    #[test]
    fn test_surge_of_incidents() {
        let mut rng = SeededSource::from_seed(21);
        let dashboard = dashboard_after_incidents(12, &mut rng).unwrap();
        let snapshot = dashboard.emergency_snapshot();

        assert_eq!(snapshot.total(), 16);
        assert_eq!(dashboard.emergencies()[15].kind, "Medical Emergency");

        let plan = dashboard.allocation().unwrap();
        assert!(plan.kits.recommended >= 120);
        assert!(peak_risk(&dashboard).unwrap() <= 99);
    }

    #[test]
    fn test_incident_ids_are_unique() {
        let mut rng = SeededSource::from_seed(4);
        let dashboard = dashboard_after_incidents(20, &mut rng).unwrap();
        let mut ids: Vec<_> = dashboard.emergencies().iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 24);
    }

    #[test]
    fn test_trial_panel_degrades_then_recovers() {
        let config = SimConfig::from_json_str(
            r#"{ "initial": { "match_rate_percent": 80, "match_time_seconds": 1.4 } }"#,
        )
        .unwrap();
        let mut dashboard = Dashboard::new(&config).unwrap();
        assert_eq!(dashboard.status().unwrap().trials.level, StatusLevel::Risk);
        assert_eq!(dashboard.status().unwrap().overall.level, StatusLevel::Risk);

        // +2 match rate and -0.09s match time per step
        let mut rng = ScriptedSource::constant(0.9);
        for _ in 0..3 {
            dashboard.simulate_patient_matching(&mut rng);
        }
        assert_eq!(dashboard.metrics().match_rate_percent, 86);
        assert_eq!(dashboard.status().unwrap().trials.level, StatusLevel::Warning);

        for _ in 0..6 {
            dashboard.simulate_patient_matching(&mut rng);
        }
        assert_eq!(dashboard.status().unwrap().trials.level, StatusLevel::Ok);
    }

    #[test]
    fn test_trial_outcome_follows_simulated_match_rate() {
        let mut dashboard = Dashboard::new(&SimConfig::default()).unwrap();
        let before = dashboard.trial_outcome().unwrap();
        let mut rng = ScriptedSource::constant(0.9);
        for _ in 0..5 {
            dashboard.simulate_patient_matching(&mut rng);
        }
        let after = dashboard.trial_outcome().unwrap();
        assert!(after.completion_percent > before.completion_percent);
        assert!(after.dropout_percent < before.dropout_percent);
        assert!(after.adverse_event_percent <= before.adverse_event_percent);
    }

    #[test]
    fn test_route_from_field_unit() {
        let dashboard = Dashboard::new(&SimConfig::default()).unwrap();
        let mut rng = SeededSource::from_seed(1);
        let origin = Coordinate::new(37.78, -122.45).unwrap();
        let plan = dashboard.route(Some(origin), &mut rng);

        assert!((plan.distance_km - 4.16).abs() < 0.05);
        assert_eq!(plan.eta_minutes, 7);
        assert_eq!(plan.risk_level, RiskLevel::Normal);
    }

    #[test]
    fn test_twin_for_high_risk_patient() {
        let dashboard = Dashboard::new(&SimConfig::default()).unwrap();
        let form = PatientForm {
            age: Some(80),
            vitals: Some(40.0),
            genetics: Some(GeneticsRisk::High),
            diabetes: true,
            hypertension: true,
            cardiovascular: true,
        };
        let healthy = PatientForm::default();
        let mut rng = ScriptedSource::constant(0.5);

        let frail = dashboard.twin(&form, &mut rng).unwrap();
        let fit = dashboard.twin(&healthy, &mut rng).unwrap();
        assert!(frail.survival_percent < fit.survival_percent);
        assert!(frail.side_effect_percent > fit.side_effect_percent);
        assert!(frail.risk_score > fit.risk_score);
    }

    #[test]
    fn test_matching_then_simulation() {
        let mut simulation =
            Simulation::new(&SimConfig::default(), SeededSource::from_seed(8)).unwrap();
        let criteria = MatchCriteria::new("Cancer", Some(55), "north");
        let mut form_rng = SeededSource::from_seed(9);
        simulation
            .dashboard_mut()
            .find_matching_trials(&criteria, &mut form_rng);
        simulation.run_for(90);

        let snapshot = simulation.snapshot().unwrap();
        assert_eq!(snapshot.trials.len(), 4);
        assert_eq!(snapshot.trials[3].location, "South Region");
        assert_eq!(snapshot.emergencies.len(), 4);
        assert_eq!(snapshot.intelligence.live_feed.len(), 6);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["elapsed_seconds"], 90);
        assert_eq!(json["intelligence"]["live_feed"].as_array().unwrap().len(), 6);
    }
}
