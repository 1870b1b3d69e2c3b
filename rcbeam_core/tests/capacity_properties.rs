//! Properties of the capacity check over a sweep of the input domain.

use approx::assert_relative_eq;

use rcbeam_core::calculations::{
    analyze, calculate, classify_failure_mode, BeamParameters, CapacityWarning, FailureMode,
};
use rcbeam_core::errors::CalcResult;
use rcbeam_core::materials::{ConcreteGrade, ShearStrengthTable};
use rcbeam_core::prediction::{predict_capacity, CapacityPredictor};

/// Grid over every bound plus an interior value
fn grid() -> Vec<BeamParameters> {
    let mut out = Vec::new();
    for fck in [20, 25, 30, 35, 40] {
        for fy in [415, 500] {
            for b in [150.0, 300.0, 1000.0] {
                for overall_depth in [200.0, 450.0, 1000.0] {
                    for span in [500.0, 4000.0, 10_000.0] {
                        for load_type in ["Point Load", "Two Point Load"] {
                            for main_dia in [8.0, 16.0, 32.0] {
                                for main_count in [1, 4, 8] {
                                    for stirrup_dia in [6.0, 12.0] {
                                        for spacing in [80.0, 300.0] {
                                            out.push(BeamParameters {
                                                fck,
                                                fy,
                                                b,
                                                overall_depth,
                                                span,
                                                load_type: load_type.to_string(),
                                                main_dia,
                                                main_count,
                                                stirrup_dia,
                                                spacing,
                                            });
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    out
}

#[test]
fn sweep_invariants_hold() {
    for params in grid() {
        let spec = params.validate().unwrap();
        let analysis = analyze(&spec).unwrap();
        let result = analysis.result();
        let ctx = format!("{:?}", params);

        // Effective depth
        let d = params.overall_depth - 25.0 - params.stirrup_dia - params.main_dia / 2.0;
        assert_eq!(result.d_mm, d, "{ctx}");
        assert!(d > 0.0, "{ctx}");

        // Flexure limits
        let fck = params.fck as f64;
        assert!(analysis.flexure.xu_mm <= 0.48 * d, "{ctx}");
        assert!(analysis.flexure.mu_nmm <= 0.138 * fck * params.b * d * d, "{ctx}");
        assert_eq!(analysis.flexure.effective_span_mm, params.span, "{ctx}");

        // Shear strength stays within the tabulated row
        let row = ShearStrengthTable::row(spec.concrete());
        assert!(result.tau_c >= row.tau_c[0] && result.tau_c <= row.tau_c[4], "{ctx}");
        assert_eq!(result.tau_c_max, row.tau_c_max, "{ctx}");

        // Resolver
        let w_flex = analysis.flexure.w_flex_n;
        let w_shear = analysis.shear.w_shear_n;
        assert_eq!(result.wu_kn_gross, w_flex.min(w_shear) / 1000.0, "{ctx}");
        assert_eq!(
            result.wu_kn_net,
            result.wu_kn_gross - analysis.resolution.self_weight_kn,
            "{ctx}"
        );
        assert_eq!(result.mode, classify_failure_mode(w_flex, w_shear), "{ctx}");

        // Warnings fire exactly on their conditions, in order
        let mut expected = Vec::new();
        if result.tau_v > result.tau_c_max {
            expected.push(CapacityWarning::ShearStressExceedsMax.message().to_string());
        }
        if result.wu_kn_net <= 0.0 {
            expected.push(CapacityWarning::FailsUnderSelfWeight.message().to_string());
        }
        assert_eq!(result.warnings, expected, "{ctx}");
    }
}

#[test]
fn identical_input_gives_identical_output() {
    for params in grid().into_iter().step_by(97) {
        let first = serde_json::to_vec(&calculate(&params).unwrap()).unwrap();
        let second = serde_json::to_vec(&calculate(&params).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn two_point_loading_never_carries_less() {
    for params in grid().into_iter().filter(|p| p.load_type == "Point Load") {
        let single = calculate(&params).unwrap();
        let two = calculate(&BeamParameters {
            load_type: "Two Point Load".to_string(),
            ..params
        })
        .unwrap();
        assert!(two.wu_kn_gross >= single.wu_kn_gross);
        assert_eq!(two.mu_knm, single.mu_knm);
    }
}

#[test]
fn self_weight_strictly_increases_with_each_dimension() {
    let base = BeamParameters::default();
    let self_weight = |p: &BeamParameters| {
        analyze(&p.validate().unwrap()).unwrap().resolution.self_weight_kn
    };
    let reference = self_weight(&base);

    assert!(self_weight(&BeamParameters { b: 231.0, ..base.clone() }) > reference);
    assert!(self_weight(&BeamParameters { overall_depth: 451.0, ..base.clone() }) > reference);
    assert!(self_weight(&BeamParameters { span: 4001.0, ..base.clone() }) > reference);
    // 25 kN/m³ x 0.23 x 0.45 x 4.0
    assert_relative_eq!(reference, 10.35, epsilon = 1e-9);
}

#[test]
fn reference_scenario() {
    let params: BeamParameters = serde_json::from_str(
        r#"{"fck": 25, "fy": 415, "b": 300, "D": 450, "L": 4000,
            "load_type": "Point Load", "main_dia": 16, "main_count": 4,
            "stirrup_dia": 8, "spacing": 150}"#,
    )
    .unwrap();
    let result = calculate(&params).unwrap();

    assert_eq!(result.d_mm, 409.0);
    assert!(result.warnings.is_empty());
    assert_eq!(result.mode, FailureMode::Flexural);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["mode"], "Flexural");
    assert_eq!(json["d_mm"], 409.0);
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn overstressed_short_deep_beam_warns_on_shear_stress() {
    let params = BeamParameters {
        fck: 20,
        fy: 500,
        b: 150.0,
        overall_depth: 1000.0,
        span: 500.0,
        load_type: "Two Point Load".to_string(),
        main_dia: 32.0,
        main_count: 8,
        stirrup_dia: 6.0,
        spacing: 80.0,
    };
    let result = calculate(&params).unwrap();

    assert!(result.tau_v > result.tau_c_max);
    assert_eq!(result.mode, FailureMode::Shear);
    assert_eq!(result.warnings, vec!["τv exceeds τc,max → unsafe section.".to_string()]);
}

#[test]
fn table_endpoints_exact() {
    for grade in ConcreteGrade::ALL {
        let row = ShearStrengthTable::row(grade);
        assert_eq!(ShearStrengthTable::design_shear_strength(grade, 0.15), row.tau_c[0]);
        assert_eq!(ShearStrengthTable::design_shear_strength(grade, 1.0), row.tau_c[4]);
    }
}

/// Linear stand-in for a trained model
struct WeightedSum([f64; 9]);

impl CapacityPredictor for WeightedSum {
    fn predict(&self, features: &[f64]) -> CalcResult<f64> {
        Ok(features.iter().zip(self.0.iter()).map(|(x, w)| x * w).sum())
    }
}

#[test]
fn prediction_uses_same_validation_and_feature_order() {
    // Picks out b only
    let model = WeightedSum([0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    for params in grid().into_iter().step_by(251) {
        let out = predict_capacity(&params, &model).unwrap();
        assert_eq!(out.predicted_capacity_kn, params.b);
    }

    let bad = BeamParameters { stirrup_dia: 16.0, ..BeamParameters::default() };
    assert_eq!(
        predict_capacity(&bad, &model).unwrap_err(),
        calculate(&bad).unwrap_err()
    );
}

#[test]
fn predictor_is_shareable_across_threads() {
    let model = std::sync::Arc::new(WeightedSum([1.0; 9]));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let model = std::sync::Arc::clone(&model);
            std::thread::spawn(move || {
                let params = BeamParameters { main_count: i + 1, ..BeamParameters::default() };
                predict_capacity(&params, model.as_ref()).unwrap().predicted_capacity_kn
            })
        })
        .collect();
    let outputs: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for pair in outputs.windows(2) {
        assert_eq!(pair[1] - pair[0], 1.0);
    }
}
