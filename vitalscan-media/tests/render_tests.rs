//! Report rendering and waveform geometry properties

use vitalscan_core::AnalysisResult;
use vitalscan_media::{plot_points, RenderError, ReportRenderer, RiskTier, WaveformStyle};

fn success_result(risk_level: &str, risk_score: f64) -> AnalysisResult {
    AnalysisResult {
        success: true,
        error: None,
        heart_rate: 76.0,
        hrv: 38.0,
        risk_level: risk_level.to_string(),
        risk_score,
        recommendations: vec![
            "Maintain regular physical activity".to_string(),
            "Get 7-8 hours of quality sleep nightly".to_string(),
        ],
        waveform_data: vec![40.0, 65.0, 52.0, 80.0, 47.0],
    }
}

#[test]
fn waveform_points_match_the_documented_mapping() {
    // waveform_data = [0, 50, 100] on a 300x100 surface plots at
    // (0,100), (150,50), (300,0).
    let points = plot_points(&[0.0, 50.0, 100.0], 300, 100);
    assert_eq!(points, vec![(0.0, 100.0), (150.0, 50.0), (300.0, 0.0)]);
}

#[test]
fn rendering_is_a_pure_function_of_its_inputs() {
    let renderer = ReportRenderer::new(WaveformStyle::sized(300, 100));
    let result = success_result("Low", 20.0);
    let first = renderer.render(&result).unwrap();
    let second = renderer.render(&result).unwrap();
    assert_eq!(first.waveform.as_raw(), second.waveform.as_raw());
}

#[test]
fn failed_results_surface_the_server_message_and_render_nothing() {
    let renderer = ReportRenderer::default();
    let err = renderer.render(&AnalysisResult::failure("x")).unwrap_err();
    match err {
        RenderError::AnalysisFailed { message } => assert_eq!(message, "x"),
        other => panic!("expected AnalysisFailed, got {other:?}"),
    }
}

#[test]
fn failed_results_without_a_message_still_fail_cleanly() {
    let renderer = ReportRenderer::default();
    let result = AnalysisResult {
        error: None,
        ..AnalysisResult::failure("placeholder")
    };
    let err = renderer.render(&result).unwrap_err();
    assert!(matches!(err, RenderError::AnalysisFailed { .. }));
}

#[test]
fn tier_selection_follows_the_label_not_the_score() {
    let renderer = ReportRenderer::new(WaveformStyle::sized(120, 60));

    // A "Moderate" label stays Moderate regardless of the numeric score.
    let report = renderer.render(&success_result("Moderate", 42.0)).unwrap();
    assert_eq!(report.tier, RiskTier::Moderate);

    let report = renderer.render(&success_result("Moderate", 95.0)).unwrap();
    assert_eq!(report.tier, RiskTier::Moderate);

    let report = renderer.render(&success_result("Low", 99.0)).unwrap();
    assert_eq!(report.tier, RiskTier::Low);
}

#[test]
fn unrecognized_risk_levels_fall_into_the_high_tier() {
    assert_eq!(RiskTier::from_level("High"), RiskTier::High);
    assert_eq!(RiskTier::from_level("Elevated"), RiskTier::High);
    assert_eq!(RiskTier::from_level(""), RiskTier::High);
    assert_eq!(RiskTier::from_level("low"), RiskTier::High);
}

#[test]
fn vitals_are_copied_verbatim_and_recommendations_replaced_wholesale() {
    let renderer = ReportRenderer::new(WaveformStyle::sized(120, 60));
    let result = success_result("Low", 24.0);
    let report = renderer.render(&result).unwrap();

    assert_eq!(report.heart_rate, 76.0);
    assert_eq!(report.hrv, 38.0);
    assert_eq!(report.risk_level, "Low");
    assert_eq!(report.risk_score, 24.0);
    assert_eq!(report.recommendations, result.recommendations);
}

#[test]
fn two_samples_are_enough_for_a_chart() {
    let renderer = ReportRenderer::new(WaveformStyle::sized(50, 50));
    let mut result = success_result("Low", 20.0);
    result.waveform_data = vec![10.0, 90.0];
    let report = renderer.render(&result).unwrap();
    assert_eq!(report.waveform.dimensions(), (50, 50));
}

#[test]
fn a_single_sample_is_rejected() {
    let renderer = ReportRenderer::new(WaveformStyle::sized(50, 50));
    let mut result = success_result("Low", 20.0);
    result.waveform_data = vec![10.0];
    let err = renderer.render(&result).unwrap_err();
    assert!(matches!(err, RenderError::InsufficientData { points: 1 }));
}

#[test]
fn tier_presentation_is_stable() {
    assert_eq!(RiskTier::Low.style_class(), "risk-low");
    assert_eq!(RiskTier::Moderate.style_class(), "risk-moderate");
    assert_eq!(RiskTier::High.style_class(), "risk-high");
    assert_ne!(RiskTier::Low.badge(), RiskTier::High.badge());
}
