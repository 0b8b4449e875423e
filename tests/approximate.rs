#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use biarc::error::OperationError;
use biarc::geometry::Curve;
use biarc::math::{cross_2d, Point2, Vector2};
use biarc::{ApproximateBiArcs, Approximation, ApproximationOptions, BiarcError, CubicBezier};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("biarc=debug".parse().unwrap_or_default());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

/// Curve without inflexion points whose end tangents diverge.
fn arch() -> CubicBezier {
    CubicBezier::new(p(100.0, 500.0), p(150.0, 100.0), p(500.0, 150.0), p(350.0, 350.0))
}

/// Curve with one inflexion point inside the unit interval.
fn wave() -> CubicBezier {
    CubicBezier::new(p(150.0, 500.0), p(100.0, 100.0), p(500.0, 350.0), p(350.0, 150.0))
}

fn approximate(curve: CubicBezier, sampling_step: f64, tolerance: f64) -> Approximation {
    init_tracing();
    ApproximateBiArcs::new(curve, ApproximationOptions::new(sampling_step, tolerance))
        .execute()
        .unwrap()
}

fn assert_same_direction(a: &Vector2, b: &Vector2) {
    let (a, b) = (a.normalize(), b.normalize());
    assert_abs_diff_eq!(cross_2d(&a, &b), 0.0, epsilon = 1e-9);
    assert!(a.dot(&b) > 0.0, "{a:?} points against {b:?}");
}

/// Largest distance between each biarc and its part of `curve`, sampled
/// `samples` times per biarc.
fn resampled_error(curve: &CubicBezier, result: &Approximation, samples: u32) -> f64 {
    let mut worst: f64 = 0.0;
    for item in result {
        for i in 0..=samples {
            let s = f64::from(i) / f64::from(samples);
            let on_curve = curve.point_at(item.domain.lerp(s));
            worst = worst.max((item.biarc.point_at(s) - on_curve).norm());
        }
    }
    worst
}

fn assert_chain(curve: &CubicBezier, result: &Approximation) {
    let items = result.items();
    assert!(!items.is_empty());
    let first = &items[0].biarc;
    let last = &items[items.len() - 1].biarc;
    assert_abs_diff_eq!((first.point_at(0.0) - curve.p1).norm(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!((last.point_at(1.0) - curve.p2).norm(), 0.0, epsilon = 1e-6);
    for pair in items.windows(2) {
        assert!(pair[0].domain.t_min < pair[1].domain.t_min);
        let gap = pair[0].biarc.point_at(1.0) - pair[1].biarc.point_at(0.0);
        assert_abs_diff_eq!(gap.norm(), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn arch_is_not_split_at_inflexions() {
    let op = ApproximateBiArcs::new(arch(), ApproximationOptions::default());
    let fragments = op.inflexion_fragments();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].curve, arch());
}

#[test]
fn arch_within_tolerance() {
    let curve = arch();
    let result = approximate(curve, 5.0, 1.0);
    // The end tangents turn by more than a half circle, so a single biarc
    // cannot follow the arch: refinement settles on 16 pieces.
    assert_eq!(result.len(), 16);
    assert!(result.is_converged());
    for item in &result {
        assert!(item.max_error <= 1.0, "error {} above tolerance", item.max_error);
    }
    assert_chain(&curve, &result);

    // The first arc leaves along P1→C1 and the last arc arrives along C2→P2.
    let first = result.biarcs().next().unwrap();
    let last = result.biarcs().last().unwrap();
    assert_same_direction(&first.first().tangent_at(0.0), &(curve.c1 - curve.p1));
    assert_same_direction(&last.second().tangent_at(1.0), &(curve.p2 - curve.c2));

    assert!(resampled_error(&curve, &result, 1000) <= 2.0);
}

#[test]
fn wave_refines_both_inflexion_pieces() {
    let curve = wave();
    let op = ApproximateBiArcs::new(curve, ApproximationOptions::new(5.0, 1.0));
    let fragments = op.inflexion_fragments();
    assert_eq!(fragments.len(), 2);
    let split = fragments[0].domain.t_max;
    assert_abs_diff_eq!(split, 0.577_234_777, epsilon = 1e-6);

    init_tracing();
    let result = op.execute().unwrap();
    assert!(result.is_converged());
    assert!(result.max_error() <= 1.0);
    let before = result.items().iter().filter(|i| i.domain.t_max <= split).count();
    let after = result.items().iter().filter(|i| i.domain.t_min >= split).count();
    assert!(before >= 1);
    assert!(after >= 1);
    assert_eq!(before + after, result.len());
    assert_chain(&curve, &result);
    assert!(resampled_error(&curve, &result, 1000) <= 2.0);
}

#[test]
fn tiny_tolerance_stops_at_depth_cap() {
    init_tracing();
    let options = ApproximationOptions::new(5.0, f64::MIN_POSITIVE).with_max_depth(6);
    let result = ApproximateBiArcs::new(arch(), options).execute().unwrap();
    assert!(!result.is_empty());
    assert!(!result.is_converged());
    assert!(result.len() <= 64);
    assert_chain(&arch(), &result);
}

#[test]
fn looser_tolerance_needs_fewer_biarcs() {
    let fine = approximate(wave(), 5.0, 0.25);
    let coarse = approximate(wave(), 5.0, 4.0);
    assert!(coarse.len() < fine.len());
    assert!(fine.max_error() <= 0.25);
}

#[test]
fn repeated_runs_are_identical() {
    let a = approximate(wave(), 5.0, 1.0);
    let b = approximate(wave(), 5.0, 1.0);
    assert_eq!(a, b);
}

#[test]
fn invalid_parameters_are_rejected() {
    init_tracing();
    for (step, tolerance) in [(0.0, 1.0), (-5.0, 1.0), (5.0, 0.0), (5.0, -1.0), (f64::NAN, 1.0)] {
        let result =
            ApproximateBiArcs::new(arch(), ApproximationOptions::new(step, tolerance)).execute();
        assert!(
            matches!(
                result,
                Err(BiarcError::Operation(OperationError::InvalidParameter { .. }))
            ),
            "step {step}, tolerance {tolerance} was accepted"
        );
    }
}

#[test]
fn degenerate_tangents_still_approximate() {
    // Control points on their endpoints: tangents come from the far control points.
    let curve = CubicBezier::new(p(0.0, 0.0), p(0.0, 0.0), p(100.0, 0.0), p(100.0, 0.0));
    let result = approximate(curve, 1.0, 0.1);
    assert!(result.is_converged());
    assert_chain(&curve, &result);
}

#[test]
fn pline_export_traces_the_biarcs() {
    let curve = wave();
    let result = approximate(curve, 5.0, 1.0);
    let pline = result.to_pline();
    assert_eq!(pline.vertices.len(), 2 * result.len() + 1);
    assert_eq!(pline.segment_count(), 2 * result.len());

    let total: f64 = result.biarcs().map(|b| b.length()).sum();
    assert_abs_diff_eq!(pline.length(), total, epsilon = 1e-6);
    assert_abs_diff_eq!(pline.reversed().length(), total, epsilon = 1e-6);

    let points = pline.to_points(0.05);
    assert_abs_diff_eq!((points[0] - curve.p1).norm(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!((points[points.len() - 1] - curve.p2).norm(), 0.0, epsilon = 1e-6);
}
