use crate::common::{close, context_at, last_xy};
use cutkit_core::{MotionMode, Point2, Vector2};
use cutkit_planner::{
    cut_arc, ArcInterpolator, ArcPath, ArcSpec, Direction, EllipseFrame, ZProfile,
};
use cutkit_settings::ToolConfig;
use std::f64::consts::TAU;

#[test]
fn test_closed_shape_sweeps_full_turn() {
    for clockwise in [true, false] {
        let start = Point2::new(3.0, -2.0);
        let path = ArcPath {
            start,
            end: start,
            center_offset: Vector2::new(0.5, 0.5),
            clockwise,
        };
        let arc = ArcInterpolator::new(
            path,
            EllipseFrame::identity(start),
            ZProfile::flat(0.0),
            0.05,
            60.0,
        );
        assert!((arc.sweep() - TAU).abs() <= 1e-6);
        let moves: Vec<_> = arc.collect();
        assert!(moves.len() >= 4);
        let last = moves.last().unwrap();
        assert_eq!((last.x.unwrap(), last.y.unwrap()), (3.0, -2.0));
    }
}

#[test]
fn test_coarse_step_still_has_four_segments() {
    let start = Point2::new(0.0, 0.0);
    let path = ArcPath {
        start,
        end: start,
        center_offset: Vector2::new(1.0, 0.0),
        clockwise: true,
    };
    let count = ArcInterpolator::new(
        path,
        EllipseFrame::identity(start),
        ZProfile::flat(0.0),
        10.0,
        60.0,
    )
    .count();
    assert_eq!(count, 4);
}

#[test]
fn test_unequal_proportions_force_interpolation() {
    let mut ctx = context_at(1.0, 1.0, 0.0);
    let mut out = Vec::new();
    let spec = ArcSpec::new(Point2::new(1.0, 1.0), Vector2::new(1.0, 0.0), Direction::Cw)
        .with_scale(2.0, 1.0);
    cut_arc(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();

    assert!(out.len() > 4);
    assert!(out.iter().all(|d| d.mode == MotionMode::Linear));
    let (x, y) = last_xy(&out);
    assert!(close(x, 1.0) && close(y, 1.0));
    // Points lie on the ellipse centered at (3, 1) with semi-axes 2 and 1
    for d in &out {
        let dx = (d.x.unwrap() - 3.0) / 2.0;
        let dy = d.y.unwrap() - 1.0;
        assert!(close(dx.hypot(dy), 1.0));
    }
}

#[test]
fn test_active_transform_forces_interpolation() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    ctx.transforms.level.apply = true;
    let mut out = Vec::new();
    let spec = ArcSpec::new(Point2::new(2.0, 0.0), Vector2::new(1.0, 0.0), Direction::Ccw);
    cut_arc(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();

    assert!(out.iter().all(|d| d.mode == MotionMode::Linear));
    // Counter-clockwise from the west side of the circle passes below the center
    assert!(out.iter().any(|d| d.y.unwrap() < -0.9));
    let (x, y) = last_xy(&out);
    assert_eq!((x, y), (2.0, 0.0));
    assert!(ctx.position.same_xy(2.0, 0.0));
}

#[test]
fn test_interpolated_spiral_reaches_depth() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = ArcSpec::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Direction::Cw)
        .with_scale(1.0, 0.5)
        .with_plunge(-0.25, 2)
        .with_option(cutkit_planner::CircleOption::Spiral)
        .with_no_pull_up(true);
    cut_arc(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();
    assert!(close(out.last().unwrap().z.unwrap(), -0.5));
    assert!(close(ctx.position.z, -0.5));
}
