use crate::common::{close, context_at, TOLERANCE};
use cutkit_core::{MotionMode, MoveDirective, Point2, Vector2};
use cutkit_planner::{
    cut_arc, cut_rectangle, ArcSpec, CircleOption, Direction, RectOption, RectangleSpec,
};
use cutkit_settings::ToolConfig;

fn pocket(scale: f64) -> Vec<MoveDirective> {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = ArcSpec::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Direction::Cw)
        .with_option(CircleOption::Pocket)
        .with_scale(scale, scale);
    cut_arc(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();
    out
}

#[test]
fn test_scaled_pocket_rings_are_step_over_apart() {
    let step_over = ToolConfig::default().step_over();
    for (scale, rings) in [(2.0, 9), (0.5, 3), (1.0, 5)] {
        let out = pocket(scale);
        let starts: Vec<f64> = out
            .iter()
            .filter(|d| d.mode == MotionMode::ArcCW)
            .map(|d| d.x.unwrap())
            .collect();
        assert_eq!(starts.len(), rings, "scale {scale}");
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] <= step_over + TOLERANCE, "scale {scale}: {pair:?}");
        }
        // The innermost ring reaches within one step of the scaled center
        let center_x = scale;
        assert!(center_x - starts[rings - 1] <= step_over + TOLERANCE, "scale {scale}");
    }
}

#[test]
fn test_interpolated_pocket_stays_inside_ellipse() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = ArcSpec::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Direction::Ccw)
        .with_option(CircleOption::Pocket)
        .with_scale(2.0, 1.0);
    cut_arc(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();

    let (cut, tail) = out.split_at(out.len() - 3);
    assert_eq!(
        tail,
        [
            MoveDirective::rapid_z(0.5),
            MoveDirective::rapid_xy(0.0, 0.0),
            MoveDirective::rapid_z(0.0),
        ]
    );
    // 9 interpolated rings of at least 4 segments each
    assert!(cut.len() >= 9 * 4);
    for d in cut {
        assert_eq!(d.mode, MotionMode::Linear);
        let (x, y) = (d.x.unwrap(), d.y.unwrap());
        // Ellipse centred on (2, 0) with semi-axes 2 and 1
        let r = ((x - 2.0) / 2.0).powi(2) + y.powi(2);
        assert!(r <= 1.0 + 1e-9, "({x}, {y}) outside the ellipse");
    }
    // Rings are joined by straight moves along +X, one step_over apart
    let step_over = ToolConfig::default().step_over();
    let joins: Vec<f64> = cut
        .windows(2)
        .filter(|w| {
            close(w[1].x.unwrap() - w[0].x.unwrap(), step_over)
                && w[0].y == Some(0.0)
                && w[1].y == Some(0.0)
        })
        .map(|w| w[1].x.unwrap())
        .collect();
    assert_eq!(joins.len(), 8);
    for (k, x) in joins.iter().enumerate() {
        assert!(close(*x, step_over * (k + 1) as f64), "join {k} at {x}");
    }
}

#[test]
fn test_extreme_overlap_is_rejected_before_cutting() {
    let tool = ToolConfig {
        pocket_overlap: 99.999999999,
        ..ToolConfig::default()
    };
    assert!(tool.validate().is_ok());

    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let rect = RectangleSpec {
        option: RectOption::PocketOutsideIn,
        ..RectangleSpec::new(10.0, 10.0)
    };
    let err = cut_rectangle(&mut ctx, &tool, &mut out, &rect).unwrap_err();
    assert!(err.is_parameter_error());
    assert_eq!(err.command(), "CR");

    let circle = ArcSpec::new(Point2::new(0.0, 0.0), Vector2::new(5.0, 0.0), Direction::Cw)
        .with_option(CircleOption::Pocket);
    let err = cut_arc(&mut ctx, &tool, &mut out, &circle).unwrap_err();
    assert!(err.is_parameter_error());
    assert!(out.is_empty());
}
