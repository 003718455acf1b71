use crate::common::{close, context_at};
use cutkit_core::{MotionMode, MoveDirective, Point2};
use cutkit_planner::{
    corner_order, cut_rectangle, Compensation, Direction, RectOption, RectangleSpec,
    StartCorner,
};
use cutkit_settings::ToolConfig;

#[test]
fn test_corner_order_reference_table() {
    let table = [
        (StartCorner::First, Direction::Cw, [1, 2, 3, 4]),
        (StartCorner::First, Direction::Ccw, [3, 2, 1, 4]),
        (StartCorner::Second, Direction::Cw, [3, 2, 1, 4]),
        (StartCorner::Second, Direction::Ccw, [1, 2, 3, 4]),
        (StartCorner::Third, Direction::Cw, [1, 2, 3, 4]),
        (StartCorner::Third, Direction::Ccw, [3, 2, 1, 4]),
        (StartCorner::Fourth, Direction::Cw, [3, 2, 1, 4]),
        (StartCorner::Fourth, Direction::Ccw, [1, 2, 3, 4]),
    ];
    for (corner, direction, expected) in table {
        assert_eq!(corner_order(corner, direction), expected, "{corner:?} {direction:?}");
    }
}

#[test]
fn test_clockwise_rectangle_from_bottom_left() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = RectangleSpec::new(10.0, 5.0);
    cut_rectangle(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();
    assert_eq!(
        out,
        vec![
            MoveDirective::linear_xy(0.0, 5.0, 60.0),
            MoveDirective::linear_xy(10.0, 5.0, 60.0),
            MoveDirective::linear_xy(10.0, 0.0, 60.0),
            MoveDirective::linear_xy(0.0, 0.0, 60.0),
        ]
    );
}

#[test]
fn test_every_start_corner_traces_a_closed_lap() {
    for corner in [
        StartCorner::First,
        StartCorner::Second,
        StartCorner::Third,
        StartCorner::Fourth,
    ] {
        for direction in [Direction::Cw, Direction::Ccw] {
            let spec = RectangleSpec {
                start_corner: corner,
                direction,
                ..RectangleSpec::new(4.0, 2.0)
            };
            let outline = spec
                .outline(Point2::new(1.0, 1.0), &ToolConfig::default())
                .unwrap();
            assert_eq!(outline[3], Point2::new(1.0, 1.0));
            // Signed area: positive is counter-clockwise
            let mut area = 0.0;
            for k in 0..4 {
                let (a, b) = (outline[k], outline[(k + 1) % 4]);
                area += a.x * b.y - b.x * a.y;
            }
            assert!(close(area.abs() / 2.0, 8.0));
            assert_eq!(area < 0.0, direction.is_clockwise(), "{corner:?} {direction:?}");
        }
    }
}

#[test]
fn test_outside_compensation_grows_rectangle() {
    let spec = RectangleSpec {
        compensation: Compensation::Outside,
        ..RectangleSpec::new(4.0, 2.0)
    };
    let tool = ToolConfig::default().with_diameter(0.5);
    let outline = spec.outline(Point2::new(0.0, 0.0), &tool).unwrap();
    assert_eq!(outline[3], Point2::new(-0.25, -0.25));
    assert_eq!(outline[1], Point2::new(4.25, 2.25));
}

#[test]
fn test_outside_in_pocket() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = RectangleSpec {
        option: RectOption::PocketOutsideIn,
        ..RectangleSpec::new(2.0, 1.0).with_plunge(-0.1, 1)
    };
    let tool = ToolConfig::default().with_diameter(0.2);
    cut_rectangle(&mut ctx, &tool, &mut out, &spec).unwrap();

    // step over 0.18, half the short side 0.5: three laps
    let laps = out
        .iter()
        .filter(|d| d.mode == MotionMode::Linear && d.z.is_none())
        .count();
    assert_eq!(laps, 3 * 4 + 2);
    // Retract, return to the entry corner, then pull up
    let tail = &out[out.len() - 3..];
    assert_eq!(tail[0], MoveDirective::rapid_z(0.5));
    assert_eq!(tail[1], MoveDirective::rapid_xy(0.0, 0.0));
    assert_eq!(tail[2], MoveDirective::rapid_z(0.0));
}

#[test]
fn test_inside_out_pocket_starts_in_the_middle() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = RectangleSpec {
        option: RectOption::PocketInsideOut,
        ..RectangleSpec::new(2.0, 1.0).with_plunge(-0.1, 1)
    };
    let tool = ToolConfig::default().with_diameter(0.2);
    cut_rectangle(&mut ctx, &tool, &mut out, &spec).unwrap();

    assert_eq!(out[0], MoveDirective::rapid_z(0.5));
    assert_eq!(out[1].mode, MotionMode::Rapid);
    assert!(close(out[1].x.unwrap(), 0.36) && close(out[1].y.unwrap(), 0.36));
    assert_eq!(out.last().unwrap(), &MoveDirective::rapid_xy(0.0, 0.0));
    assert!(ctx.position.same_xy(0.0, 0.0));
}

#[test]
fn test_rotation_about_start_corner() {
    let spec = RectangleSpec {
        rotation: 90.0,
        ..RectangleSpec::new(2.0, 1.0)
    };
    let outline = spec
        .outline(Point2::new(1.0, 1.0), &ToolConfig::default())
        .unwrap();
    // Corner 3 (top-left) rotates to the left of the pivot
    assert!(close(outline[0].x, 0.0) && close(outline[0].y, 1.0));
    assert!(close(outline[2].x, 1.0) && close(outline[2].y, 3.0));
    assert!(close(outline[3].x, 1.0) && close(outline[3].y, 1.0));
}

#[test]
fn test_multiple_reps_with_spiral_first_pass() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = RectangleSpec {
        spiral_first_pass: true,
        ..RectangleSpec::new(2.0, 1.0).with_plunge(-0.1, 3)
    };
    cut_rectangle(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap();

    let deepest = out
        .iter()
        .filter_map(|d| d.z)
        .fold(f64::INFINITY, f64::min);
    assert!(close(deepest, -0.3));
    assert_eq!(out.last().unwrap(), &MoveDirective::rapid_z(0.0));
}
