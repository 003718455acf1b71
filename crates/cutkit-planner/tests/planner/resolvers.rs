use crate::common::{close, context_at};
use cutkit_core::{MotionMode, MoveDirective, Point2, Vector2};
use cutkit_planner::{
    cut_arc, cut_center_circle, cut_chord_arc, cut_diameter_circle, ArcSpec, CenterCircle,
    ChordArc, CircleOption, Compensation, DiameterCircle, Direction,
};
use cutkit_settings::ToolConfig;

const COMPENSATIONS: [Compensation; 3] = [
    Compensation::Inside,
    Compensation::None,
    Compensation::Outside,
];

#[test]
fn test_diameter_circle_from_north_bearing() {
    let mut ctx = context_at(4.0, 4.0, 0.0);
    let mut out = Vec::new();
    let circle = DiameterCircle::new(10.0).with_bearings(0.0, 360.0);
    cut_diameter_circle(&mut ctx, &ToolConfig::default(), &mut out, &circle).unwrap();

    assert_eq!(out.len(), 1);
    let arc = out[0];
    assert_eq!(arc.mode, MotionMode::ArcCW);
    // Radius 5 below the start point: bearing 0 puts the start at the top
    assert!(close(arc.i.unwrap(), 0.0));
    assert!(close(arc.j.unwrap(), -5.0));
    assert!(close(arc.x.unwrap(), 4.0) && close(arc.y.unwrap(), 4.0));
}

#[test]
fn test_zero_center_offset_fails() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let spec = ArcSpec::new(Point2::new(1.0, 1.0), Vector2::new(0.0, 0.0), Direction::Ccw);
    let err = cut_arc(&mut ctx, &ToolConfig::default(), &mut out, &spec).unwrap_err();
    assert!(err.is_geometry_error());
    assert!(out.is_empty());
}

#[test]
fn test_non_positive_size_fails_for_every_resolver() {
    let tool = ToolConfig::default();
    for compensation in COMPENSATIONS {
        for size in [0.0, -2.0] {
            let mut ctx = context_at(0.0, 0.0, 0.0);
            let mut out = Vec::new();

            let circle = DiameterCircle {
                compensation,
                ..DiameterCircle::new(size)
            };
            let err = cut_diameter_circle(&mut ctx, &tool, &mut out, &circle).unwrap_err();
            assert!(err.is_geometry_error());
            assert_eq!(err.command(), "CC");

            let circle = CenterCircle {
                compensation,
                ..CenterCircle::new(size, Point2::new(1.0, 1.0))
            };
            let err = cut_center_circle(&mut ctx, &tool, &mut out, &circle).unwrap_err();
            assert!(err.is_geometry_error());
            assert_eq!(err.command(), "CP");

            // A zero height has no radius at all
            let arc = ChordArc {
                compensation,
                ..ChordArc::new(size.abs(), 0.0)
            };
            let err = cut_chord_arc(&mut ctx, &tool, &mut out, &arc).unwrap_err();
            assert!(err.is_geometry_error());
            assert_eq!(err.command(), "CA");

            assert!(out.is_empty());
        }
    }
}

#[test]
fn test_chord_arc_endpoints() {
    let tool = ToolConfig::default();
    let spec = ChordArc::new(6.0, 1.0)
        .resolve(Point2::new(1.0, 2.0), &tool)
        .unwrap();
    // r = 0.5 + 36 / 8 = 5
    assert_eq!(spec.end, Point2::new(7.0, 2.0));
    assert!(close(spec.center_offset.x, 3.0));
    assert!(close(spec.center_offset.y, -4.0));
    let center = Point2::new(1.0, 2.0).offset(spec.center_offset);
    assert!(close(center.to(spec.end).length(), 5.0));
}

#[test]
fn test_chord_arc_emits_arc_to_end() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let arc = ChordArc {
        angle: Some(45.0),
        tabs: Some(2),
        ..ChordArc::new(2.0, 1.0)
    };
    cut_chord_arc(&mut ctx, &ToolConfig::default(), &mut out, &arc).unwrap();
    assert_eq!(out, vec![MoveDirective::arc(true, 2.0, 0.0, 1.0, 0.0, 60.0)]);
    assert!(ctx.position.same_xy(2.0, 0.0));
}

#[test]
fn test_center_circle_endpoints() {
    let tool = ToolConfig::default();
    for (start, end, expect_entry, expect_end) in [
        (0.0, 90.0, (0.0, 3.0), (3.0, 0.0)),
        (90.0, 270.0, (3.0, 0.0), (-3.0, 0.0)),
        (180.0, 0.0, (0.0, -3.0), (0.0, 3.0)),
    ] {
        let (entry, spec) = CenterCircle::new(6.0, Point2::new(0.0, 0.0))
            .with_bearings(start, end)
            .resolve(Point2::new(10.0, 10.0), &tool)
            .unwrap();
        assert!(close(entry.x, expect_entry.0) && close(entry.y, expect_entry.1));
        assert!(close(spec.end.x, expect_end.0) && close(spec.end.y, expect_end.1));
        let center = entry.offset(spec.center_offset);
        assert!(close(center.x, 0.0) && close(center.y, 0.0));
    }
}

#[test]
fn test_center_circle_keeps_depth_after_no_pullup_arc() {
    let tool = ToolConfig::default();
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let first = DiameterCircle {
        plunge: -0.2,
        plunge_from_zero: true,
        no_pull_up: true,
        ..DiameterCircle::new(1.0)
    };
    cut_diameter_circle(&mut ctx, &tool, &mut out, &first).unwrap();
    assert!(ctx.last_no_pullup);
    let depth = ctx.position.z;
    out.clear();

    let next = CenterCircle::new(1.0, Point2::new(3.0, 0.0));
    cut_center_circle(&mut ctx, &tool, &mut out, &next).unwrap();
    assert_eq!(out[0].mode, MotionMode::Rapid);
    assert!(out[0].z.is_none());
    assert!(out.iter().take(2).all(|d| d.z.map_or(true, |z| z == depth)));
}

#[test]
fn test_pocket_via_diameter_circle() {
    let mut ctx = context_at(0.0, 0.0, 0.0);
    let mut out = Vec::new();
    let circle = DiameterCircle {
        option: CircleOption::Pocket,
        plunge: -0.1,
        ..DiameterCircle::new(1.0).with_bearings(90.0, 90.0)
    };
    let tool = ToolConfig::default().with_diameter(0.2);
    cut_diameter_circle(&mut ctx, &tool, &mut out, &circle).unwrap();

    // step over 0.18 toward the center 0.5 to the west: rings at 0, 0.18, 0.36
    let rings: Vec<_> = out.iter().filter(|d| d.mode.is_arc()).collect();
    assert_eq!(rings.len(), 3);
    for ring in &rings {
        assert!(close(ring.x.unwrap() + ring.i.unwrap(), -0.5));
    }
}
