//! Integration tests for the mechanism builders and the scene
//! assembler, driven through a recording fake of the external solver.

mod common;

use approx::assert_relative_eq;
use common::{RecordingWorld, GROUND};
use goldberg::{
    mechanism::{
        self,
        rope::{self, RopeAnchor, RopeOptions},
        DominoRow,
    },
    prelude::*,
};

#[test]
fn boundary_walls_enclose_the_viewport() {
    let mut world = RecordingWorld::default();
    let walls = mechanism::build_boundary(&mut world, Size::new(1800., 1000.)).unwrap();

    assert_eq!(world.bodies.len(), 4);
    assert_eq!(world.shapes.len(), 4);

    let mut min_x: FloatNum = FloatNum::MAX;
    let mut max_x: FloatNum = FloatNum::MIN;
    let mut min_y: FloatNum = FloatNum::MAX;
    let mut max_y: FloatNum = FloatNum::MIN;
    for wall in walls {
        let body = world.body(wall);
        assert_eq!(body.kind, BodyKind::Static);

        let shapes = world.shapes_of(wall);
        assert_eq!(shapes.len(), 1);
        let Geometry::Box { size } = &shapes[0].geometry else {
            panic!("boundary wall is not a box");
        };

        min_x = min_x.min(body.position.x() - size.width() / 2.);
        max_x = max_x.max(body.position.x() + size.width() / 2.);
        min_y = min_y.min(body.position.y() - size.height() / 2.);
        max_y = max_y.max(body.position.y() + size.height() / 2.);
    }

    // combined extents cover the whole rectangle
    assert!(min_x <= 0. && max_x >= 1800.);
    assert!(min_y <= 0. && max_y >= 1000.);
}

#[test]
fn ball_is_a_single_tagged_dynamic_circle() {
    let mut world = RecordingWorld::default();
    let ball = mechanism::build_ball(&mut world, [120., 60.], 15., 3.).unwrap();

    assert_eq!(world.bodies.len(), 1);
    let body = world.body(ball);
    assert_eq!(body.kind, BodyKind::Dynamic);
    assert_relative_eq!(body.mass, 3.);
    assert_eq!(body.position, Point::new(120., 60.));

    let shapes = world.shapes_of(ball);
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].geometry, Geometry::Circle { radius: 15. });
    assert_eq!(shapes[0].tag, Some(CollisionTag::BALL));
}

#[test]
fn ball_rejects_degenerate_parameters() {
    let mut world = RecordingWorld::default();

    assert!(matches!(
        mechanism::build_ball(&mut world, [0., 0.], -1., 3.),
        Err(Error::NonPositive { .. })
    ));
    assert!(matches!(
        mechanism::build_ball(&mut world, [0., 0.], 15., 0.),
        Err(Error::NonPositive { .. })
    ));
    // nothing half-built leaks into the world
    assert!(world.bodies.is_empty());
}

#[test]
fn ramp_rejects_zero_length_segment() {
    let mut world = RecordingWorld::default();
    assert!(matches!(
        mechanism::build_ramp(&mut world, [70., 150.], [70., 150.], 6.),
        Err(Error::DegenerateSegment { .. })
    ));
}

#[test]
fn rope_rest_lengths_match_the_path() {
    let mut world = RecordingWorld::default();
    let path = [
        Point::new(650., 400.),
        Point::new(700., 300.),
        Point::new(705., 155.),
        Point::new(730., 140.),
    ];
    let rope = rope::build_rope(&mut world, &path, &RopeOptions::default(), None).unwrap();

    assert_eq!(rope.len(), 4);
    let joints = world.pin_joints();
    assert_eq!(joints.len(), 3);
    for (i, joint) in joints.iter().enumerate() {
        let JointDef::Pin { limits, .. } = joint else {
            unreachable!();
        };
        let expected = path[i].distance(&path[i + 1]);
        assert_relative_eq!(limits.0, expected, epsilon = 1e-4);
        assert_relative_eq!(limits.1, expected, epsilon = 1e-4);
    }
}

#[test]
fn rope_of_three_collinear_waypoints_produces_two_joints() {
    let mut world = RecordingWorld::default();
    let path = [
        Point::new(500., 350.),
        Point::new(500., 450.),
        Point::new(500., 550.),
    ];
    let rope = rope::build_rope(&mut world, &path, &RopeOptions::default(), None).unwrap();

    assert_eq!(rope.len(), 3);
    let joints = world.pin_joints();
    assert_eq!(joints.len(), 2);
    for joint in joints {
        let JointDef::Pin { limits, .. } = joint else {
            unreachable!();
        };
        assert_relative_eq!(limits.0, 100., epsilon = 1e-4);
    }
}

#[test]
fn rope_head_hangs_from_the_anchor_at_measured_distance() {
    let mut world = RecordingWorld::default();
    let pulley = mechanism::build_pulley(&mut world, [680., 150.], 25.).unwrap();

    let path = [Point::new(705., 150.), Point::new(705., 250.)];
    let anchor = RopeAnchor {
        body: pulley,
        position: Point::new(680., 150.),
    };
    rope::build_rope(&mut world, &path, &RopeOptions::default(), Some(anchor)).unwrap();

    let joints = world.pin_joints();
    assert_eq!(joints.len(), 2);
    let JointDef::Pin {
        body_a, limits, ..
    } = joints[0]
    else {
        unreachable!();
    };
    assert_eq!(*body_a, pulley);
    assert_relative_eq!(limits.0, 25., epsilon = 1e-4);
}

#[test]
fn degenerate_paths_yield_degenerate_but_valid_chains() {
    let mut world = RecordingWorld::default();

    let empty = rope::build_rope(&mut world, &[], &RopeOptions::default(), None).unwrap();
    assert!(empty.is_empty());
    assert!(world.joints.is_empty());

    let anchor_body = mechanism::build_pulley(&mut world, [0., 0.], 10.).unwrap();
    let anchor = RopeAnchor {
        body: anchor_body,
        position: Point::new(0., 0.),
    };
    let single = rope::build_rope(
        &mut world,
        &[Point::new(30., 40.)],
        &RopeOptions::default(),
        Some(anchor),
    )
    .unwrap();
    assert_eq!(single.len(), 1);
    // only the anchor joint exists, at the measured distance
    let pins = world.pin_joints();
    assert_eq!(pins.len(), 1);
    let JointDef::Pin { limits, .. } = pins[0] else {
        unreachable!();
    };
    assert_relative_eq!(limits.0, 50., epsilon = 1e-4);
}

#[test]
fn lever_anchor_math_recovers_the_tip() {
    let mut world = RecordingWorld::default();
    let lever =
        mechanism::build_swing_lever(&mut world, [750., 220.], [950., 120.], 8., 1.).unwrap();

    assert_eq!(lever.center(), Point::new(850., 170.));
    assert_eq!(lever.tip_local_anchor(), Point::new(100., -50.));

    // at the initial unrotated pose, midpoint + local anchor is the tip
    let recovered = lever.center() + lever.tip_local_anchor().to_vector();
    assert_eq!(recovered, lever.tip());

    // the pivot joint sits at the pivot point in both frames
    let pivot_joint = world
        .joints
        .iter()
        .find_map(|joint| match joint {
            JointDef::Pivot {
                anchor_a, anchor_b, ..
            } => Some((*anchor_a, *anchor_b)),
            _ => None,
        })
        .expect("lever has a pivot joint");
    assert_eq!(pivot_joint.0, Point::new(0., 0.));
    assert_eq!(pivot_joint.1, Point::new(-100., 50.));
}

#[test]
fn lever_beam_carries_box_moment_of_inertia() {
    let mut world = RecordingWorld::default();
    let lever = mechanism::build_lever(&mut world, [899., 626.], [1055., 626.], 10., 2.).unwrap();

    let beam = world.body(lever.body());
    let expected = Geometry::Box {
        size: Size::new(156., 10.),
    }
    .moment_of_inertia(2.);
    let Moment::Value(moment) = beam.moment else {
        panic!("beam moment must be explicit");
    };
    assert_relative_eq!(moment, expected, epsilon = 1e-3);
}

#[test]
fn elevator_is_grooved_to_a_vertical_axis() {
    let mut world = RecordingWorld::default();
    let elevator =
        mechanism::build_elevator(&mut world, [300., 600.], Size::new(80., 20.), 1., 100.)
            .unwrap();

    let groove = world
        .joints
        .iter()
        .find_map(|joint| match joint {
            JointDef::Groove {
                body_a,
                body_b,
                groove_start,
                groove_end,
                ..
            } => Some((*body_a, *body_b, *groove_start, *groove_end)),
            _ => None,
        })
        .expect("elevator has a groove joint");

    assert_eq!(groove.0, GROUND);
    assert_eq!(groove.1, elevator);
    assert_relative_eq!(groove.2.x(), groove.3.x());
    assert_relative_eq!(groove.2.y(), 500.);
    assert_relative_eq!(groove.3.y(), 700.);
}

#[test]
fn domino_row_spaces_identical_dominoes() {
    let mut world = RecordingWorld::default();
    let row = DominoRow {
        count: 10,
        size: Size::new(10., 45.),
        mass: 0.5,
        friction: 0.4,
        elasticity: 0.4,
        spacing_factor: 0.4,
        start: Point::new(450., 827.5),
    };
    let dominoes = mechanism::build_domino_row(&mut world, &row).unwrap();

    assert_eq!(dominoes.len(), 10);
    let pitch = 10. + 45. * 0.4;
    for (i, &domino) in dominoes.iter().enumerate() {
        let body = world.body(domino);
        assert_relative_eq!(body.position.x(), 450. + pitch * i as FloatNum, epsilon = 1e-3);
        assert_eq!(world.shapes_of(domino)[0].tag, Some(CollisionTag::DOMINO));
    }
}

#[test]
fn scene_assembles_the_full_contraption_from_json() {
    let config: SceneConfig =
        serde_json::from_str(include_str!("fixtures/goldberg.json")).unwrap();
    let mut world = RecordingWorld::default();
    let scene = Scene::assemble(&mut world, &config).unwrap();

    let lever = scene.body("lever").expect("lever is named");
    let receptacle = scene.body("receptacle").expect("receptacle is named");
    let rope = scene.rope("pulley_rope").expect("rope is named");
    assert!(rope.len() > 10);

    // rope head hangs from the receptacle
    let head = rope.head().unwrap();
    assert!(world.pin_joints().iter().any(|joint| {
        matches!(
            joint,
            JointDef::Pin { body_a, body_b, .. } if *body_a == receptacle && *body_b == head
        )
    }));

    // rope tail is pinned onto the lever tip, in the beam's frame
    let tail = rope.tail().unwrap();
    let tip_pin = world
        .pin_joints()
        .into_iter()
        .find_map(|joint| match joint {
            JointDef::Pin {
                body_a, body_b, anchor_b, ..
            } if *body_a == tail && *body_b == lever => Some(*anchor_b),
            _ => None,
        })
        .expect("rope tail pinned to lever");
    assert_eq!(tip_pin, Point::new(100., -50.));

    // the receptacle is additionally grooved to its vertical guide
    assert!(world.joints.iter().any(|joint| {
        matches!(
            joint,
            JointDef::Groove { body_b, .. } if *body_b == receptacle
        )
    }));
}

#[test]
fn scene_rejects_forward_references() {
    let config: SceneConfig = serde_json::from_str(
        r#"{
            "mechanisms": [
                {
                    "type": "rope",
                    "path": [
                        { "type": "waypoints", "points": [[0, 0], [0, 100]] }
                    ],
                    "anchor": "missing_pulley"
                }
            ]
        }"#,
    )
    .unwrap();

    let mut world = RecordingWorld::default();
    assert!(matches!(
        Scene::assemble(&mut world, &config),
        Err(Error::UnknownMechanism(name)) if name == "missing_pulley"
    ));
}

#[test]
fn scene_rejects_duplicate_names() {
    let config: SceneConfig = serde_json::from_str(
        r#"{
            "mechanisms": [
                { "type": "ball", "name": "b", "position": [10, 10], "radius": 5, "mass": 1 },
                { "type": "ball", "name": "b", "position": [50, 10], "radius": 5, "mass": 1 }
            ]
        }"#,
    )
    .unwrap();

    let mut world = RecordingWorld::default();
    assert!(matches!(
        Scene::assemble(&mut world, &config),
        Err(Error::DuplicateName(name)) if name == "b"
    ));
    // the clashing ball was rejected before touching the world
    assert_eq!(world.bodies.len(), 1);
}

#[test]
fn elevator_defaults_to_its_own_travel() {
    let config: SceneConfig = serde_json::from_str(
        r#"{
            "mechanisms": [
                { "type": "elevator", "position": [300, 600] }
            ]
        }"#,
    )
    .unwrap();

    let mut world = RecordingWorld::default();
    Scene::assemble(&mut world, &config).unwrap();

    let groove = world
        .joints
        .iter()
        .find_map(|joint| match joint {
            JointDef::Groove {
                groove_start,
                groove_end,
                ..
            } => Some((*groove_start, *groove_end)),
            _ => None,
        })
        .expect("elevator has a groove joint");

    assert_relative_eq!(groove.0.y(), 500.);
    assert_relative_eq!(groove.1.y(), 700.);
}

#[test]
fn groove_refuses_a_static_body() {
    let config: SceneConfig = serde_json::from_str(
        r#"{
            "mechanisms": [
                { "type": "pulley", "name": "p", "position": [680, 150] },
                { "type": "groove", "body": "p" }
            ]
        }"#,
    )
    .unwrap();

    let mut world = RecordingWorld::default();
    assert!(matches!(
        Scene::assemble(&mut world, &config),
        Err(Error::GrooveOnStaticBody(name)) if name == "p"
    ));
}

#[test]
fn rope_attachment_to_a_body_without_tip_fails() {
    let config: SceneConfig = serde_json::from_str(
        r#"{
            "mechanisms": [
                { "type": "ball", "name": "b", "position": [10, 10], "radius": 5, "mass": 1 },
                {
                    "type": "rope",
                    "path": [
                        { "type": "waypoints", "points": [[0, 0], [0, 100]] }
                    ],
                    "attach": { "target": "lever_tip", "name": "b" }
                }
            ]
        }"#,
    )
    .unwrap();

    let mut world = RecordingWorld::default();
    assert!(matches!(
        Scene::assemble(&mut world, &config),
        Err(Error::NoAttachableTip(name)) if name == "b"
    ));
}
