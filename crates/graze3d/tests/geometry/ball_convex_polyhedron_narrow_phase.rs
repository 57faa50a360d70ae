use approx::assert_relative_eq;
use graze3d::math::{Isometry, Point, Real, Vector};
use graze3d::narrow_phase::{
    GjkConfig, GjkProximity, NarrowPhaseBatch, NarrowPhaseWorkspace, PairKey, SatPenetration,
    SphereConvexPolyhedronAlgorithm, TemporalHintCache, TemporalHintStore,
};
use graze3d::shape::{Ball, ConvexPolyhedron};

fn test_all(
    narrow_phase: &SphereConvexPolyhedronAlgorithm,
    batch: &mut NarrowPhaseBatch,
    hints: &mut TemporalHintCache,
) {
    let count = batch.len();
    let mut workspace = NarrowPhaseWorkspace::new();
    narrow_phase.test_collision(batch, 0, count, true, &mut workspace, hints);
    assert!(workspace.is_released());
}

fn unit_cube() -> ConvexPolyhedron {
    ConvexPolyhedron::cuboid(Vector::repeat(1.0))
}

#[test]
fn separated_ball_is_not_colliding() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let key = PairKey::new(0, 1);
    let i = batch.push(
        key,
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(3.0, 0.0, 0.0),
    );

    test_all(&Default::default(), &mut batch, &mut hints);

    assert!(!batch.is_colliding(i));
    assert!(!batch.item(i).is_escalated());
    assert!(batch.contact(i).is_none());

    let hint = hints.hint(key).unwrap();
    assert!(hint.was_using_gjk && !hint.was_using_sat);
    // The warm-start axis points from the cube toward the ball.
    assert!(hint.gjk_separating_axis.unwrap().x > 0.0);
}

#[test]
fn shallow_ball_is_resolved_by_gjk() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let key = PairKey::new(0, 1);
    let i = batch.push(
        key,
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(1.3, 0.0, 0.0),
    );

    test_all(&Default::default(), &mut batch, &mut hints);

    assert!(batch.is_colliding(i));
    assert!(!batch.item(i).is_escalated());
    let contact = batch.contact(i).unwrap();
    assert_relative_eq!(contact.dist, -0.2, epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal1, Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal2, -Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(contact.point1, Point::new(1.0, 0.0, 0.0), epsilon = 1.0e-4);
    assert_relative_eq!(contact.point2, Point::new(-0.5, 0.0, 0.0), epsilon = 1.0e-4);

    let hint = hints.hint(key).unwrap();
    assert!(hint.was_using_gjk && !hint.was_using_sat);
}

#[test]
fn deep_ball_is_resolved_by_sat() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let key = PairKey::new(0, 1);
    let i = batch.push(
        key,
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(0.2, 0.0, 0.0),
    );

    test_all(&Default::default(), &mut batch, &mut hints);

    assert!(batch.is_colliding(i));
    assert!(batch.item(i).is_escalated());
    let contact = batch.contact(i).unwrap();
    assert_relative_eq!(contact.dist, -1.3, epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal1, Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(contact.point1, Point::new(1.0, 0.0, 0.0), epsilon = 1.0e-4);

    let hint = hints.hint(key).unwrap();
    assert!(hint.was_using_sat && !hint.was_using_gjk);
    assert_eq!(hint.sat_min_face, Some(0));
}

#[test]
fn deep_ball_in_a_tetrahedron_uses_its_slanted_face() {
    let points = vec![
        Point::origin(),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ];
    let indices = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    let tetra = ConvexPolyhedron::from_convex_mesh(points, &indices).unwrap();
    let ball = Ball::new(0.05);
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let key = PairKey::new(0, 1);
    let i = batch.push(
        key,
        &tetra,
        Isometry::identity(),
        &ball,
        Isometry::translation(0.3, 0.3, 0.3),
    );

    test_all(&Default::default(), &mut batch, &mut hints);

    assert!(batch.is_colliding(i));
    assert!(batch.item(i).is_escalated());
    let contact = batch.contact(i).unwrap();
    let expected_dist = 0.9 / (3.0 as Real).sqrt() - 1.0 / (3.0 as Real).sqrt() - 0.05;
    assert_relative_eq!(contact.dist, expected_dist, epsilon = 1.0e-4);
    assert_relative_eq!(
        *contact.normal1,
        Vector::repeat(1.0).normalize(),
        epsilon = 1.0e-4
    );
    assert_eq!(hints.hint(key).unwrap().sat_min_face, Some(3));
}

#[test]
fn contacts_follow_the_shape_order() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let pos_ball = Isometry::translation(1.3, 0.0, 0.0);
    let pos_cube = Isometry::identity();
    let direct = batch.push(PairKey::new(0, 1), &cube, pos_cube, &ball, pos_ball);
    let flipped = batch.push(PairKey::new(2, 3), &ball, pos_ball, &cube, pos_cube);

    test_all(&Default::default(), &mut batch, &mut hints);

    assert!(batch.is_colliding(direct) && batch.is_colliding(flipped));
    let direct = batch.contact(direct).unwrap();
    let flipped = batch.contact(flipped).unwrap();
    assert_relative_eq!(direct.point1, flipped.point2, epsilon = 1.0e-4);
    assert_relative_eq!(direct.point2, flipped.point1, epsilon = 1.0e-4);
    assert_relative_eq!(*direct.normal1, *flipped.normal2, epsilon = 1.0e-4);
    assert_relative_eq!(direct.dist, flipped.dist, epsilon = 1.0e-4);
}

#[test]
fn contacts_are_expressed_in_local_spaces() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let pos_cube = Isometry::new(
        Vector::new(1.0, 2.0, 3.0),
        Vector::z() * core::f64::consts::FRAC_PI_2 as Real,
    );
    let pos_ball = Isometry::translation(1.0, 3.3, 3.0);
    let i = batch.push(PairKey::new(0, 1), &cube, pos_cube, &ball, pos_ball);

    test_all(&Default::default(), &mut batch, &mut hints);

    assert!(batch.is_colliding(i));
    let contact = batch.contact(i).unwrap();
    assert_relative_eq!(contact.dist, -0.2, epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal1, Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(pos_cube * *contact.normal1, Vector::y(), epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal2, -Vector::y(), epsilon = 1.0e-4);
    assert_relative_eq!(
        pos_cube * contact.point1,
        pos_ball * contact.point2 - Vector::y() * contact.dist,
        epsilon = 1.0e-4
    );
}

#[test]
fn prediction_extends_the_contact_margin() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let i = batch.push(
        PairKey::new(0, 1),
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(1.8, 0.0, 0.0),
    );

    let default = SphereConvexPolyhedronAlgorithm::default();
    test_all(&default, &mut batch, &mut TemporalHintCache::new());
    assert!(!batch.is_colliding(i));

    let predictive = SphereConvexPolyhedronAlgorithm::new(
        GjkProximity::new(GjkConfig {
            prediction: 0.5,
            ..Default::default()
        }),
        SatPenetration::default(),
    );
    batch.reset_results();
    test_all(&predictive, &mut batch, &mut TemporalHintCache::new());
    assert!(batch.is_colliding(i));
    assert_relative_eq!(batch.contact(i).unwrap().dist, 0.3, epsilon = 1.0e-4);
}

#[test]
fn exhausted_iteration_budget_reports_separation() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();
    let key = PairKey::new(0, 1);
    let i = batch.push(
        key,
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(1.2, 0.0, 0.0),
    );

    let no_budget = SphereConvexPolyhedronAlgorithm::new(
        GjkProximity::new(GjkConfig {
            max_iterations: 0,
            ..Default::default()
        }),
        SatPenetration::default(),
    );
    test_all(&no_budget, &mut batch, &mut hints);

    assert!(!batch.is_colliding(i));
    assert!(!batch.item(i).is_escalated());
    assert!(batch.contact(i).is_none());
    assert!(hints.hint(key).unwrap().was_using_gjk);
}

#[test]
fn contacts_are_only_reported_on_request() {
    let ball = Ball::new(0.5);
    let cube = unit_cube();
    let mut batch = NarrowPhaseBatch::new();
    let shallow = batch.push(
        PairKey::new(0, 1),
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(0.0, 1.3, 0.0),
    );
    let deep = batch.push(
        PairKey::new(0, 2),
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(0.0, 0.1, 0.0),
    );

    SphereConvexPolyhedronAlgorithm::<GjkProximity, SatPenetration>::default().test_collision(
        &mut batch,
        0,
        2,
        false,
        &mut NarrowPhaseWorkspace::new(),
        &mut TemporalHintCache::new(),
    );

    assert!(batch.is_colliding(shallow) && batch.is_colliding(deep));
    assert!(batch.contact(shallow).is_none() && batch.contact(deep).is_none());
}

/// Random poses of a ball around the unit cube, away from any classification boundary.
fn random_scene(seed: u64, ball: &Ball) -> Vec<Isometry<Real>> {
    let mut rng = oorandom::Rand32::new(seed);
    let mut poses = vec![];

    while poses.len() < 200 {
        let center = Vector::from_fn(|_, _| (rng.rand_float() as Real - 0.5) * 6.0);
        let dist_to_box = center.map(|x| (x.abs() - 1.0).max(0.0)).norm();
        let depth = 1.0 - center.amax();

        // Skip configurations too close to a classification boundary.
        if (dist_to_box - ball.radius).abs() < 1.0e-2 || depth.abs() < 1.0e-2 {
            continue;
        }

        poses.push(Isometry::new(center, Vector::zeros()));
    }

    poses
}

#[test]
fn random_balls_match_the_analytic_solution() {
    let ball = Ball::new(0.4);
    let cube = unit_cube();
    let poses = random_scene(42, &ball);
    let mut batch = NarrowPhaseBatch::new();

    for (i, pos) in poses.iter().enumerate() {
        let _ = batch.push(
            PairKey::new(0, i as u32 + 1),
            &cube,
            Isometry::identity(),
            &ball,
            *pos,
        );
    }

    test_all(&Default::default(), &mut batch, &mut TemporalHintCache::new());

    for (i, pos) in poses.iter().enumerate() {
        let center = pos.translation.vector;
        let dist_to_box = center.map(|x| (x.abs() - 1.0).max(0.0)).norm();
        let inside = center.amax() < 1.0;
        let item = batch.item(i);

        assert_eq!(item.is_escalated(), inside, "center: {:?}", center);

        if inside {
            let expected = -(1.0 - center.amax()) - ball.radius;
            assert!(item.is_colliding());
            assert_relative_eq!(item.contact.unwrap().dist, expected, epsilon = 1.0e-3);
        } else if dist_to_box < ball.radius {
            assert!(item.is_colliding(), "center: {:?}", center);
            let expected = dist_to_box - ball.radius;
            assert_relative_eq!(item.contact.unwrap().dist, expected, epsilon = 1.0e-2);
        } else {
            assert!(!item.is_colliding(), "center: {:?}", center);
            assert!(item.contact.is_none());
        }
    }
}

#[test]
fn static_scene_gives_identical_results() {
    let ball = Ball::new(0.4);
    let cube = unit_cube();
    let poses = random_scene(7, &ball);
    let mut batch = NarrowPhaseBatch::new();
    let mut hints = TemporalHintCache::new();

    for (i, pos) in poses.iter().enumerate() {
        let _ = batch.push(PairKey::new(0, i as u32 + 1), &ball, *pos, &cube, Isometry::identity());
    }

    test_all(&Default::default(), &mut batch, &mut hints);
    let first: Vec<_> = batch.items().iter().map(|item| (item.flags, item.contact)).collect();

    batch.reset_results();
    test_all(&Default::default(), &mut batch, &mut hints);

    for (item, (flags, contact)) in batch.items().iter().zip(first.iter()) {
        assert_eq!(item.flags, *flags);
        assert_eq!(item.contact.is_some(), contact.is_some());

        if let (Some(c1), Some(c2)) = (item.contact, contact) {
            assert_relative_eq!(c1.dist, c2.dist, epsilon = 1.0e-2);
        }
    }
}

#[test]
fn batching_does_not_change_the_results() {
    let ball = Ball::new(0.4);
    let cube = unit_cube();
    let poses = random_scene(1234, &ball);
    let narrow_phase: SphereConvexPolyhedronAlgorithm = Default::default();
    let mut batch = NarrowPhaseBatch::new();

    for (i, pos) in poses.iter().enumerate() {
        let _ = batch.push(PairKey::new(0, i as u32 + 1), &cube, Isometry::identity(), &ball, *pos);
    }

    let mut batched = batch.clone();
    test_all(&narrow_phase, &mut batched, &mut TemporalHintCache::new());

    let mut workspace = NarrowPhaseWorkspace::new();
    let mut hints = TemporalHintCache::new();
    for i in 0..batch.len() {
        narrow_phase.test_collision(&mut batch, i, 1, true, &mut workspace, &mut hints);
    }

    for (single, batched) in batch.items().iter().zip(batched.items().iter()) {
        assert_eq!(single.flags, batched.flags);
        assert_eq!(single.contact, batched.contact);
    }
}
