use graze3d::math::{Isometry, Vector};
use graze3d::narrow_phase::{
    NarrowPhaseBatch, NarrowPhaseWorkspace, PairKey, SphereConvexPolyhedronAlgorithm,
    TemporalHintCache,
};
use graze3d::shape::{Ball, ConvexPolyhedron};

fn run(batch: &mut NarrowPhaseBatch, start: usize, count: usize) {
    let narrow_phase: SphereConvexPolyhedronAlgorithm = Default::default();
    narrow_phase.test_collision(
        batch,
        start,
        count,
        true,
        &mut NarrowPhaseWorkspace::new(),
        &mut TemporalHintCache::new(),
    );
}

#[test]
#[should_panic(expected = "Expected a ball and a convex polyhedron")]
fn ball_ball_pairs_are_rejected() {
    let ball = Ball::new(0.5);
    let mut batch = NarrowPhaseBatch::new();
    let _ = batch.push(
        PairKey::new(0, 1),
        &ball,
        Isometry::identity(),
        &ball,
        Isometry::identity(),
    );
    run(&mut batch, 0, 1);
}

#[test]
#[should_panic(expected = "Expected a ball and a convex polyhedron")]
fn polyhedron_polyhedron_pairs_are_rejected() {
    let cube = ConvexPolyhedron::cuboid(Vector::repeat(1.0));
    let mut batch = NarrowPhaseBatch::new();
    let _ = batch.push(
        PairKey::new(0, 1),
        &cube,
        Isometry::identity(),
        &cube,
        Isometry::translation(3.0, 0.0, 0.0),
    );
    run(&mut batch, 0, 1);
}

#[test]
#[should_panic(expected = "already marked as colliding")]
fn colliding_pairs_are_rejected() {
    let ball = Ball::new(0.5);
    let cube = ConvexPolyhedron::cuboid(Vector::repeat(1.0));
    let mut batch = NarrowPhaseBatch::new();
    let i = batch.push(
        PairKey::new(0, 1),
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(3.0, 0.0, 0.0),
    );
    batch.item_mut(i).set_colliding(true);
    run(&mut batch, 0, 1);
}

#[test]
#[should_panic(expected = "exceed the batch length")]
fn out_of_bounds_ranges_are_rejected() {
    let ball = Ball::new(0.5);
    let cube = ConvexPolyhedron::cuboid(Vector::repeat(1.0));
    let mut batch = NarrowPhaseBatch::new();
    let _ = batch.push(
        PairKey::new(0, 1),
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(3.0, 0.0, 0.0),
    );
    run(&mut batch, 1, 1);
}

#[test]
fn invalid_pairs_outside_of_the_range_are_ignored() {
    let ball = Ball::new(0.5);
    let cube = ConvexPolyhedron::cuboid(Vector::repeat(1.0));
    let mut batch = NarrowPhaseBatch::new();
    let _ = batch.push(
        PairKey::new(0, 1),
        &ball,
        Isometry::identity(),
        &ball,
        Isometry::identity(),
    );
    let i = batch.push(
        PairKey::new(2, 3),
        &cube,
        Isometry::identity(),
        &ball,
        Isometry::translation(1.3, 0.0, 0.0),
    );
    run(&mut batch, i, 1);
    assert!(batch.is_colliding(i));
    assert!(!batch.is_colliding(0));
}
