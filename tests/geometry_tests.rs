//! Collision geometry through the facade, plus seeded property sweeps.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use table_game::core::geometry::{
    approaching_from, cells_intersect, colliding, colliding_polygons, overlaps, touching, Direction,
};
use table_game::types::{Color, PolygonCell, Rect, Sprite, SpriteOptions};

fn sprite(x: i32, y: i32, w: i32, h: i32) -> Sprite {
    Sprite::from_options("s", SpriteOptions::new().at(x, y).size(w, h), Color::default())
}

fn moving(x: i32, y: i32, vx: i32, vy: i32) -> Sprite {
    Sprite::from_options("m", SpriteOptions::new().at(x, y).velocity(vx, vy), Color::default())
}

fn poly(cells: &[(i32, i32)]) -> Sprite {
    let polygon = cells.iter().map(|&(x, y)| PolygonCell::unit(x, y)).collect();
    Sprite::from_options("p", SpriteOptions::new().polygon(polygon), Color::default())
}

fn random_rect(rng: &mut StdRng) -> Rect {
    Rect::new(
        rng.gen_range(-4..8),
        rng.gen_range(-4..8),
        rng.gen_range(0..5),
        rng.gen_range(0..5),
    )
}

#[test]
fn edge_sharing_rectangles_do_not_overlap() {
    assert!(!overlaps(Rect::new(0, 0, 2, 2), Rect::new(2, 0, 2, 2)));
    assert!(!overlaps(Rect::new(0, 0, 2, 2), Rect::new(0, 2, 2, 2)));
    assert!(overlaps(Rect::new(0, 0, 3, 3), Rect::new(2, 2, 1, 1)));
}

#[test]
fn polygon_collision_ignores_bounding_rect() {
    // Rects overlap, polygon cells do not.
    let mut a = poly(&[(0, 0)]);
    a.width = 5;
    a.height = 5;
    let b = poly(&[(3, 3)]);
    assert!(!colliding(&a, &b));

    // A plain sprite counts as the cell at its own x/y.
    let block = sprite(3, 3, 1, 1);
    assert!(colliding(&b, &block));
    assert!(colliding_polygons(&block, &b));
}

#[test]
fn polygon_cells_count_as_unit_cells() {
    let wide = [PolygonCell {
        x: 0,
        y: 0,
        width: 4,
        height: 1,
        color: None,
    }];
    assert!(!cells_intersect(&wide, &[PolygonCell::unit(1, 0)]));
    assert!(cells_intersect(&wide, &[PolygonCell::unit(0, 0)]));
}

#[test]
fn approach_uses_velocity_magnitude() {
    let target = sprite(5, 0, 1, 1);
    assert!(approaching_from(Direction::Left, &moving(3, 0, 2, 0), &target));
    assert!(!approaching_from(Direction::Left, &moving(3, 0, 0, 0), &target));
    assert!(approaching_from(Direction::Left, &moving(4, 0, 0, 0), &target));
    // Sign of the velocity does not matter, only the direction argument.
    assert!(approaching_from(Direction::Left, &moving(3, 0, -2, 0), &target));

    let target = sprite(0, 0, 1, 1);
    assert!(approaching_from(Direction::Below, &moving(0, 1, 0, 0), &target));
    assert!(approaching_from(Direction::Right, &moving(1, 0, 0, 0), &target));
    assert!(approaching_from(Direction::Above, &moving(0, -1, 0, 0), &target));
}

#[test]
fn touching_corners_only_with_flag() {
    let a = sprite(0, 1, 1, 1);
    let b = sprite(1, 0, 1, 1);
    assert!(!touching(&a, &b, false));
    assert!(touching(&a, &b, true));
}

#[test]
fn touching_far_apart_is_false_even_if_fast() {
    let a = moving(0, 0, 4, 0);
    let b = sprite(4, 0, 1, 1);
    assert!(approaching_from(Direction::Left, &a, &b));
    assert!(!touching(&a, &b, true));
}

#[test]
fn prop_overlap_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(0x7ab1e);
    for _ in 0..2000 {
        let a = random_rect(&mut rng);
        let b = random_rect(&mut rng);
        assert_eq!(overlaps(a, b), overlaps(b, a), "{a:?} {b:?}");
        if a.width == 0 || a.height == 0 {
            assert!(!overlaps(a, b));
        }
    }
}

#[test]
fn prop_touching_matches_directional_checks_within_one_cell() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2000 {
        let a = Sprite::from_options(
            "a",
            SpriteOptions::new()
                .at(rng.gen_range(0..6), rng.gen_range(0..6))
                .size(rng.gen_range(1..3), rng.gen_range(1..3))
                .velocity(rng.gen_range(-2..3), rng.gen_range(-2..3)),
            Color::default(),
        );
        let b = sprite(rng.gen_range(0..6), rng.gen_range(0..6), rng.gen_range(1..3), rng.gen_range(1..3));

        let near = (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1;
        let directional = Direction::ALL.iter().any(|&d| approaching_from(d, &a, &b));
        if near {
            assert_eq!(touching(&a, &b, false), directional, "{a:?} {b:?}");
        } else {
            assert!(!touching(&a, &b, false));
            assert!(!touching(&a, &b, true));
        }
        // Corners only ever add hits.
        if touching(&a, &b, false) {
            assert!(touching(&a, &b, true));
        }
    }
}

#[test]
fn prop_polygon_collision_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..500 {
        let mut cells = |n: usize| -> Vec<(i32, i32)> {
            (0..n).map(|_| (rng.gen_range(0..5), rng.gen_range(0..5))).collect()
        };
        let a = poly(&cells(3));
        let b = poly(&cells(3));
        assert_eq!(colliding(&a, &b), colliding(&b, &a));
    }
}
