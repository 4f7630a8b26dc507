//! Paint pass: what ends up on the screen after `paint()`.

use table_game::core::{Engine, EngineConfig, Screen};
use table_game::types::{Color, PolygonCell, Rect, SpriteOptions};

const RED: Color = Color::new(0xff, 0, 0);
const BLUE: Color = Color::new(0, 0, 0xff);

fn engine(config: EngineConfig) -> Engine {
    Engine::new(config, Screen::new(6, 4))
}

#[test]
fn sprites_are_clipped_to_the_grid() {
    let mut e = engine(EngineConfig::new().with_sprite(
        "big",
        SpriteOptions::new().at(-2, 2).size(4, 5).color(RED),
    ));
    e.paint();
    // Columns 0..2, rows 2..4.
    assert_eq!(e.screen().filled_count(), 4);
    assert_eq!(e.screen().fill_at(0, 2), Some(RED));
    assert_eq!(e.screen().fill_at(2, 2), None);
}

#[test]
fn later_sprites_paint_over_earlier_ones() {
    let mut e = engine(
        EngineConfig::new()
            .with_sprite("under", SpriteOptions::new().color(RED))
            .with_sprite("over", SpriteOptions::new().color(BLUE)),
    );
    e.paint();
    assert_eq!(e.screen().fill_at(0, 0), Some(BLUE));

    e.move_to_top("under");
    e.paint();
    assert_eq!(e.screen().fill_at(0, 0), Some(RED));
}

#[test]
fn zero_sized_sprites_draw_border_lines() {
    let mut e = engine(
        EngineConfig::new()
            .with_sprite("wall", SpriteOptions::new().at(2, 0).size(0, 3).color(RED))
            .with_sprite("floor", SpriteOptions::new().at(0, 3).size(4, 0).color(BLUE)),
    );
    e.paint();
    let screen = e.screen();
    assert_eq!(screen.filled_count(), 0);
    for y in 0..3 {
        assert_eq!(screen.get(2, y).unwrap().left, Some(RED));
    }
    assert_eq!(screen.get(2, 3).unwrap().left, None);
    for x in 0..4 {
        assert_eq!(screen.get(x, 3).unwrap().top, Some(BLUE));
    }
}

#[test]
fn polygon_cells_use_their_own_colour() {
    let mut tinted = PolygonCell::unit(1, 1);
    tinted.color = Some(BLUE);
    let mut e = engine(EngineConfig::new().with_sprite(
        "snake",
        SpriteOptions::new()
            .size(6, 4)
            .color(RED)
            .polygon(vec![PolygonCell::unit(0, 0), tinted]),
    ));
    e.paint();
    assert_eq!(e.screen().filled_count(), 2);
    assert_eq!(e.screen().fill_at(0, 0), Some(RED));
    assert_eq!(e.screen().fill_at(1, 1), Some(BLUE));
}

#[test]
fn on_paint_draws_after_sprites() {
    let mut e = engine(
        EngineConfig::new()
            .with_sprite("s", SpriteOptions::new().color(RED))
            .with_on_paint(|e| e.fill_rect(Rect::new(0, 0, 2, 1), BLUE)),
    );
    e.paint();
    assert_eq!(e.screen().fill_at(0, 0), Some(BLUE));
    assert_eq!(e.screen().fill_at(1, 0), Some(BLUE));
}

#[test]
fn clear_blanks_without_touching_sprites() {
    let mut e = engine(EngineConfig::new().with_sprite("s", SpriteOptions::new()));
    e.paint();
    e.clear();
    assert!(e.screen().is_blank());
    assert_eq!(e.sprite_count(), 1);

    e.fill_polygon(&[PolygonCell::unit(3, 3)], RED);
    assert_eq!(e.screen().fill_at(3, 3), Some(RED));
}
