//! Sprite registry, globals and details through the engine API.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use table_game::core::{DetailsSink, Engine, EngineConfig, Screen};
use table_game::types::{Color, DetailValue, PolygonCell, PolygonField, SpriteOptions};

fn engine() -> Engine {
    Engine::new(EngineConfig::new(), Screen::new(10, 10))
}

#[test]
fn double_register_overwrites_in_place() {
    let mut e = engine();
    e.register_sprite("a", SpriteOptions::new().at(1, 1));
    e.register_sprite("b", SpriteOptions::new());
    e.register_sprite("a", SpriteOptions::new().at(5, 6).size(2, 2));

    assert_eq!(e.sprite_count(), 2);
    assert_eq!(e.sprite_names(), vec!["a", "b"]);
    let a = e.sprite("a").unwrap();
    assert_eq!((a.x, a.y, a.width, a.height), (5, 6, 2, 2));
}

#[test]
fn unregister_missing_is_a_no_op() {
    let mut e = engine();
    e.register_sprite("a", SpriteOptions::new());
    assert!(e.unregister_sprite("nope").is_none());
    assert_eq!(e.sprite_count(), 1);
    assert!(e.unregister_sprite("a").is_some());
    assert!(e.sprite("a").is_none());
}

#[test]
fn move_to_top_changes_draw_order_only() {
    let mut e = engine();
    for name in ["x", "y", "z"] {
        e.register_sprite(name, SpriteOptions::new().velocity(1, -1));
    }
    let before = e.sprite("x").cloned();
    assert!(e.move_to_top("x"));
    assert_eq!(e.sprite_names(), vec!["y", "z", "x"]);
    assert_eq!(e.sprite("x").cloned(), before);
    assert!(!e.move_to_top("missing"));
}

#[test]
fn sprites_matching_by_prefix() {
    let mut e = engine();
    e.register_sprite("mole_1_1", SpriteOptions::new());
    e.register_sprite("paddle", SpriteOptions::new());
    e.register_sprite("mole_2_3", SpriteOptions::new());

    let moles: Vec<_> = e
        .sprites_matching(|n| n.starts_with("mole_"))
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(moles, vec!["mole_1_1", "mole_2_3"]);
}

#[test]
fn sprite_from_json_uses_defaults() {
    let mut e = engine();
    let s = e
        .register_sprite_json("ball", r##"{"x": 3, "velocityY": 2, "color": "#fdd"}"##)
        .unwrap();
    assert_eq!((s.x, s.y, s.width, s.height), (3, 0, 1, 1));
    assert_eq!(s.velocity_y, 2);
    assert_eq!(s.color, Color::new(0xff, 0xdd, 0xdd));

    let s = e.register_sprite_json("plain", "{}").unwrap();
    assert_eq!(s.color, Color::from_hex("#eee").unwrap());
}

#[test]
fn shift_polygon_offsets_every_cell() {
    let mut e = engine();
    e.register_sprite(
        "snake",
        SpriteOptions::new().polygon(vec![PolygonCell::unit(1, 1), PolygonCell::unit(2, 1)]),
    );
    let snake = e.sprite_mut("snake").unwrap();
    snake.shift_polygon(PolygonField::X, 3);
    snake.set_polygon_field(PolygonField::Y, 0);
    let cells: Vec<_> = snake.polygon.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(cells, vec![(4, 0), (5, 0)]);
}

#[test]
fn globals_round_trip() {
    let mut e = Engine::new(
        EngineConfig::new()
            .with_global("timeCount", 0)
            .with_globals_json(r#"{"gameOver": false, "level": {"n": 2}}"#)
            .unwrap(),
        Screen::new(1, 1),
    );
    assert_eq!(e.global_i64("timeCount"), Some(0));
    assert_eq!(e.global("gameOver"), Some(&json!(false)));

    e.set_global("timeCount", 5);
    assert_eq!(e.global_i64("timeCount"), Some(5));
    if let Some(level) = e.global_mut("level") {
        level["n"] = json!(3);
    }
    assert_eq!(e.global("level"), Some(&json!({"n": 3})));

    assert_eq!(e.globals_matching(|n| n.starts_with("time")).len(), 1);
    assert!(e.unregister_global("timeCount").is_some());
    assert!(e.global("timeCount").is_none());
}

#[test]
fn malformed_globals_json_is_an_error() {
    assert!(EngineConfig::new().with_globals_json("[1, 2]").is_err());
}

#[derive(Default)]
struct RecordingSink {
    shown: Vec<(String, DetailValue)>,
    visible: Vec<bool>,
    clears: u32,
}

struct SinkHandle(Rc<RefCell<RecordingSink>>);

impl DetailsSink for SinkHandle {
    fn show(&mut self, name: &str, value: &DetailValue) {
        self.0.borrow_mut().shown.push((name.to_string(), value.clone()));
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().visible.push(visible);
    }

    fn clear(&mut self) {
        let mut sink = self.0.borrow_mut();
        sink.shown.clear();
        sink.clears += 1;
    }
}

#[test]
fn details_are_pushed_to_the_sink() {
    let sink = Rc::new(RefCell::new(RecordingSink::default()));
    let mut e = Engine::new(
        EngineConfig::new().with_detail("Score", 0).with_detail("Lives", 3),
        Screen::new(3, 3),
    )
    .with_details_sink(Box::new(SinkHandle(sink.clone())));

    e.set_detail("Score", 100);
    e.set_details([("Lives", 2), ("Level", 1)]);

    assert_eq!(e.details().line(), "Score: 100  Lives: 2  Level: 1");
    assert_eq!(e.detail_i64("Lives"), Some(2));

    e.start();
    e.pause();
    e.resume();

    let sink = sink.borrow();
    assert_eq!(sink.shown.len(), 2 + 3);
    assert_eq!(sink.shown[2], ("Score".to_string(), DetailValue::Number(100)));
    assert_eq!(sink.visible, vec![true, false, true]);
}

#[test]
fn restart_clears_the_sink_before_new_details() {
    let sink = Rc::new(RefCell::new(RecordingSink::default()));
    let mut e = Engine::new(EngineConfig::new().with_detail("Lives", 3), Screen::new(3, 3))
        .with_details_sink(Box::new(SinkHandle(sink.clone())));
    e.start();

    e.restart(EngineConfig::new().with_detail("Score", 0));

    assert_eq!(e.details().line(), "Score: 0");
    let sink = sink.borrow();
    assert_eq!(sink.clears, 1);
    assert_eq!(sink.shown, vec![("Score".to_string(), DetailValue::Number(0))]);
}
