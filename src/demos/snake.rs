//! Snake: the body is a polygon sprite; blocks appear every 15 ticks.

use rand::Rng;
use serde_json::Value;
use table_game_core::geometry::cells_intersect;
use table_game_core::{Engine, EngineConfig};
use table_game_types::{Color, InputEvent, InputKind, Key, PolygonCell, SpriteOptions};

use super::SharedRng;

pub const SNAKE: &str = "snake";

const CRASHED: Color = Color::new(0xff, 0xdd, 0xdd);
const BLOCK: Color = Color::new(0xdd, 0xdd, 0xdd);
const BLOCK_EVERY: i64 = 15;
const RESPAWN_WAIT_MS: u64 = 500;
const PLACEMENT_TRIES: usize = 100;

pub fn config(rng: SharedRng) -> EngineConfig {
    EngineConfig::new()
        .with_detail("Score", 0)
        .with_detail("Lives", 3)
        .with_delay_ms(180)
        .with_init(init)
        .with_update(move |e| update(e, &rng))
        .with_input(InputKind::KeyDown, on_key_down)
}

fn center(e: &Engine) -> (i32, i32) {
    (e.width() / 2, e.height() / 2)
}

fn init(e: &mut Engine) {
    spawn_snake(e);
    e.register_global("timeCount", 0);
    e.register_global("gameOver", false);
}

fn spawn_snake(e: &mut Engine) {
    let (cx, cy) = center(e);
    e.register_sprite(
        SNAKE,
        SpriteOptions::new()
            .at(cx, cy)
            .velocity(1, 0)
            .polygon(vec![PolygonCell::unit(cx, cy)]),
    );
}

fn update(e: &mut Engine, rng: &SharedRng) {
    if e.global("gameOver") == Some(&Value::Bool(true)) {
        return;
    }
    let Some(mut snake) = e.sprite(SNAKE).cloned() else {
        return;
    };
    let Some(&tail) = snake.polygon.last() else {
        return;
    };

    let time = e.global_i64("timeCount").unwrap_or(0) + 1;
    e.set_global("timeCount", time);
    if time % BLOCK_EVERY == BLOCK_EVERY - 1 && e.sprite_count() < 2 {
        add_block(e, &snake.polygon, rng);
    }

    for i in (1..snake.polygon.len()).rev() {
        let (x, y) = (snake.polygon[i - 1].x, snake.polygon[i - 1].y);
        snake.polygon[i].x = x;
        snake.polygon[i].y = y;
    }
    snake.polygon[0].x += snake.velocity_x;
    snake.polygon[0].y += snake.velocity_y;

    let head = snake.polygon[0];
    let out_of_bounds = head.x < 0 || head.y < 0 || head.x >= e.width() || head.y >= e.height();
    let bit_itself = snake.polygon.len() > 3 && cells_intersect(&[head], &snake.polygon[3..]);

    if out_of_bounds || bit_itself {
        snake.set_polygon_color(CRASHED);
        store(e, snake);
        crash(e);
        return;
    }
    store(e, snake);

    for name in e.sprite_names() {
        if name != SNAKE && e.sprites_colliding(SNAKE, &name) {
            if let Some(snake) = e.sprite_mut(SNAKE) {
                snake.polygon.push(PolygonCell::unit(tail.x, tail.y));
            }
            e.unregister_sprite(&name);
            let score = e.detail_i64("Score").unwrap_or(0) + 100;
            e.set_detail("Score", score);
        }
    }
}

fn store(e: &mut Engine, snake: table_game_types::Sprite) {
    if let Some(slot) = e.sprite_mut(SNAKE) {
        *slot = snake;
    }
}

fn crash(e: &mut Engine) {
    let lives = e.detail_i64("Lives").unwrap_or(0) - 1;
    e.set_detail("Lives", lives);

    if lives > 0 {
        e.delay_for(RESPAWN_WAIT_MS, |e| {
            spawn_snake(e);
            if let Some(snake) = e.sprite_mut(SNAKE) {
                snake.set_polygon_color(CRASHED);
            }
            e.set_timeout(RESPAWN_WAIT_MS, |e| {
                let color = e.palette().default_color;
                if let Some(snake) = e.sprite_mut(SNAKE) {
                    snake.set_polygon_color(color);
                }
            });
        });
    } else {
        tracing::info!(score = e.detail_i64("Score"), "snake over");
        e.set_global("gameOver", true);
        e.flash_ending(
            0,
            0,
            Some(Box::new(|e: &mut Engine| {
                e.unregister_sprite(SNAKE);
            })),
        );
    }
}

/// Drop a block on a free cell away from the spawn point.
fn add_block(e: &mut Engine, body: &[PolygonCell], rng: &SharedRng) {
    let (width, height) = (e.width(), e.height());
    if width <= 0 || height <= 0 {
        return;
    }
    let spawn = center(e);
    let mut rng = rng.borrow_mut();
    let mut spot = (0, 0);
    for _ in 0..PLACEMENT_TRIES {
        spot = (rng.gen_range(0..width), rng.gen_range(0..height));
        let free = !cells_intersect(body, &[PolygonCell::unit(spot.0, spot.1)]);
        if free && spot != spawn {
            break;
        }
    }
    drop(rng);

    let name = format!("block{}", e.sprite_count());
    e.register_sprite(&name, SpriteOptions::new().at(spot.0, spot.1).color(BLOCK));
}

fn on_key_down(e: &mut Engine, event: &InputEvent) {
    let Some(key) = event.key() else {
        return;
    };
    let heading = match key {
        Key::Up | Key::Char('w') | Key::Char('W') => Some((0, -1)),
        Key::Down | Key::Char('s') | Key::Char('S') => Some((0, 1)),
        Key::Left | Key::Char('a') | Key::Char('A') => Some((-1, 0)),
        Key::Right | Key::Char('d') | Key::Char('D') => Some((1, 0)),
        Key::SPACE => {
            e.toggle_pause();
            None
        }
        _ => None,
    };
    if let (Some((vx, vy)), Some(snake)) = (heading, e.sprite_mut(SNAKE)) {
        snake.velocity_x = vx;
        snake.velocity_y = vy;
    }
}
