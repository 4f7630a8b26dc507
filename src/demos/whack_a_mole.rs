//! Whack-a-mole: click moles before more than ten are on the table.
//!
//! Moles appear every `currentWait` ticks; the wait shrinks by one every 100
//! ticks. Surviving 1000 ticks wins.

use rand::Rng;
use serde_json::Value;
use table_game_core::{Engine, EngineConfig};
use table_game_types::{Color, InputEvent, InputKind, Key, SpriteOptions};

use super::SharedRng;

pub const INDICATOR: &str = "gameOverIndicator";

const WON: Color = Color::new(0xdd, 0xff, 0xdd);
const LOST: Color = Color::new(0xff, 0xdd, 0xdd);
const START_WAIT: i64 = 20;
const WIN_TICK: i64 = 1000;
const MAX_MOLES: usize = 10;
const PLACEMENT_TRIES: usize = 100;

pub fn config(rng: SharedRng) -> EngineConfig {
    EngineConfig::new()
        .with_detail("Score", 0)
        .with_init(|e| {
            e.register_global("timeCount", 0);
            e.register_global("currentWait", START_WAIT);
            e.register_global("gameOver", false);
        })
        .with_update(move |e| update(e, &rng))
        .with_input(InputKind::Click, on_click)
        .with_input(InputKind::KeyDown, |e, event| {
            if event.key() == Some(Key::SPACE) {
                e.toggle_pause();
            }
        })
}

pub fn mole_name(x: i32, y: i32) -> String {
    format!("mole_{x}_{y}")
}

fn update(e: &mut Engine, rng: &SharedRng) {
    if e.global("gameOver") == Some(&Value::Bool(true)) {
        return;
    }
    let time = e.global_i64("timeCount").unwrap_or(0) + 1;
    let wait = e.global_i64("currentWait").unwrap_or(START_WAIT).max(1);
    e.set_global("timeCount", time);

    if time % wait == 0 {
        add_mole(e, rng);
    }

    if time == WIN_TICK {
        finish(e, WON);
        return;
    }
    if time % 100 == 0 {
        e.set_global("currentWait", wait - 1);
    }

    if e.sprite_count() > MAX_MOLES {
        finish(e, LOST);
    }
}

fn add_mole(e: &mut Engine, rng: &SharedRng) {
    let (width, height) = (e.width(), e.height());
    if width <= 0 || height <= 0 {
        return;
    }
    let mut rng = rng.borrow_mut();
    for _ in 0..PLACEMENT_TRIES {
        let (x, y) = (rng.gen_range(0..width), rng.gen_range(0..height));
        let name = mole_name(x, y);
        if e.sprite(&name).is_none() {
            e.register_sprite(&name, SpriteOptions::new().at(x, y));
            return;
        }
    }
}

fn finish(e: &mut Engine, color: Color) {
    tracing::info!(score = e.detail_i64("Score"), won = color == WON, "whack-a-mole over");
    e.set_global("gameOver", true);
    e.register_sprite(INDICATOR, SpriteOptions::new().color(color));
}

fn on_click(e: &mut Engine, event: &InputEvent) {
    let Some((x, y)) = event.cell() else {
        return;
    };
    if e.unregister_sprite(&mole_name(x, y)).is_some() {
        let score = e.detail_i64("Score").unwrap_or(0) + 100;
        e.set_detail("Score", score);
        e.paint();
    }
}
