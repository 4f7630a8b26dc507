//! Ping Pong: the player holds the right paddle, a lazy AI the left one.

use table_game_core::geometry::{approaching_from, Direction};
use table_game_core::{Engine, EngineConfig};
use table_game_types::{Color, InputEvent, InputKind, Key, SpriteOptions};

use super::SharedRng;
use rand::Rng;

pub const LEFT_PADDLE: &str = "leftPaddle";
pub const RIGHT_PADDLE: &str = "rightPaddle";
pub const BALL: &str = "ball";

/// Points needed to win.
pub const WINNING_SCORE: i64 = 1000;

const MISSED: Color = Color::new(0xff, 0xdd, 0xdd);
const SCORED: Color = Color::new(0xdd, 0xff, 0xdd);
const SERVE_WAIT_MS: u64 = 500;

pub fn config(rng: SharedRng) -> EngineConfig {
    EngineConfig::new()
        .with_detail("Score", 0)
        .with_detail("Lives", 3)
        .with_delay_ms(100)
        .with_init(init)
        .with_update(move |e| update(e, &rng))
        .with_input(InputKind::KeyDown, on_key_down)
}

fn init(e: &mut Engine) {
    let paddle_color = e.palette().default_color;
    let right_x = e.width() - 1;
    e.register_sprite(
        LEFT_PADDLE,
        SpriteOptions::new().at(0, 2).size(1, 3).color(paddle_color),
    );
    e.register_sprite(
        RIGHT_PADDLE,
        SpriteOptions::new().at(right_x, 2).size(1, 3).color(paddle_color),
    );
    e.register_sprite(BALL, SpriteOptions::new().at(3, 2).velocity(1, 1));
}

fn update(e: &mut Engine, rng: &SharedRng) {
    let (Some(mut ball), Some(mut left), Some(right)) = (
        e.sprite(BALL).cloned(),
        e.sprite(LEFT_PADDLE).cloned(),
        e.sprite(RIGHT_PADDLE).cloned(),
    ) else {
        // Ball is gone once the round is over.
        return;
    };
    let (width, height) = (e.width(), e.height());

    if ball.velocity_x > 0 {
        if approaching_from(Direction::Left, &ball, &right) {
            ball.velocity_x = -ball.velocity_x;
            ball.x += ball.velocity_x;
        } else if ball.x + ball.velocity_x <= width {
            ball.x += ball.velocity_x;
        } else {
            ball.color = MISSED;
            ball.velocity_x = -ball.velocity_x;
            let lives = e.detail_i64("Lives").unwrap_or(0) - 1;
            e.set_detail("Lives", lives);
            if lives <= 0 {
                tracing::info!("ping pong lost");
                e.unregister_sprite(BALL);
                e.flash_ending(0, 0, None);
                return;
            }
            serve(e, (width + 1) / 2);
        }
    } else if ball.velocity_x < 0 {
        if approaching_from(Direction::Right, &ball, &left) {
            ball.velocity_x = -ball.velocity_x;
            ball.x += ball.velocity_x;
        } else if ball.x >= 0 {
            ball.x += ball.velocity_x;
        } else {
            ball.color = SCORED;
            ball.velocity_x = -ball.velocity_x;
            let score = e.detail_i64("Score").unwrap_or(0) + 100;
            e.set_detail("Score", score);
            if score >= WINNING_SCORE {
                tracing::info!("ping pong won");
                e.unregister_sprite(BALL);
                e.flash_ending(3, 300, None);
                return;
            }
            serve(e, width / 2);
        }
    }

    if ball.velocity_y > 0 {
        if ball.y + ball.velocity_y >= height {
            ball.velocity_y = -ball.velocity_y;
        }
        ball.y += ball.velocity_y;
    } else if ball.velocity_y < 0 {
        if ball.y <= 0 {
            ball.velocity_y = -ball.velocity_y;
        }
        ball.y += ball.velocity_y;
    }

    // Half the time the AI does nothing.
    if rng.borrow_mut().gen_bool(0.5) {
        if left.y + 1 < ball.y {
            if left.y + left.height < height {
                left.y += 1;
            }
        } else if left.y > 0 {
            left.y -= 1;
        }
    }

    if let Some(slot) = e.sprite_mut(BALL) {
        *slot = ball;
    }
    if let Some(slot) = e.sprite_mut(LEFT_PADDLE) {
        *slot = left;
    }
}

/// Freeze play, recentre the ball, then restore its colour.
fn serve(e: &mut Engine, x: i32) {
    e.delay_for(SERVE_WAIT_MS, move |e| {
        if let Some(ball) = e.sprite_mut(BALL) {
            ball.x = x;
        }
        e.paint();
        e.delay_for(SERVE_WAIT_MS, |e| {
            let color = e.palette().default_color;
            if let Some(ball) = e.sprite_mut(BALL) {
                ball.color = color;
            }
        });
    });
}

fn on_key_down(e: &mut Engine, event: &InputEvent) {
    let Some(key) = event.key() else {
        return;
    };
    let height = e.height();
    match key {
        Key::Up | Key::Char('w') | Key::Char('W') => {
            if let Some(paddle) = e.sprite_mut(RIGHT_PADDLE) {
                if paddle.y > 0 {
                    paddle.y -= 1;
                }
            }
        }
        Key::Down | Key::Char('s') | Key::Char('S') => {
            if let Some(paddle) = e.sprite_mut(RIGHT_PADDLE) {
                if paddle.y + paddle.height < height {
                    paddle.y += 1;
                }
            }
        }
        Key::SPACE => e.toggle_pause(),
        _ => {}
    }
    e.paint();
}
