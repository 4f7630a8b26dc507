//! Bundled games built on the engine.
//!
//! Each game is just an [`EngineConfig`]; randomness comes from a shared seeded
//! generator so runs can be replayed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use table_game_core::EngineConfig;

pub mod ping_pong;
pub mod snake;
pub mod whack_a_mole;

pub type SharedRng = Rc<RefCell<StdRng>>;

pub fn seeded_rng(seed: u64) -> SharedRng {
    Rc::new(RefCell::new(StdRng::seed_from_u64(seed)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    PingPong,
    Snake,
    WhackAMole,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::PingPong, Demo::Snake, Demo::WhackAMole];

    pub fn title(self) -> &'static str {
        match self {
            Demo::PingPong => "Ping Pong",
            Demo::Snake => "Snake",
            Demo::WhackAMole => "Whack-a-mole",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Demo::PingPong => "w/s or arrows move  space pause  tab next  q quit",
            Demo::Snake => "wasd or arrows steer  space pause  tab next  q quit",
            Demo::WhackAMole => "click moles  space pause  tab next  q quit",
        }
    }

    /// The game after this one, wrapping around.
    pub fn next(self) -> Demo {
        let i = Demo::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Demo::ALL[(i + 1) % Demo::ALL.len()]
    }

    pub fn config(self, rng: SharedRng) -> EngineConfig {
        match self {
            Demo::PingPong => ping_pong::config(rng),
            Demo::Snake => snake::config(rng),
            Demo::WhackAMole => whack_a_mole::config(rng),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
