//! Flash choreography on a running engine.

use std::cell::RefCell;
use std::rc::Rc;

use table_game::core::{Engine, EngineConfig, FlashPosition, Screen};
use table_game::types::SpriteOptions;

struct Counters {
    pauses: u32,
    resumes: u32,
    done: u32,
}

type Shared = Rc<RefCell<Counters>>;

fn flashing_engine() -> (Engine, Shared) {
    let counters = Rc::new(RefCell::new(Counters {
        pauses: 0,
        resumes: 0,
        done: 0,
    }));
    let on_pause = counters.clone();
    let on_unpause = counters.clone();
    let config = EngineConfig::new()
        .with_sprite("block", SpriteOptions::new().at(1, 1))
        .with_on_pause(move |_| on_pause.borrow_mut().pauses += 1)
        .with_on_unpause(move |_| on_unpause.borrow_mut().resumes += 1);
    let mut engine = Engine::new(config, Screen::new(5, 5));
    engine.start();
    engine.advance(100);
    (engine, counters)
}

fn done_callback(counters: &Shared) -> Option<table_game::core::TimerCallback> {
    let counters = counters.clone();
    Some(Box::new(move |_| counters.borrow_mut().done += 1))
}

#[test]
fn three_pulses_alternate_and_finish() {
    let (mut e, c) = flashing_engine();
    e.flash_ending(3, 100, done_callback(&c));
    assert_eq!(e.flash_position(), FlashPosition::Running);

    e.advance(0);
    assert!(e.is_paused());
    assert!(e.screen().is_blank());

    e.advance(100);
    assert!(!e.is_paused());
    assert_eq!(e.screen().filled_count(), 1);

    e.advance(100);
    assert!(e.is_paused());
    e.advance(100);
    assert!(!e.is_paused());
    e.advance(100);
    assert!(e.is_paused());
    assert_eq!(c.borrow().done, 0);

    e.advance(100);
    assert!(!e.is_paused());
    assert_eq!(e.flash_position(), FlashPosition::Finished);
    assert_eq!(c.borrow().pauses, 3);
    assert_eq!(c.borrow().resumes, 3);
    assert_eq!(c.borrow().done, 1);

    e.advance(1000);
    assert_eq!(c.borrow().done, 1);
}

#[test]
fn defaults_are_five_pulses_of_150ms() {
    let (mut e, c) = flashing_engine();
    e.flash_ending(0, 0, done_callback(&c));
    e.advance(9 * 150 - 1);
    assert_eq!(c.borrow().done, 0);
    e.advance(1);
    assert_eq!(c.borrow().done, 1);
    assert_eq!(c.borrow().pauses, 5);
}

#[test]
fn second_call_only_adds_a_completion() {
    let (mut e, c) = flashing_engine();
    e.flash_ending(2, 50, done_callback(&c));
    e.advance(20);
    e.flash_ending(2, 50, done_callback(&c));
    e.advance(500);

    let c = c.borrow();
    assert_eq!(c.pauses, 2);
    assert_eq!(c.resumes, 2);
    assert_eq!(c.done, 2);
}

#[test]
fn reset_allows_flashing_again() {
    let (mut e, c) = flashing_engine();
    e.flash_ending(1, 50, None);
    e.advance(100);
    assert_eq!(e.flash_position(), FlashPosition::Finished);

    e.flash_ending(1, 50, None);
    e.advance(100);
    assert_eq!(c.borrow().pauses, 1);

    e.reset_flash();
    assert_eq!(e.flash_position(), FlashPosition::NotStarted);
    e.flash_ending(1, 50, None);
    e.advance(100);
    assert_eq!(c.borrow().pauses, 2);
}
