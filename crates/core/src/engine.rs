//! Engine - one running game instance
//!
//! The engine owns everything a game touches: the sprite registry, globals,
//! scoreboard details, the screen and the scheduler. Game content plugs in
//! through hooks on [`EngineConfig`]; every hook receives `&mut Engine`, so all
//! state changes go through the instance and two engines never share state.
//!
//! Hooks are reference-counted `Fn`s and are cloned out before being called,
//! which lets a hook call back into any engine method (including ones that run
//! other hooks, such as `pause()` from inside `update`).

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use serde_json::Value;

use crate::details::{Details, DetailsSink};
use crate::error::{EngineError, Result};
use crate::flash::{FlashPlan, FlashPosition, FlashStep};
use crate::geometry;
use crate::registry::{Globals, SpriteRegistry};
use crate::render;
use crate::scheduler::{Fired, Scheduler, TimerId};
use crate::screen::{GridRenderer, Screen};
use crate::types::{
    Color, DetailValue, InputEvent, InputKind, Palette, PolygonCell, Rect, Sprite, SpriteOptions,
    DEFAULT_DELAY_MS, DEFAULT_INITIAL_DELAY_MS,
};

/// Lifecycle hook (`init`, `update`, `on_pause`, `on_unpause`, `on_paint`).
pub type Hook = Rc<dyn Fn(&mut Engine)>;

/// Input hook, one per [`InputKind`].
pub type InputHook = Rc<dyn Fn(&mut Engine, &InputEvent)>;

/// Payload of a one-shot timer.
pub type TimerCallback = Box<dyn FnOnce(&mut Engine)>;

#[derive(Clone, Default)]
struct Hooks {
    init: Option<Hook>,
    update: Option<Hook>,
    on_pause: Option<Hook>,
    on_unpause: Option<Hook>,
    on_paint: Option<Hook>,
}

/// Everything needed to construct a game.
///
/// Missing pieces fall back to defaults: no hooks, a 50ms tick, hide on pause,
/// and a 20ms wait before the first tick.
pub struct EngineConfig {
    pub globals: Vec<(String, Value)>,
    pub sprites: Vec<(String, SpriteOptions)>,
    pub details: Vec<(String, DetailValue)>,
    pub init: Option<Hook>,
    pub update: Option<Hook>,
    pub on_pause: Option<Hook>,
    pub on_unpause: Option<Hook>,
    pub on_paint: Option<Hook>,
    pub input: BTreeMap<InputKind, InputHook>,
    /// Tick interval; zero selects the default.
    pub delay_ms: u64,
    pub hide_on_pause: bool,
    /// Wait before the first tick; zero selects the default.
    pub initial_delay_ms: u64,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            globals: Vec::new(),
            sprites: Vec::new(),
            details: Vec::new(),
            init: None,
            update: None,
            on_pause: None,
            on_unpause: None,
            on_paint: None,
            input: BTreeMap::new(),
            delay_ms: DEFAULT_DELAY_MS,
            hide_on_pause: true,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.globals.push((name.to_string(), value.into()));
        self
    }

    /// Add every key of a JSON object as a global.
    pub fn with_globals_json(mut self, json: &str) -> Result<Self> {
        let map: serde_json::Map<String, Value> =
            serde_json::from_str(json).map_err(|source| EngineError::Options {
                name: "globals".to_string(),
                source,
            })?;
        self.globals.extend(map);
        Ok(self)
    }

    pub fn with_sprite(mut self, name: &str, opts: SpriteOptions) -> Self {
        self.sprites.push((name.to_string(), opts));
        self
    }

    pub fn with_sprite_json(self, name: &str, json: &str) -> Result<Self> {
        let opts = parse_sprite_options(name, json)?;
        Ok(self.with_sprite(name, opts))
    }

    pub fn with_detail(mut self, name: &str, value: impl Into<DetailValue>) -> Self {
        self.details.push((name.to_string(), value.into()));
        self
    }

    pub fn with_init(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.init = Some(Rc::new(f));
        self
    }

    pub fn with_update(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.update = Some(Rc::new(f));
        self
    }

    pub fn with_on_pause(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.on_pause = Some(Rc::new(f));
        self
    }

    pub fn with_on_unpause(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.on_unpause = Some(Rc::new(f));
        self
    }

    pub fn with_on_paint(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.on_paint = Some(Rc::new(f));
        self
    }

    pub fn with_input(mut self, kind: InputKind, f: impl Fn(&mut Engine, &InputEvent) + 'static) -> Self {
        self.input.insert(kind, Rc::new(f));
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_hide_on_pause(mut self, hide_on_pause: bool) -> Self {
        self.hide_on_pause = hide_on_pause;
        self
    }

    pub fn with_initial_delay_ms(mut self, initial_delay_ms: u64) -> Self {
        self.initial_delay_ms = initial_delay_ms;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

fn parse_sprite_options(name: &str, json: &str) -> Result<SpriteOptions> {
    SpriteOptions::from_json(json).map_err(|source| EngineError::Options {
        name: name.to_string(),
        source,
    })
}

fn or_default(value: u64, default: u64) -> u64 {
    if value == 0 {
        default
    } else {
        value
    }
}

/// A running game.
pub struct Engine {
    sprites: SpriteRegistry,
    globals: Globals,
    details: Details,
    details_sink: Option<Box<dyn DetailsSink>>,
    screen: Screen,
    scheduler: Scheduler<TimerCallback>,
    hooks: Hooks,
    input_hooks: BTreeMap<InputKind, InputHook>,
    /// Kinds that were ever bound. Grows only; rebinding reuses the entry.
    subscribed: BTreeSet<InputKind>,
    palette: Palette,
    hide_on_pause: bool,
    initial_delay_ms: u64,
    flash_position: FlashPosition,
    started: bool,
}

impl Engine {
    /// Build an engine and register the configured globals, sprites and
    /// details. Nothing runs until [`Engine::start`].
    pub fn new(config: EngineConfig, screen: Screen) -> Self {
        let mut engine = Self {
            sprites: SpriteRegistry::new(),
            globals: Globals::new(),
            details: Details::new(),
            details_sink: None,
            screen,
            scheduler: Scheduler::new(DEFAULT_DELAY_MS),
            hooks: Hooks::default(),
            input_hooks: BTreeMap::new(),
            subscribed: BTreeSet::new(),
            palette: Palette::default(),
            hide_on_pause: true,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            flash_position: FlashPosition::NotStarted,
            started: false,
        };
        engine.apply_config(config);
        engine
    }

    /// Attach a scoreboard sink and push the current details to it.
    pub fn with_details_sink(mut self, mut sink: Box<dyn DetailsSink>) -> Self {
        for (name, value) in self.details.iter() {
            sink.show(name, value);
        }
        sink.set_visible(self.details.visible());
        self.details_sink = Some(sink);
        self
    }

    fn apply_config(&mut self, config: EngineConfig) {
        self.scheduler = Scheduler::new(or_default(config.delay_ms, DEFAULT_DELAY_MS));
        self.palette = config.palette;
        self.hide_on_pause = config.hide_on_pause;
        self.initial_delay_ms = or_default(config.initial_delay_ms, DEFAULT_INITIAL_DELAY_MS);

        for (name, value) in config.globals {
            self.globals.set(&name, value);
        }
        let default_color = self.palette.default_color;
        for (name, opts) in config.sprites {
            self.sprites.register(&name, opts, default_color);
        }
        for (name, value) in config.details {
            self.set_detail(&name, value);
        }

        self.hooks = Hooks {
            init: config.init,
            update: config.update,
            on_pause: config.on_pause,
            on_unpause: config.on_unpause,
            on_paint: config.on_paint,
        };
        self.input_hooks.clear();
        for (kind, hook) in config.input {
            self.bind_input_rc(kind, hook);
        }
    }

    /// Run `init`, draw the first frame, and start ticking after the initial
    /// delay. Calling it again does nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::info!(
            width = self.screen.width(),
            height = self.screen.height(),
            delay_ms = self.scheduler.interval_ms(),
            sprites = self.sprites.len(),
            "engine start"
        );

        self.run_hook(|h| h.init.clone());
        self.paint();
        self.scheduler.schedule(
            self.initial_delay_ms,
            Box::new(|engine: &mut Engine| {
                engine.scheduler.start_ticking();
            }),
        );
    }

    /// Replace the running game with a new one on the same screen.
    ///
    /// Timers, sprites, globals, details and the flash marker are all reset.
    /// Input kinds stay subscribed; their hooks come from the new config.
    pub fn restart(&mut self, config: EngineConfig) {
        tracing::info!("engine restart");
        self.sprites.clear();
        self.globals = Globals::new();
        self.details = Details::new();
        if let Some(sink) = self.details_sink.as_mut() {
            sink.clear();
        }
        self.flash_position = FlashPosition::NotStarted;
        self.started = false;
        self.screen.clear();
        self.apply_config(config);
        self.set_details_visible(true);
        self.start();
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    // ---------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------

    /// Move the clock forward by `ms`, firing every tick and timer that comes
    /// due, in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(fired) = self.scheduler.pop_due(until) {
            match fired {
                Fired::Tick => self.tick(),
                Fired::Task(callback) => callback(self),
            }
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    fn tick(&mut self) {
        if !self.scheduler.is_live() {
            return;
        }
        let n = self.scheduler.record_tick();
        tracing::trace!(tick = n, "tick");
        self.run_hook(|h| h.update.clone());
        self.paint();
    }

    /// Number of ticks that ran `update`.
    pub fn elapsed_ticks(&self) -> u64 {
        self.scheduler.elapsed_ticks()
    }

    pub fn delay(&self) -> u64 {
        self.scheduler.interval_ms()
    }

    /// Change the tick interval; the tick timer restarts from now.
    pub fn set_delay(&mut self, ms: u64) -> Result<()> {
        if ms == 0 {
            return Err(EngineError::InvalidDelay);
        }
        tracing::debug!(delay_ms = ms, "set delay");
        self.scheduler.set_interval(ms);
        Ok(())
    }

    /// Suppress tick effects for `ms`, then run `callback`.
    ///
    /// The tick timer keeps running; skipped ticks are not replayed. A second
    /// window opened before the first ends is closed early by the first
    /// window's timer.
    pub fn delay_for(&mut self, ms: u64, callback: impl FnOnce(&mut Engine) + 'static) -> TimerId {
        tracing::debug!(ms, "delay window");
        self.scheduler.begin_delay(ms);
        self.set_timeout(ms, move |engine| {
            engine.scheduler.end_delay();
            callback(engine);
        })
    }

    pub fn is_delayed(&self) -> bool {
        self.scheduler.delayed()
    }

    /// Run `callback` once after `ms` without touching tick state.
    pub fn set_timeout(&mut self, ms: u64, callback: impl FnOnce(&mut Engine) + 'static) -> TimerId {
        self.scheduler.schedule(ms, Box::new(callback))
    }

    /// Disarm a timer from [`Engine::set_timeout`] or [`Engine::delay_for`].
    ///
    /// Cancelling a delay window's timer leaves the window open.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.scheduler.cancel(id)
    }

    // ---------------------------------------------------------------------
    // Pause / resume / flash
    // ---------------------------------------------------------------------

    /// Pause the game and stop the tick timer.
    pub fn pause(&mut self) {
        if self.hide_on_pause {
            self.screen.clear();
            self.set_details_visible(false);
        }
        self.run_hook(|h| h.on_pause.clone());
        self.scheduler.set_paused(true);
        self.scheduler.stop_ticking();
        tracing::debug!(at_ms = self.scheduler.now_ms(), "paused");
    }

    /// Resume the game and restart the tick timer at the current interval.
    pub fn resume(&mut self) {
        self.run_hook(|h| h.on_unpause.clone());
        self.scheduler.set_paused(false);
        self.set_details_visible(true);
        self.scheduler.start_ticking();
        tracing::debug!(at_ms = self.scheduler.now_ms(), "resumed");
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.paused()
    }

    pub fn hide_on_pause(&self) -> bool {
        self.hide_on_pause
    }

    /// Flash the screen `num_flashes` times, `pulse_ms` per half pulse, then run
    /// `on_done`. Zero arguments select 5 flashes and 150ms.
    ///
    /// Only the first call after [`Engine::reset_flash`] schedules pulses; later
    /// calls just arm their own completion timer.
    pub fn flash_ending(&mut self, num_flashes: u32, pulse_ms: u64, on_done: Option<TimerCallback>) {
        let plan = FlashPlan::new(num_flashes, pulse_ms);

        if self.flash_position == FlashPosition::NotStarted {
            tracing::debug!(
                flashes = plan.num_flashes,
                pulse_ms = plan.pulse_ms,
                "flash start"
            );
            for step in plan.steps() {
                match step {
                    FlashStep::Hide { at_ms } => {
                        self.set_timeout(at_ms, |engine| engine.pause());
                    }
                    FlashStep::Show { at_ms } => {
                        self.set_timeout(at_ms, |engine| {
                            engine.resume();
                            engine.paint();
                        });
                    }
                }
            }
            self.flash_position = FlashPosition::Running;
        }

        self.set_timeout(plan.total_ms(), move |engine| {
            engine.flash_position = FlashPosition::Finished;
            if let Some(on_done) = on_done {
                on_done(engine);
            }
        });
    }

    pub fn flash_position(&self) -> FlashPosition {
        self.flash_position
    }

    /// Allow the next [`Engine::flash_ending`] call to flash again.
    pub fn reset_flash(&mut self) {
        self.flash_position = FlashPosition::NotStarted;
    }

    // ---------------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------------

    /// Redraw the frame: clear, draw sprites (unless hidden by pause), then
    /// run `on_paint`.
    pub fn paint(&mut self) {
        self.screen.clear();
        if !(self.scheduler.paused() && self.hide_on_pause) {
            render::draw_sprites(&mut self.screen, self.sprites.iter());
        }
        self.run_hook(|h| h.on_paint.clone());
    }

    /// Blank the screen without touching sprites.
    pub fn clear(&mut self) {
        self.screen.clear();
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        render::fill_rect(&mut self.screen, rect, color);
    }

    pub fn fill_polygon(&mut self, polygon: &[PolygonCell], color: Color) {
        render::fill_polygon(&mut self.screen, polygon, color);
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn width(&self) -> i32 {
        self.screen.width()
    }

    pub fn height(&self) -> i32 {
        self.screen.height()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // ---------------------------------------------------------------------
    // Sprites
    // ---------------------------------------------------------------------

    /// Register a sprite, replacing any sprite with the same name.
    pub fn register_sprite(&mut self, name: &str, opts: SpriteOptions) -> &mut Sprite {
        self.sprites.register(name, opts, self.palette.default_color)
    }

    pub fn register_sprite_json(&mut self, name: &str, json: &str) -> Result<&mut Sprite> {
        let opts = parse_sprite_options(name, json)?;
        Ok(self.register_sprite(name, opts))
    }

    pub fn unregister_sprite(&mut self, name: &str) -> Option<Sprite> {
        self.sprites.unregister(name)
    }

    pub fn sprite(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn sprite_mut(&mut self, name: &str) -> Option<&mut Sprite> {
        self.sprites.get_mut(name)
    }

    /// Live sprites in draw order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn sprites_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    pub fn sprites_matching(&self, pred: impl Fn(&str) -> bool) -> Vec<&Sprite> {
        self.sprites.matching(pred)
    }

    pub fn sprite_names(&self) -> Vec<String> {
        self.sprites.names()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Make `name` the last sprite drawn. Returns false if nothing moved.
    pub fn move_to_top(&mut self, name: &str) -> bool {
        self.sprites.move_to_top(name)
    }

    /// Collision between two registered sprites; false if either is missing.
    pub fn sprites_colliding(&self, a: &str, b: &str) -> bool {
        match (self.sprites.get(a), self.sprites.get(b)) {
            (Some(a), Some(b)) => geometry::colliding(a, b),
            _ => false,
        }
    }

    // ---------------------------------------------------------------------
    // Globals
    // ---------------------------------------------------------------------

    pub fn register_global(&mut self, name: &str, value: impl Into<Value>) {
        self.globals.set(name, value.into());
    }

    pub fn set_global(&mut self, name: &str, value: impl Into<Value>) {
        self.globals.set(name, value.into());
    }

    pub fn unregister_global(&mut self, name: &str) -> Option<Value> {
        self.globals.remove(name)
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    pub fn global_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.globals.get_mut(name)
    }

    pub fn global_i64(&self, name: &str) -> Option<i64> {
        self.globals.get_i64(name)
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn globals_matching(&self, pred: impl Fn(&str) -> bool) -> Vec<(&str, &Value)> {
        self.globals.matching(pred)
    }

    // ---------------------------------------------------------------------
    // Details
    // ---------------------------------------------------------------------

    pub fn detail(&self, name: &str) -> Option<&DetailValue> {
        self.details.get(name)
    }

    pub fn detail_i64(&self, name: &str) -> Option<i64> {
        self.details.get(name).and_then(DetailValue::as_i64)
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Update a scoreboard value and push it to the sink.
    pub fn set_detail(&mut self, name: &str, value: impl Into<DetailValue>) {
        let value = value.into();
        if let Some(sink) = self.details_sink.as_mut() {
            sink.show(name, &value);
        }
        self.details.set(name, value);
    }

    pub fn set_details<I, N, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<DetailValue>,
    {
        for (name, value) in values {
            self.set_detail(name.as_ref(), value);
        }
    }

    fn set_details_visible(&mut self, visible: bool) {
        self.details.set_visible(visible);
        if let Some(sink) = self.details_sink.as_mut() {
            sink.set_visible(visible);
        }
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Bind the hook for one input kind, replacing any previous hook.
    ///
    /// Returns true when the kind is subscribed for the first time.
    pub fn bind_input(&mut self, kind: InputKind, f: impl Fn(&mut Engine, &InputEvent) + 'static) -> bool {
        self.bind_input_rc(kind, Rc::new(f))
    }

    fn bind_input_rc(&mut self, kind: InputKind, hook: InputHook) -> bool {
        self.input_hooks.insert(kind, hook);
        let fresh = self.subscribed.insert(kind);
        if fresh {
            tracing::debug!(?kind, "input subscribed");
        }
        fresh
    }

    /// Drop the hook for `kind`. The kind stays subscribed.
    pub fn unbind_input(&mut self, kind: InputKind) {
        self.input_hooks.remove(&kind);
    }

    pub fn is_bound(&self, kind: InputKind) -> bool {
        self.input_hooks.contains_key(&kind)
    }

    pub fn subscribed_inputs(&self) -> impl Iterator<Item = InputKind> + '_ {
        self.subscribed.iter().copied()
    }

    /// Whether the front end needs to deliver mouse events at all.
    pub fn wants_pointer(&self) -> bool {
        self.subscribed.iter().any(InputKind::is_pointer)
    }

    /// Deliver an event to its hook. Returns false when nothing is bound.
    pub fn dispatch_input(&mut self, event: &InputEvent) -> bool {
        let Some(hook) = self.input_hooks.get(&event.kind()).cloned() else {
            return false;
        };
        hook(self, event);
        true
    }

    fn run_hook(&mut self, pick: impl Fn(&Hooks) -> Option<Hook>) {
        if let Some(hook) = pick(&self.hooks) {
            hook(self);
        }
    }
}
