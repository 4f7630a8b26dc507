//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used throughout the workspace: sprites and
//! their construction options, colours, scoreboard values and input events.
//! Everything here is pure data with serde derives, so the engine, the terminal
//! front end and game content can all exchange it freely.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DELAY_MS` | 50 | Interval between game updates |
//! | `DEFAULT_INITIAL_DELAY_MS` | 20 | Wait before the first tick after start |
//! | `DEFAULT_FLASHES` | 5 | Pulses in a flash ending |
//! | `DEFAULT_FLASH_PULSE_MS` | 150 | Length of one hide or show pulse |
//!
//! # Examples
//!
//! ```
//! use table_game_types::{Color, SpriteOptions, Sprite};
//!
//! let opts = SpriteOptions::new().at(3, 2).size(1, 3);
//! let paddle = Sprite::from_options("paddle", opts, Color::from_hex("#eee").unwrap());
//!
//! assert_eq!(paddle.x, 3);
//! assert_eq!(paddle.height, 3);
//! assert_eq!(paddle.velocity_x, 0);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Interval between game updates (50ms)
pub const DEFAULT_DELAY_MS: u64 = 50;

/// Wait before the first tick so an intro frame stays visible (20ms)
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 20;

/// Number of hide/show pulses in a flash ending
pub const DEFAULT_FLASHES: u32 = 5;

/// Length of one flash pulse (150ms)
pub const DEFAULT_FLASH_PULSE_MS: u64 = 150;

/// 24-bit colour used for sprite cells and cell borders.
///
/// Serialized as a `#rrggbb` string so sprite options can be written by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    ///
    /// ```
    /// use table_game_types::Color;
    ///
    /// assert_eq!(Color::from_hex("#eee"), Some(Color::new(0xee, 0xee, 0xee)));
    /// assert_eq!(Color::from_hex("fff1f1"), Some(Color::new(0xff, 0xf1, 0xf1)));
    /// assert_eq!(Color::from_hex("#12"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                digit(0)? * 17,
                digit(1)? * 17,
                digit(2)? * 17,
            )),
            6 => Some(Self::new(pair(0)?, pair(2)?, pair(4)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour {s:?}")))
    }
}

/// Named colours available to game content.
///
/// The defaults are pale tones meant to sit on a light page; the terminal view
/// draws them as solid blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub default_color: Color,
    pub white: Color,
    pub gray: Color,
    pub black: Color,
    pub red: Color,
    pub green: Color,
    pub blue: Color,
    pub yellow: Color,
    pub purple: Color,
    pub blue_green: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default_color: Color::new(0xee, 0xee, 0xee),
            white: Color::new(0xff, 0xff, 0xff),
            gray: Color::new(0xf1, 0xf1, 0xf1),
            black: Color::new(0xd1, 0xd1, 0xd1),
            red: Color::new(0xff, 0xf1, 0xf1),
            green: Color::new(0xf1, 0xff, 0xf1),
            blue: Color::new(0xf1, 0xf1, 0xff),
            yellow: Color::new(0xff, 0xff, 0xf1),
            purple: Color::new(0xff, 0xf1, 0xff),
            blue_green: Color::new(0xf1, 0xff, 0xff),
        }
    }
}

/// Axis-aligned rectangle in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

fn one() -> i32 {
    1
}

/// One sub-rectangle of a sprite's polygon.
///
/// Collision treats every polygon cell as 1x1 regardless of its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonCell {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "one")]
    pub width: i32,
    #[serde(default = "one")]
    pub height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PolygonCell {
    /// A 1x1 cell without its own colour.
    pub const fn unit(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
            color: None,
        }
    }

    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Field selector for [`Sprite::shift_polygon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonField {
    X,
    Y,
    Width,
    Height,
}

/// A named, positioned, drawable and collidable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprite {
    pub name: String,
    pub x: i32,
    pub y: i32,
    /// Advisory; the engine never applies velocity on its own.
    pub velocity_x: i32,
    pub velocity_y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Color,
    /// When non-empty, replaces `x/y/width/height` for drawing and collision.
    pub polygon: Vec<PolygonCell>,
}

impl Sprite {
    /// Build a sprite by merging `opts` over the documented defaults.
    ///
    /// Missing fields fall back to position 0,0, size 1x1, velocity 0,0, an
    /// empty polygon and `default_color`. An explicit zero width or height is
    /// kept as zero.
    pub fn from_options(name: impl Into<String>, opts: SpriteOptions, default_color: Color) -> Self {
        Self {
            name: name.into(),
            x: opts.x.unwrap_or(0),
            y: opts.y.unwrap_or(0),
            velocity_x: opts.velocity_x.unwrap_or(0),
            velocity_y: opts.velocity_y.unwrap_or(0),
            width: opts.width.unwrap_or(1),
            height: opts.height.unwrap_or(1),
            color: opts.color.unwrap_or(default_color),
            polygon: opts.polygon.unwrap_or_default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn has_polygon(&self) -> bool {
        !self.polygon.is_empty()
    }

    /// Offset one field of every polygon cell by `delta`.
    pub fn shift_polygon(&mut self, field: PolygonField, delta: i32) {
        for cell in &mut self.polygon {
            *polygon_field(cell, field) += delta;
        }
    }

    /// Overwrite one field of every polygon cell with `value`.
    pub fn set_polygon_field(&mut self, field: PolygonField, value: i32) {
        for cell in &mut self.polygon {
            *polygon_field(cell, field) = value;
        }
    }

    /// Give every polygon cell its own colour.
    pub fn set_polygon_color(&mut self, color: Color) {
        for cell in &mut self.polygon {
            cell.color = Some(color);
        }
    }
}

fn polygon_field(cell: &mut PolygonCell, field: PolygonField) -> &mut i32 {
    match field {
        PolygonField::X => &mut cell.x,
        PolygonField::Y => &mut cell.y,
        PolygonField::Width => &mut cell.width,
        PolygonField::Height => &mut cell.height,
    }
}

/// Construction options for a sprite; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteOptions {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub velocity_x: Option<i32>,
    pub velocity_y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub color: Option<Color>,
    pub polygon: Option<Vec<PolygonCell>>,
}

impl SpriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object such as `{"x": 1, "velocityX": -1}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn velocity(mut self, velocity_x: i32, velocity_y: i32) -> Self {
        self.velocity_x = Some(velocity_x);
        self.velocity_y = Some(velocity_y);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn polygon(mut self, polygon: Vec<PolygonCell>) -> Self {
        self.polygon = Some(polygon);
        self
    }
}

impl From<&Sprite> for SpriteOptions {
    fn from(sprite: &Sprite) -> Self {
        Self {
            x: Some(sprite.x),
            y: Some(sprite.y),
            velocity_x: Some(sprite.velocity_x),
            velocity_y: Some(sprite.velocity_y),
            width: Some(sprite.width),
            height: Some(sprite.height),
            color: Some(sprite.color),
            polygon: Some(sprite.polygon.clone()),
        }
    }
}

/// A scoreboard value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Number(i64),
    Text(String),
}

impl DetailValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DetailValue::Number(n) => Some(*n),
            DetailValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Number(n) => write!(f, "{n}"),
            DetailValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for DetailValue {
    fn from(n: i64) -> Self {
        DetailValue::Number(n)
    }
}

impl From<i32> for DetailValue {
    fn from(n: i32) -> Self {
        DetailValue::Number(n as i64)
    }
}

impl From<&str> for DetailValue {
    fn from(s: &str) -> Self {
        DetailValue::Text(s.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(s: String) -> Self {
        DetailValue::Text(s)
    }
}

/// Cell edge used for border lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Key identifier delivered with keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Tab,
}

impl Key {
    /// Space bar, the usual pause toggle.
    pub const SPACE: Key = Key::Char(' ');

    /// True for `c` regardless of case.
    pub fn is_char_ignore_case(&self, c: char) -> bool {
        matches!(self, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A discrete input event in grid-cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    KeyPress(Key),
    Click { x: i32, y: i32 },
    MouseDown { x: i32, y: i32, button: MouseButton },
    MouseUp { x: i32, y: i32, button: MouseButton },
    MouseMove { x: i32, y: i32 },
    MouseEnter { x: i32, y: i32 },
    MouseLeave,
    MouseOver { x: i32, y: i32 },
    MouseOut { x: i32, y: i32 },
    MouseWheel { x: i32, y: i32, delta: i32 },
    ContextMenu { x: i32, y: i32 },
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::KeyDown(_) => InputKind::KeyDown,
            InputEvent::KeyUp(_) => InputKind::KeyUp,
            InputEvent::KeyPress(_) => InputKind::KeyPress,
            InputEvent::Click { .. } => InputKind::Click,
            InputEvent::MouseDown { .. } => InputKind::MouseDown,
            InputEvent::MouseUp { .. } => InputKind::MouseUp,
            InputEvent::MouseMove { .. } => InputKind::MouseMove,
            InputEvent::MouseEnter { .. } => InputKind::MouseEnter,
            InputEvent::MouseLeave => InputKind::MouseLeave,
            InputEvent::MouseOver { .. } => InputKind::MouseOver,
            InputEvent::MouseOut { .. } => InputKind::MouseOut,
            InputEvent::MouseWheel { .. } => InputKind::MouseWheel,
            InputEvent::ContextMenu { .. } => InputKind::ContextMenu,
        }
    }

    pub fn key(&self) -> Option<Key> {
        match self {
            InputEvent::KeyDown(k) | InputEvent::KeyUp(k) | InputEvent::KeyPress(k) => Some(*k),
            _ => None,
        }
    }

    /// Cell coordinates carried by pointer events.
    pub fn cell(&self) -> Option<(i32, i32)> {
        match *self {
            InputEvent::Click { x, y }
            | InputEvent::MouseDown { x, y, .. }
            | InputEvent::MouseUp { x, y, .. }
            | InputEvent::MouseMove { x, y }
            | InputEvent::MouseEnter { x, y }
            | InputEvent::MouseOver { x, y }
            | InputEvent::MouseOut { x, y }
            | InputEvent::MouseWheel { x, y, .. }
            | InputEvent::ContextMenu { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// Handler kind; one hook may be bound per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    KeyDown,
    KeyUp,
    KeyPress,
    Click,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseEnter,
    MouseLeave,
    MouseOver,
    MouseOut,
    MouseWheel,
    ContextMenu,
}

impl InputKind {
    pub const ALL: [InputKind; 13] = [
        InputKind::KeyDown,
        InputKind::KeyUp,
        InputKind::KeyPress,
        InputKind::Click,
        InputKind::MouseDown,
        InputKind::MouseUp,
        InputKind::MouseMove,
        InputKind::MouseEnter,
        InputKind::MouseLeave,
        InputKind::MouseOver,
        InputKind::MouseOut,
        InputKind::MouseWheel,
        InputKind::ContextMenu,
    ];

    pub fn is_pointer(&self) -> bool {
        !matches!(
            self,
            InputKind::KeyDown | InputKind::KeyUp | InputKind::KeyPress
        )
    }
}
