//! Mapping from terminal events to engine input events.

use arrayvec::ArrayVec;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermButton, MouseEvent,
    MouseEventKind,
};

use crate::types::{InputEvent, Key, MouseButton};

/// Most engine events one terminal event can expand into.
pub const MAX_EVENTS: usize = 4;

pub type Events = ArrayVec<InputEvent, MAX_EVENTS>;

/// Translate a terminal key code. Function keys and the like have no mapping.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        _ => None,
    }
}

/// Key events: press gives key-down then key-press, release gives key-up.
///
/// Most terminals never report releases, so games should react to key-down.
pub fn map_key_event(key: KeyEvent) -> Events {
    let mut out = Events::new();
    let Some(k) = map_key(key.code) else {
        return out;
    };
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            out.push(InputEvent::KeyDown(k));
            out.push(InputEvent::KeyPress(k));
        }
        KeyEventKind::Release => out.push(InputEvent::KeyUp(k)),
    }
    out
}

fn map_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

/// Tracks which grid cell the pointer is over so that enter, leave, over and
/// out can be synthesised from raw terminal mouse reports.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    hovered: Option<(i32, i32)>,
    pressed: Option<((i32, i32), MouseButton)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell under the pointer, if it is over the grid.
    pub fn hovered(&self) -> Option<(i32, i32)> {
        self.hovered
    }

    /// Translate a mouse report. `locate` maps a terminal column/row to a grid
    /// cell, returning `None` outside the grid.
    pub fn map_mouse(
        &mut self,
        mouse: MouseEvent,
        locate: impl Fn(u16, u16) -> Option<(i32, i32)>,
    ) -> Events {
        let mut out = Events::new();
        let cell = locate(mouse.column, mouse.row);
        self.track_hover(cell, &mut out);
        let Some((x, y)) = cell else {
            if matches!(mouse.kind, MouseEventKind::Up(_)) {
                self.pressed = None;
            }
            return out;
        };

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                out.push(InputEvent::MouseMove { x, y });
            }
            MouseEventKind::Down(button) => {
                let button = map_button(button);
                self.pressed = Some(((x, y), button));
                out.push(InputEvent::MouseDown { x, y, button });
                if button == MouseButton::Right {
                    out.push(InputEvent::ContextMenu { x, y });
                }
            }
            MouseEventKind::Up(button) => {
                let button = map_button(button);
                out.push(InputEvent::MouseUp { x, y, button });
                if button == MouseButton::Left && self.pressed == Some(((x, y), button)) {
                    out.push(InputEvent::Click { x, y });
                }
                self.pressed = None;
            }
            MouseEventKind::ScrollUp => out.push(InputEvent::MouseWheel { x, y, delta: -1 }),
            MouseEventKind::ScrollDown => out.push(InputEvent::MouseWheel { x, y, delta: 1 }),
            _ => {}
        }
        out
    }

    fn track_hover(&mut self, cell: Option<(i32, i32)>, out: &mut Events) {
        if cell == self.hovered {
            return;
        }
        if let Some((x, y)) = self.hovered {
            out.push(InputEvent::MouseOut { x, y });
        }
        match cell {
            Some((x, y)) => {
                if self.hovered.is_none() {
                    out.push(InputEvent::MouseEnter { x, y });
                }
                out.push(InputEvent::MouseOver { x, y });
            }
            None => out.push(InputEvent::MouseLeave),
        }
        self.hovered = cell;
    }

    /// Forget hover and press state, e.g. after the terminal loses focus.
    pub fn reset(&mut self, out: &mut Events) {
        if self.hovered.take().is_some() {
            out.push(InputEvent::MouseLeave);
        }
        self.pressed = None;
    }
}

/// Translate any terminal event. Resize and paste events produce nothing.
pub fn map_event(
    event: &Event,
    pointer: &mut PointerTracker,
    locate: impl Fn(u16, u16) -> Option<(i32, i32)>,
) -> Events {
    match event {
        Event::Key(key) => map_key_event(*key),
        Event::Mouse(mouse) => pointer.map_mouse(*mouse, locate),
        Event::FocusLost => {
            let mut out = Events::new();
            pointer.reset(&mut out);
            out
        }
        _ => Events::new(),
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}

/// Tab cycles between the bundled games.
pub fn is_next_game(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release && key.code == KeyCode::Tab
}
