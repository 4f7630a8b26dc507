//! Registry module - named sprites and named global values
//!
//! Sprites are kept in draw order: a new name goes to the end, re-registering
//! an existing name replaces it in place. Globals live in a separate namespace
//! and hold arbitrary JSON values.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::types::{Color, Sprite, SpriteOptions};

/// Live sprite collection in draw order.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: Vec<Sprite>,
    index: HashMap<String, usize>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and store a sprite, replacing any sprite already under `name`.
    pub fn register(&mut self, name: &str, opts: SpriteOptions, default_color: Color) -> &mut Sprite {
        let sprite = Sprite::from_options(name, opts, default_color);
        let i = match self.index.get(name) {
            Some(&i) => {
                self.sprites[i] = sprite;
                i
            }
            None => {
                self.sprites.push(sprite);
                let i = self.sprites.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.sprites[i]
    }

    /// Remove a sprite. Returns it if it existed.
    pub fn unregister(&mut self, name: &str) -> Option<Sprite> {
        let i = self.index.remove(name)?;
        let removed = self.sprites.remove(i);
        for sprite in &self.sprites[i..] {
            if let Some(slot) = self.index.get_mut(&sprite.name) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.index.get(name).map(|&i| &self.sprites[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Sprite> {
        self.index.get(name).map(|&i| &mut self.sprites[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// All sprites in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    /// All sprites in draw order, mutable in place.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    /// Sprites whose names satisfy `pred`, in draw order.
    pub fn matching(&self, pred: impl Fn(&str) -> bool) -> Vec<&Sprite> {
        self.sprites.iter().filter(|s| pred(&s.name)).collect()
    }

    /// Names of all sprites, in draw order.
    pub fn names(&self) -> Vec<String> {
        self.sprites.iter().map(|s| s.name.clone()).collect()
    }

    /// Re-register a sprite from a plain-data copy so it is drawn last.
    ///
    /// Returns false (and leaves the registry untouched) when the sprite does
    /// not exist or cannot be copied.
    pub fn move_to_top(&mut self, name: &str) -> bool {
        let Some(sprite) = self.get(name) else {
            return false;
        };
        let copy: Sprite = match serde_json::to_value(sprite).and_then(serde_json::from_value) {
            Ok(copy) => copy,
            Err(err) => {
                tracing::warn!(sprite = name, error = %err, "move_to_top: sprite copy failed");
                return false;
            }
        };
        let color = copy.color;
        self.unregister(name);
        self.register(name, SpriteOptions::from(&copy), color);
        true
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.index.clear();
    }
}

/// Named global values.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    values: BTreeMap<String, Value>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, overwriting any previous value.
    pub fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Integer view of a global; `None` if missing or not an integer.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    pub fn matching(&self, pred: impl Fn(&str) -> bool) -> Vec<(&str, &Value)> {
        self.values
            .iter()
            .filter(|(k, _)| pred(k))
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
