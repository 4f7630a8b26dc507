//! Scoreboard values shown next to the grid.

use crate::types::DetailValue;

/// Receives every scoreboard write.
///
/// The engine keeps its own [`Details`] copy; a sink is for front ends that
/// want to be pushed updates instead of reading it back each frame.
pub trait DetailsSink {
    fn show(&mut self, name: &str, value: &DetailValue);

    fn set_visible(&mut self, visible: bool);

    /// Drop every entry shown so far; called when the engine restarts.
    fn clear(&mut self) {}
}

/// Ordered scoreboard entries plus a visibility flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Details {
    entries: Vec<(String, DetailValue)>,
    visible: bool,
}

impl Default for Details {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            visible: true,
        }
    }
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DetailValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Update an entry; unknown names are appended.
    pub fn set(&mut self, name: &str, value: DetailValue) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Single-line rendering, e.g. `Score: 100  Lives: 3`.
    pub fn line(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{n}: {v}"))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_insertion_order() {
        let mut d = Details::new();
        d.set("Score", 0.into());
        d.set("Lives", 3.into());
        d.set("Score", 100.into());
        assert_eq!(d.len(), 2);
        assert_eq!(d.line(), "Score: 100  Lives: 3");
        assert_eq!(d.get("Lives").and_then(DetailValue::as_i64), Some(3));
        assert!(d.get("Level").is_none());
    }

    #[test]
    fn visible_by_default() {
        let mut d = Details::new();
        assert!(d.visible());
        d.set_visible(false);
        assert!(!d.visible());
    }
}
