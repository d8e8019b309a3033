//! Latest rendered output of every module, in registration order.

use std::collections::HashMap;

use crate::ident::ModuleId;
use crate::protocol::Segment;

/// What a module currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// One segment.
    Text(String),
    /// One segment per element, left to right.
    Segments(Vec<String>),
}

impl From<&str> for Output {
    fn from(s: &str) -> Self {
        Output::Text(s.to_string())
    }
}

impl From<String> for Output {
    fn from(s: String) -> Self {
        Output::Text(s)
    }
}

impl From<Vec<String>> for Output {
    fn from(v: Vec<String>) -> Self {
        Output::Segments(v)
    }
}

impl From<Vec<&str>> for Output {
    fn from(v: Vec<&str>) -> Self {
        Output::Segments(v.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: Output,
    urgent: bool,
}

/// Mapping of module identifier to its current output.
#[derive(Debug, Default)]
pub struct OutputMap {
    order: Vec<ModuleId>,
    entries: HashMap<ModuleId, Entry>,
}

impl OutputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a slot for `id`; slots render in the order they were added.
    pub fn add_slot(&mut self, id: ModuleId) {
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Replace the output of `id`. The last write before a render wins.
    pub fn set(&mut self, id: &ModuleId, value: Output, urgent: bool) {
        if !self.order.contains(id) {
            self.order.push(id.clone());
        }
        self.entries.insert(id.clone(), Entry { value, urgent });
    }

    /// Remove the output of `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ModuleId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn get(&self, id: &ModuleId) -> Option<&Output> {
        self.entries.get(id).map(|e| &e.value)
    }

    pub fn is_urgent(&self, id: &ModuleId) -> bool {
        self.entries.get(id).is_some_and(|e| e.urgent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, keeping slot order.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flatten the current outputs into protocol segments.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        for id in &self.order {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            match &entry.value {
                Output::Text(text) => segments.push(Segment {
                    full_text: text.clone(),
                    urgent: entry.urgent,
                    name: id.clone(),
                    instance: None,
                }),
                Output::Segments(texts) => {
                    for (index, text) in texts.iter().enumerate() {
                        segments.push(Segment {
                            full_text: text.clone(),
                            urgent: entry.urgent,
                            name: id.clone(),
                            instance: Some(index.to_string()),
                        });
                    }
                }
            }
        }
        segments
    }
}
