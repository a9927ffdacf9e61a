#![forbid(unsafe_code)]

//! Flat list → forest conversion for menu/department/dict hierarchies.
//!
//! Records are JSON objects carrying an id, a parent pointer and an optional
//! sort order. A record whose parent id is not in the input becomes a root.
//! Every level, roots included, is sorted ascending by the sort field
//! (missing treated as 0, stable).

use crate::error::{Error, Result};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    pub id_field: String,
    pub parent_field: String,
    pub children_field: String,
    pub sort_field: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            id_field: "id".into(),
            parent_field: "parentId".into(),
            children_field: "children".into(),
            sort_field: "sortOrder".into(),
        }
    }
}

fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn sort_key(value: &Value, field: &str) -> f64 {
    value.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

struct Builder<'a> {
    slots: Vec<Option<Value>>,
    children_of: Vec<Vec<usize>>,
    opts: &'a TreeOptions,
    consumed: usize,
}

impl Builder<'_> {
    fn build(&mut self, i: usize) -> Value {
        let Some(mut node) = self.slots[i].take() else {
            return Value::Null;
        };
        self.consumed += 1;
        let child_ids = std::mem::take(&mut self.children_of[i]);
        let mut children: Vec<Value> = child_ids.into_iter().map(|c| self.build(c)).collect();
        sort_level(&mut children, &self.opts.sort_field);
        if let Value::Object(map) = &mut node {
            map.insert(self.opts.children_field.clone(), Value::Array(children));
        }
        node
    }
}

fn sort_level(nodes: &mut [Value], sort_field: &str) {
    nodes.sort_by(|a, b| {
        sort_key(a, sort_field)
            .partial_cmp(&sort_key(b, sort_field))
            .unwrap_or(Ordering::Equal)
    });
}

/// Assemble a forest from parent-pointer records.
///
/// Fails with [`Error::CycleDetected`] when parent pointers form a cycle;
/// for acyclic input the output node count always equals the input count.
pub fn handle_tree(records: Vec<Value>, opts: &TreeOptions) -> Result<Vec<Value>> {
    let total = records.len();
    let slots: Vec<Option<Value>> = records.into_iter().map(Some).collect();

    let mut index: HashMap<String, usize> = HashMap::with_capacity(total);
    for (i, slot) in slots.iter().enumerate() {
        let id = slot.as_ref().and_then(|v| v.get(&opts.id_field)).and_then(value_key);
        if let Some(id) = id {
            // Duplicate ids: last record wins, as in the original index build.
            index.insert(id, i);
        }
    }

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); total];
    let mut roots: Vec<usize> = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let parent = slot
            .as_ref()
            .and_then(|v| v.get(&opts.parent_field))
            .and_then(value_key)
            .and_then(|key| index.get(&key).copied());
        match parent {
            Some(p) => children_of[p].push(i),
            None => roots.push(i),
        }
    }

    let mut builder = Builder { slots, children_of, opts, consumed: 0 };
    let mut forest: Vec<Value> = roots.into_iter().map(|r| builder.build(r)).collect();
    sort_level(&mut forest, &opts.sort_field);

    if builder.consumed != total {
        // Nodes left unreachable from any root can only sit on a
        // parent-pointer cycle.
        let offender = builder
            .slots
            .iter()
            .flatten()
            .filter_map(|v| v.get(&opts.id_field).and_then(value_key))
            .next()
            .unwrap_or_else(|| "?".into());
        return Err(Error::CycleDetected(offender));
    }
    Ok(forest)
}
