//! Path-addressed view over a JSON variable document
//!
//! Paths are dot separated (`命定系统.命运点数`). Keys passed to `insert` and
//! `delete` are taken verbatim, so item names containing dots are safe there.

use serde_json::{Map, Value};

use super::StoreOp;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VariablePathError {
    #[error("Path contains an empty segment: '{0}'")]
    EmptySegment(String),
    #[error("Value at '{0}' is not an object")]
    NotAnObject(String),
    #[error("Value at '{0}' is not a number")]
    NotANumber(String),
}

/// Mutable variable document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTree {
    root: Value,
}

impl VariableTree {
    pub fn new(root: Value) -> Self {
        let root = if root.is_null() {
            Value::Object(Map::new())
        } else {
            root
        };
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_inner(self) -> Value {
        self.root
    }

    /// Value at `path`, `None` when any segment is missing
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.')
            .try_fold(&self.root, |node, segment| node.as_object()?.get(segment))
    }

    /// Keys of the object at `path`; empty when absent or not an object
    pub fn keys(&self, path: &str) -> Vec<String> {
        self.get(path)
            .and_then(Value::as_object)
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn set(&mut self, path: &str, value: Value) -> Result<(), VariablePathError> {
        let segments = split_path(path)?;
        let Some((last, parents)) = segments.split_last() else {
            self.root = value;
            return Ok(());
        };
        let parent = self.object_at_mut(path, parents)?;
        parent.insert((*last).to_string(), value);
        Ok(())
    }

    pub fn insert(&mut self, path: &str, key: &str, value: Value) -> Result<(), VariablePathError> {
        let segments = split_path(path)?;
        let target = self.object_at_mut(path, &segments)?;
        target.insert(key.to_string(), value);
        Ok(())
    }

    /// Remove `key` from the object at `path`; returns whether it existed
    pub fn delete(&mut self, path: &str, key: &str) -> Result<bool, VariablePathError> {
        split_path(path)?;
        let Some(node) = self.get_mut(path) else {
            return Ok(false);
        };
        match node {
            Value::Object(map) => Ok(map.shift_remove(key).is_some()),
            _ => Err(VariablePathError::NotAnObject(path.to_string())),
        }
    }

    /// Add `delta` to the number at `path`, treating a missing value as zero
    pub fn add(&mut self, path: &str, delta: i64) -> Result<(), VariablePathError> {
        let current = match self.get(path) {
            None | Some(Value::Null) => 0,
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| VariablePathError::NotANumber(path.to_string()))?,
            Some(_) => return Err(VariablePathError::NotANumber(path.to_string())),
        };
        self.set(path, Value::from(current.saturating_add(delta)))
    }

    pub fn apply(&mut self, op: &StoreOp) -> Result<(), VariablePathError> {
        match op {
            StoreOp::Set { path, value } => self.set(path, value.clone()),
            StoreOp::Delete { path, key } => self.delete(path, key).map(|_| ()),
            StoreOp::Insert { path, key, value } => self.insert(path, key, value.clone()),
            StoreOp::Add { path, delta } => self.add(path, *delta),
        }
    }

    fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        if path.is_empty() {
            return Some(&mut self.root);
        }
        path.split('.')
            .try_fold(&mut self.root, |node, segment| {
                node.as_object_mut()?.get_mut(segment)
            })
    }

    /// Walk `segments`, creating empty objects where nothing exists yet
    fn object_at_mut(
        &mut self,
        path: &str,
        segments: &[&str],
    ) -> Result<&mut Map<String, Value>, VariablePathError> {
        let mut node = &mut self.root;
        for segment in segments {
            let map = match node {
                Value::Object(map) => map,
                _ => return Err(VariablePathError::NotAnObject(path.to_string())),
            };
            node = map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if node.is_null() {
                *node = Value::Object(Map::new());
            }
        }
        match node {
            Value::Object(map) => Ok(map),
            _ => Err(VariablePathError::NotAnObject(path.to_string())),
        }
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, VariablePathError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(VariablePathError::EmptySegment(path.to_string()));
    }
    Ok(segments)
}
