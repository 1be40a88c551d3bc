//! Command script rendering
//!
//! Operations are accumulated as typed records and rendered to the
//! interpreter's text form only at submission time, one directive per line:
//!
//! ```text
//! _.set("货币.金币", 0);
//! _.delete("背包", "旧物品");
//! _.insert("背包", "面包", {"数量": 1});
//! _.add("货币.金币", 20);
//! ```
//!
//! Every argument is a JSON literal.

use serde_json::Value;

use crate::domain::value_objects::StoreOp;

#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    ops: Vec<StoreOp>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: StoreOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = StoreOp>) -> &mut Self {
        self.ops.extend(ops);
        self
    }

    pub fn render(&self) -> String {
        render_script(&self.ops)
    }
}

pub fn render_script(ops: &[StoreOp]) -> String {
    ops.iter().map(render_op).collect::<Vec<_>>().join("\n")
}

pub fn render_op(op: &StoreOp) -> String {
    match op {
        StoreOp::Set { path, value } => format!("_.set({}, {});", literal(path), value),
        StoreOp::Delete { path, key } => {
            format!("_.delete({}, {});", literal(path), literal(key))
        }
        StoreOp::Insert { path, key, value } => format!(
            "_.insert({}, {}, {});",
            literal(path),
            literal(key),
            value
        ),
        StoreOp::Add { path, delta } => format!("_.add({}, {});", literal(path), delta),
    }
}

fn literal(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
