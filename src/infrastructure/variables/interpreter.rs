//! Reference command-script interpreter
//!
//! Accepts the directive form produced by the sync service's script
//! renderer. Blank lines and `//` comments are skipped. A script either
//! applies completely to a copy of the snapshot or is rejected.

use serde_json::Value;
use tracing::warn;

use crate::domain::value_objects::{StoreOp, VariableTree};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptParseError {
    #[error("line {line}: expected `_.<op>(...);`")]
    Malformed { line: usize },
    #[error("line {line}: unknown directive `{name}`")]
    UnknownDirective { line: usize, name: String },
    #[error("line {line}: invalid arguments: {reason}")]
    Arguments { line: usize, reason: String },
}

pub fn parse_script(script: &str) -> Result<Vec<StoreOp>, ScriptParseError> {
    let mut ops = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        ops.push(parse_directive(index + 1, line)?);
    }
    Ok(ops)
}

/// Run `script` against `snapshot`; `None` when it fails to parse or apply
pub fn execute_script(script: &str, snapshot: &Value) -> Option<Value> {
    let ops = match parse_script(script) {
        Ok(ops) => ops,
        Err(e) => {
            warn!(error = %e, "Rejecting command script");
            return None;
        }
    };

    let mut tree = VariableTree::new(snapshot.clone());
    for (index, op) in ops.iter().enumerate() {
        if let Err(e) = tree.apply(op) {
            warn!(error = %e, directive = index, "Command script failed during execution");
            return None;
        }
    }
    Some(tree.into_inner())
}

fn parse_directive(line_no: usize, line: &str) -> Result<StoreOp, ScriptParseError> {
    let malformed = || ScriptParseError::Malformed { line: line_no };

    let body = line
        .strip_prefix("_.")
        .and_then(|rest| rest.strip_suffix(';'))
        .map(str::trim_end)
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (name, args) = body.split_once('(').ok_or_else(malformed)?;

    let args: Vec<Value> = serde_json::from_str(&format!("[{}]", args)).map_err(|e| {
        ScriptParseError::Arguments {
            line: line_no,
            reason: e.to_string(),
        }
    })?;
    let bad_args = |reason: &str| ScriptParseError::Arguments {
        line: line_no,
        reason: reason.to_string(),
    };

    match (name.trim(), args.as_slice()) {
        ("set", [Value::String(path), value]) => Ok(StoreOp::set(path.clone(), value.clone())),
        ("delete", [Value::String(path), Value::String(key)]) => {
            Ok(StoreOp::delete(path.clone(), key.clone()))
        }
        ("insert", [Value::String(path), Value::String(key), value]) => {
            Ok(StoreOp::insert(path.clone(), key.clone(), value.clone()))
        }
        ("add", [Value::String(path), Value::Number(delta)]) => {
            let delta = delta
                .as_i64()
                .ok_or_else(|| bad_args("add expects an integer delta"))?;
            Ok(StoreOp::add(path.clone(), delta))
        }
        ("set" | "delete" | "insert" | "add", _) => {
            Err(bad_args("wrong number or type of arguments"))
        }
        (other, _) => Err(ScriptParseError::UnknownDirective {
            line: line_no,
            name: other.to_string(),
        }),
    }
}
