//! JSON codec for wire records
//!
//! Every record is a JSON object whose `"kind"` field names the concrete
//! node kind, next to an integer `"id"` and the kind's own fields. Nested
//! child records follow the same shape.
//!
//! Decoding never panics on bad input. The raw value is checked for
//! discriminants first so that an unknown or missing kind anywhere in the
//! tree is reported as such, and every remaining shape problem becomes
//! `FormatError::Invalid`. Decoded records get fresh identities.

mod nodes;

pub use nodes::{AssignOp, WireExpr, WireRef, WireType};

use crate::walk::Walkable;
use cfront_common::{FormatError, NodeId};
use log::debug;
use serde_json::Value;

impl<'a> Walkable for WireRef<'a> {
    fn identity(&self) -> NodeId {
        self.id()
    }

    fn children(&self) -> Vec<Self> {
        WireRef::children(*self)
    }
}

pub fn encode(expr: &WireExpr) -> Result<String, FormatError> {
    Ok(serde_json::to_string(expr)?)
}

pub fn encode_pretty(expr: &WireExpr) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(expr)?)
}

pub fn encode_value(expr: &WireExpr) -> Result<Value, FormatError> {
    Ok(serde_json::to_value(expr)?)
}

/// Parse and decode one expression record
pub fn decode(text: &str) -> Result<WireExpr, FormatError> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<WireExpr, FormatError> {
    let kind = match &value {
        Value::Object(fields) => match fields.get("kind") {
            Some(Value::String(kind)) => kind.clone(),
            Some(_) => return Err(FormatError::invalid("record", "'kind' is not a string")),
            None => return Err(FormatError::MissingKind),
        },
        other => {
            return Err(FormatError::NotARecord {
                found: value_type(other).to_string(),
            })
        }
    };
    if !WireExpr::KINDS.contains(&kind.as_str()) {
        return Err(FormatError::unknown_kind(kind));
    }
    check_kinds(&value)?;

    let mut expr: WireExpr =
        serde_json::from_value(value).map_err(|err| FormatError::invalid(kind.as_str(), err.to_string()))?;
    expr.for_each_id_mut(&mut |id: &mut NodeId| *id = NodeId::fresh());
    debug!("decoded {} record {}", expr.kind(), expr.id());
    Ok(expr)
}

/// Reject nested records with a missing or unknown discriminant
fn check_kinds(value: &Value) -> Result<(), FormatError> {
    match value {
        Value::Object(fields) => {
            match fields.get("kind") {
                Some(Value::String(kind)) => {
                    if !is_known_kind(kind) {
                        return Err(FormatError::unknown_kind(kind.as_str()));
                    }
                }
                Some(_) => {}
                None => return Err(FormatError::MissingKind),
            }
            fields.values().try_for_each(check_kinds)
        }
        Value::Array(items) => items.iter().try_for_each(check_kinds),
        _ => Ok(()),
    }
}

fn is_known_kind(kind: &str) -> bool {
    WireExpr::KINDS.contains(&kind) || WireType::KINDS.contains(&kind)
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_is_written_on_encode() {
        let expr = WireExpr::Ident { id: NodeId(4), name: "x".to_string() };
        let value = encode_value(&expr).unwrap();
        assert_eq!(value, json!({"kind": "Ident", "id": 4, "name": "x"}));
    }

    #[test]
    fn test_every_kind_name_matches_serde_tag() {
        let x = Box::new(WireExpr::Ident { id: NodeId(0), name: "x".to_string() });
        let samples = vec![
            *x.clone(),
            WireExpr::BasicLit { id: NodeId(0), value: "1".to_string() },
            WireExpr::BinaryExpr { id: NodeId(0), op: crate::ast::BinaryOp::Add, x: x.clone(), y: x.clone() },
            WireExpr::UnaryExpr { id: NodeId(0), op: crate::ast::UnaryOp::Minus, x: x.clone() },
            WireExpr::ParenExpr { id: NodeId(0), x: x.clone() },
            WireExpr::CallExpr { id: NodeId(0), func: x.clone(), args: vec![] },
            WireExpr::IndexExpr { id: NodeId(0), x: x.clone(), index: x.clone() },
            WireExpr::SelectorExpr { id: NodeId(0), x: x.clone(), sel: "f".to_string(), arrow: false },
            WireExpr::StarExpr { id: NodeId(0), x: x.clone() },
            WireExpr::CastExpr {
                id: NodeId(0),
                op: AssignOp::Eq,
                ty: WireType::NamedType { id: NodeId(0), name: "int".to_string() },
                expr: x,
            },
        ];
        assert_eq!(samples.len(), WireExpr::KINDS.len());
        for sample in samples {
            let value = encode_value(&sample).unwrap();
            assert_eq!(value["kind"], json!(sample.kind()));
            assert!(WireExpr::KINDS.contains(&sample.kind()));
        }
    }

    #[test]
    fn test_decode_assigns_fresh_ids() {
        let text = r#"{"kind":"StarExpr","id":7,"x":{"kind":"Ident","id":7,"name":"p"}}"#;
        let expr = decode(text).unwrap();
        let child = expr.children()[0];
        assert_ne!(expr.id(), child.id());
    }

    #[test]
    fn test_nested_unknown_kind() {
        let text = r#"{"kind":"ParenExpr","x":{"kind":"Mystery"}}"#;
        assert_eq!(decode(text).unwrap_err(), FormatError::unknown_kind("Mystery"));
    }

    #[test]
    fn test_type_record_at_top_level_is_unknown_expression() {
        let text = r#"{"kind":"NamedType","name":"int"}"#;
        assert_eq!(decode(text).unwrap_err(), FormatError::unknown_kind("NamedType"));
    }
}
