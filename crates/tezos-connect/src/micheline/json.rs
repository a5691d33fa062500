//! Micheline JSON codec

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{Entrypoint, Error, Expr, OpCode, Parameters};
use crate::types::BigInt;

impl Expr {
    /// Parse the Micheline JSON form
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Array(items) => Ok(Expr::Seq(
                items.iter().map(Expr::from_json).collect::<Result<_, _>>()?,
            )),
            Value::Object(object) => expr_from_object(object),
            other => Err(Error::Invalid(format!(
                "expected an object or an array, found `{}`",
                other
            ))),
        }
    }

    /// Render the Micheline JSON form
    pub fn to_json(&self) -> Value {
        match self {
            Expr::Int(int) => serde_json::json!({ "int": int.to_string() }),
            Expr::String(s) => serde_json::json!({ "string": s }),
            Expr::Bytes(bytes) => serde_json::json!({ "bytes": hex::encode(bytes) }),
            Expr::Seq(items) => Value::Array(items.iter().map(Expr::to_json).collect()),
            Expr::Prim { op, args, annots } => {
                let mut object = Map::new();
                object.insert("prim".to_string(), Value::String(op.name().to_string()));
                if !args.is_empty() {
                    object.insert(
                        "args".to_string(),
                        Value::Array(args.iter().map(Expr::to_json).collect()),
                    );
                }
                if !annots.is_empty() {
                    object.insert(
                        "annots".to_string(),
                        Value::Array(annots.iter().cloned().map(Value::String).collect()),
                    );
                }
                Value::Object(object)
            }
        }
    }
}

fn expr_from_object(object: &Map<String, Value>) -> Result<Expr, Error> {
    if let Some(int) = object.get("int") {
        let text = int
            .as_str()
            .ok_or_else(|| Error::Invalid("`int` must be a string".to_string()))?;
        let int = BigInt::from_str(text).map_err(|err| Error::Invalid(err.to_string()))?;
        return Ok(Expr::Int(int));
    }

    if let Some(s) = object.get("string") {
        let s = s
            .as_str()
            .ok_or_else(|| Error::Invalid("`string` must be a string".to_string()))?;
        return Ok(Expr::String(s.to_string()));
    }

    if let Some(bytes) = object.get("bytes") {
        let text = bytes
            .as_str()
            .ok_or_else(|| Error::Invalid("`bytes` must be a string".to_string()))?;
        let bytes = hex::decode(text)
            .map_err(|err| Error::Invalid(format!("`bytes` is not hex: {}", err)))?;
        return Ok(Expr::Bytes(bytes));
    }

    if let Some(prim) = object.get("prim") {
        let name = prim
            .as_str()
            .ok_or_else(|| Error::Invalid("`prim` must be a string".to_string()))?;
        let op = OpCode::from_name(name).ok_or_else(|| Error::UnknownPrimitive(name.to_string()))?;

        let args = match object.get("args") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                items.iter().map(Expr::from_json).collect::<Result<_, _>>()?
            }
            Some(_) => return Err(Error::Invalid("`args` must be an array".to_string())),
        };

        let annots = match object.get("annots") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| Error::Invalid("annotations must be strings".to_string()))
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(Error::Invalid("`annots` must be an array".to_string())),
        };

        return Ok(Expr::Prim { op, args, annots });
    }

    Err(Error::Invalid(
        "object has none of `int`, `string`, `bytes` or `prim`".to_string(),
    ))
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Expr::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl Parameters {
    /// Apply one JSON call argument on top of the current parameters
    ///
    /// Three calling conventions are accepted:
    /// * a JSON array replaces the value with a sequence,
    /// * `{"entrypoint": .., "value": ..}` replaces whichever of the two
    ///   fields it carries,
    /// * any other object is a bare value sent to the `default` entrypoint.
    ///   It is only read while no value has been set, afterwards such an
    ///   object leaves the parameters untouched.
    pub fn apply_json(&mut self, text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let json: Value = serde_json::from_str(text)?;
        match &json {
            Value::Null => {}
            Value::Array(_) => {
                self.value = Some(Expr::from_json(&json)?);
            }
            Value::Object(object) => {
                if let Some(entrypoint) = object.get("entrypoint").filter(|e| !e.is_null()) {
                    let name = entrypoint.as_str().ok_or_else(|| {
                        Error::Invalid("`entrypoint` must be a string".to_string())
                    })?;
                    self.entrypoint = Entrypoint::from_name(name)?;
                }
                if let Some(value) = object.get("value").filter(|v| !v.is_null()) {
                    self.value = Some(Expr::from_json(value)?);
                }

                if self.value.is_none() {
                    self.entrypoint = Entrypoint::Default;
                    self.value = Some(Expr::from_json(&json)?);
                }
            }
            other => {
                return Err(Error::Invalid(format!(
                    "expected call parameters, found `{}`",
                    other
                )))
            }
        }

        Ok(())
    }
}
