//! Primitive payloads carried by tokens and value nodes.

use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A primitive literal.
///
/// `Literal::None` is the none-sentinel: the placeholder the runtime uses
/// for "no value supplied".
///
/// Reals compare by bit pattern, except that every `nan` equals every
/// other. `0.0` and `-0.0` differ.
#[derive(Debug, Clone, Default)]
pub enum Literal {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
}

impl Literal {
    /// Returns true for the none-sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Literal::None)
    }

    /// Returns the inner string if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the inner integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Short name of the payload type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::None => "none",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Real(_) => "real",
            Literal::Str(_) => "string",
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::None, Literal::None) => true,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Real(a), Literal::Real(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            (Literal::Str(a), Literal::Str(b)) => a == b,
            _ => false,
        }
    }
}

fn non_finite_name(r: f64) -> &'static str {
    if r.is_nan() {
        "nan"
    } else if r > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

// JSON has no spelling for inf or nan, so those travel as {"real": "inf"}.
impl Serialize for Literal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Literal::None => serializer.serialize_unit(),
            Literal::Bool(b) => serializer.serialize_bool(*b),
            Literal::Int(n) => serializer.serialize_i64(*n),
            Literal::Real(r) if r.is_finite() => serializer.serialize_f64(*r),
            Literal::Real(r) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("real", non_finite_name(*r))?;
                map.end()
            }
            Literal::Str(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LiteralRepr {
    None,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    NonFinite(NonFinite),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NonFinite {
    real: String,
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match LiteralRepr::deserialize(deserializer)? {
            LiteralRepr::None => Literal::None,
            LiteralRepr::Bool(b) => Literal::Bool(b),
            LiteralRepr::Int(n) => Literal::Int(n),
            LiteralRepr::Real(r) => Literal::Real(r),
            LiteralRepr::Str(s) => Literal::Str(s),
            LiteralRepr::NonFinite(NonFinite { real }) => match real.as_str() {
                "inf" => Literal::Real(f64::INFINITY),
                "-inf" => Literal::Real(f64::NEG_INFINITY),
                "nan" => Literal::Real(f64::NAN),
                other => {
                    return Err(D::Error::custom(format!(
                        "expected \"inf\", \"-inf\" or \"nan\", got {other:?}"
                    )));
                }
            },
        })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => f.write_str("none"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Real(r) if !r.is_finite() => f.write_str(non_finite_name(*r)),
            // Debug keeps the fractional part, so 2.0 never prints as 2
            Literal::Real(r) => write!(f, "{r:?}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Real(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}
