//! # Recipes
//!
//! A [`Recipe`] is the set of operations (with positional arguments) that turns an
//! original asset into one derived variant. Operations are keyed by name and kept
//! in byte order, so two recipes built in a different order are the same recipe.
//! Argument order is significant and preserved as given.
//!
//! Names and string arguments are checked on insertion: they end up inside a
//! filename (see [`crate::canonical`]) and must not contain path separators or the
//! canonical delimiters.

use crate::canonical::{self, RESERVED_CHARS};
use crate::error::{MediaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A single scalar operation argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Arg {
    /// Parse the string form produced by [`fmt::Display`] back into a typed scalar.
    ///
    /// Numbers are only recognized in the exact form `Display` writes them, so
    /// `007`, `1.50` or `1e3` stay strings and render back unchanged.
    pub fn parse_scalar(s: &str) -> Arg {
        if let Ok(n) = s.parse::<i64>() {
            if n.to_string() == s {
                return Arg::Int(n);
            }
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() && f.to_string() == s {
                return Arg::Float(f);
            }
        }
        match s {
            "true" => Arg::Bool(true),
            "false" => Arg::Bool(false),
            _ => Arg::Str(s.to_string()),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Arg::Float(f) if !f.is_finite() => Err(MediaError::InvalidArgument(format!(
                "non-finite float argument: {}",
                f
            ))),
            Arg::Str(s) if s.is_empty() => Err(MediaError::InvalidArgument(
                "empty string argument".to_string(),
            )),
            Arg::Str(s) if s.contains(RESERVED_CHARS) => Err(MediaError::InvalidArgument(
                format!("argument '{}' contains a reserved character", s),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Float(x) => write!(f, "{}", x),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Str(s) => f.write_str(s),
        }
    }
}

impl TryFrom<Value> for Arg {
    type Error = MediaError;

    fn try_from(value: Value) -> Result<Self> {
        let arg = match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Arg::Int(i),
                None => Arg::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::Bool(b) => Arg::Bool(b),
            Value::String(s) => Arg::Str(s),
            other => {
                return Err(MediaError::InvalidArgument(format!(
                    "argument must be a scalar, got {}",
                    other
                )))
            }
        };
        arg.validate()?;
        Ok(arg)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Int(n.into())
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Arg::Int(n.into())
    }
}

impl From<f64> for Arg {
    fn from(x: f64) -> Self {
        Arg::Float(x)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

/// Operation name -> ordered argument list, ordered by operation name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<Arg>>",
    into = "BTreeMap<String, Vec<Arg>>"
)]
pub struct Recipe {
    ops: BTreeMap<String, Vec<Arg>>,
}

impl Recipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Recipe::insert`].
    pub fn with<I, A>(mut self, operation: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.insert(operation, args.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    /// Set the arguments for `operation`, replacing any previous entry for it.
    pub fn insert(&mut self, operation: &str, args: Vec<Arg>) -> Result<()> {
        validate_operation_name(operation)?;
        for arg in &args {
            arg.validate()?;
        }
        self.ops.insert(operation.to_string(), args);
        Ok(())
    }

    /// Overlay every operation of `other` onto this recipe.
    pub fn merge(&mut self, other: &Recipe) {
        for (op, args) in &other.ops {
            self.ops.insert(op.clone(), args.clone());
        }
    }

    pub fn get(&self, operation: &str) -> Option<&[Arg]> {
        self.ops.get(operation).map(Vec::as_slice)
    }

    pub fn remove(&mut self, operation: &str) -> Option<Vec<Arg>> {
        self.ops.remove(operation)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Operations in canonical (byte-wise name) order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &[Arg])> {
        self.ops.iter().map(|(op, args)| (op.as_str(), args.as_slice()))
    }

    /// The filename-safe canonical form, see [`canonical::canonicalize`].
    pub fn canonical(&self) -> String {
        canonical::canonicalize(self)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl TryFrom<BTreeMap<String, Vec<Arg>>> for Recipe {
    type Error = MediaError;

    fn try_from(ops: BTreeMap<String, Vec<Arg>>) -> Result<Self> {
        let mut recipe = Recipe::new();
        for (op, args) in ops {
            recipe.insert(&op, args)?;
        }
        Ok(recipe)
    }
}

impl From<Recipe> for BTreeMap<String, Vec<Arg>> {
    fn from(recipe: Recipe) -> Self {
        recipe.ops
    }
}

impl TryFrom<Value> for Recipe {
    type Error = MediaError;

    /// Accepts a JSON object of `operation -> [args...]`.
    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(MediaError::InvalidArgument(
                "recipe must be a JSON object".to_string(),
            ));
        };
        let mut recipe = Recipe::new();
        for (op, args) in map {
            let Value::Array(items) = args else {
                return Err(MediaError::InvalidArgument(format!(
                    "arguments of '{}' must be a JSON array",
                    op
                )));
            };
            let args = items
                .into_iter()
                .map(Arg::try_from)
                .collect::<Result<Vec<_>>>()?;
            recipe.insert(&op, args)?;
        }
        Ok(recipe)
    }
}

fn validate_operation_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MediaError::InvalidArgument(
            "operation name cannot be empty".to_string(),
        ));
    }
    if name.contains(RESERVED_CHARS) {
        return Err(MediaError::InvalidArgument(format!(
            "operation name '{}' contains a reserved character",
            name
        )));
    }
    Ok(())
}
