//! Typed operation registry.
//!
//! Recipes name operations of an external transformation engine. The registry
//! records the signature of each operation the engine supports so a recipe can be
//! checked when it is built, long before anything tries to apply it.

use crate::error::{MediaError, Result};
use crate::recipe::{Arg, Recipe};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    /// Accepts integers as well.
    Float,
    Bool,
    Str,
}

impl ArgKind {
    fn accepts(self, arg: &Arg) -> bool {
        matches!(
            (self, arg),
            (ArgKind::Int, Arg::Int(_))
                | (ArgKind::Float, Arg::Float(_))
                | (ArgKind::Float, Arg::Int(_))
                | (ArgKind::Bool, Arg::Bool(_))
                | (ArgKind::Str, Arg::Str(_))
        )
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArgKind::Int => "int",
            ArgKind::Float => "float",
            ArgKind::Bool => "bool",
            ArgKind::Str => "string",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSignature {
    /// Leading parameters every call must supply.
    pub required: Vec<ArgKind>,
    /// Trailing parameters that may be left off, in order.
    pub optional: Vec<ArgKind>,
}

impl OperationSignature {
    pub fn new(required: &[ArgKind]) -> Self {
        Self {
            required: required.to_vec(),
            optional: Vec::new(),
        }
    }

    pub fn with_optional(mut self, optional: &[ArgKind]) -> Self {
        self.optional = optional.to_vec();
        self
    }

    fn check(&self, operation: &str, args: &[Arg]) -> Result<()> {
        let min = self.required.len();
        let max = min + self.optional.len();
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{}..={}", min, max)
            };
            return Err(MediaError::InvalidArgument(format!(
                "'{}' takes {} argument(s), got {}",
                operation,
                expected,
                args.len()
            )));
        }

        let kinds = self.required.iter().chain(self.optional.iter());
        for (position, (kind, arg)) in kinds.zip(args).enumerate() {
            if !kind.accepts(arg) {
                return Err(MediaError::InvalidArgument(format!(
                    "'{}' argument {} must be {}, got '{}'",
                    operation,
                    position + 1,
                    kind,
                    arg
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    operations: BTreeMap<String, OperationSignature>,
}

static IMAGE_DEFAULTS: Lazy<OperationRegistry> = Lazy::new(|| {
    use ArgKind::*;
    OperationRegistry::new()
        .register("resize", OperationSignature::new(&[Int, Int]))
        .register("fit", OperationSignature::new(&[Int]).with_optional(&[Int, Str]))
        .register("crop", OperationSignature::new(&[Int, Int]).with_optional(&[Int, Int]))
        .register("colorize", OperationSignature::new(&[Int, Int, Int]))
        .register("greyscale", OperationSignature::new(&[]))
        .register("blur", OperationSignature::new(&[]).with_optional(&[Int]))
        .register("rotate", OperationSignature::new(&[Float]).with_optional(&[Str]))
        .register("line", OperationSignature::new(&[Int, Int, Int, Int]))
        .register("brightness", OperationSignature::new(&[Int]))
        .register("contrast", OperationSignature::new(&[Int]))
        .register("flip", OperationSignature::new(&[]).with_optional(&[Str]))
});

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The common image operations (resize, crop, colorize, ...).
    pub fn image_defaults() -> &'static OperationRegistry {
        &IMAGE_DEFAULTS
    }

    pub fn register(mut self, name: &str, signature: OperationSignature) -> Self {
        self.operations.insert(name.to_string(), signature);
        self
    }

    pub fn signature(&self, name: &str) -> Option<&OperationSignature> {
        self.operations.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn validate_operation(&self, operation: &str, args: &[Arg]) -> Result<()> {
        let signature = self.signature(operation).ok_or_else(|| {
            MediaError::InvalidArgument(format!("unknown operation: {}", operation))
        })?;
        signature.check(operation, args)
    }

    pub fn validate(&self, recipe: &Recipe) -> Result<()> {
        for (operation, args) in recipe.operations() {
            self.validate_operation(operation, args)?;
        }
        Ok(())
    }

    pub fn builder(&self) -> RecipeBuilder<'_> {
        RecipeBuilder {
            registry: self,
            recipe: Recipe::new(),
        }
    }
}

/// Builds a [`Recipe`], checking each operation against a registry as it is added.
pub struct RecipeBuilder<'a> {
    registry: &'a OperationRegistry,
    recipe: Recipe,
}

impl RecipeBuilder<'_> {
    pub fn op<I, A>(mut self, operation: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        self.registry.validate_operation(operation, &args)?;
        self.recipe.insert(operation, args)?;
        Ok(self)
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }
}
