//! Composite-schema construction.
//!
//! The pipeline runs leaf-first: each declared parameter is translated into
//! a JSON Schema fragment, a grader's parameter set is adapted into the
//! fragment for its `configuration` field, one conditional rule is composed
//! per registered grader, and the rules are assembled into the fixed
//! step-list envelope.

mod adapter;
mod assembler;
mod composer;
mod translator;
mod wire;

pub use adapter::adapt;
pub use assembler::{assemble, CompositeSchema};
pub use composer::{compose, ConditionalRule};
pub use translator::translate;
pub use wire::{decode_grader_schema, DecodeError, GraderSchema, ParameterDescriptor};
