//! Parsing of `#[derive(Object)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod object_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, PropertyAttribute, TypeAttributes};

pub(crate) use object_struct::{ObjectField, ObjectStruct};
