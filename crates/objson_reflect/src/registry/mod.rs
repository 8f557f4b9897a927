//! Per-class metadata consulted by hydration.
//!
//! ## Menu
//!
//! - [`ClassMeta`]: Identity of a class plus its construction paths and type hints.
//! - [`GetClassMeta`]: A trait providing the [`ClassMeta`] of a type.
//! - [`TypeHints`]: Which attributes of a class hold nested typed objects.
//! - [`FactoryFn`]: Signature of a factory hook.
//!
//! `#[derive(Object)]` implements [`GetClassMeta`] unless told otherwise
//! with `#[objson(GetClassMeta = false)]`.

// -----------------------------------------------------------------------------
// Modules

mod class_meta;
mod type_hints;

// -----------------------------------------------------------------------------
// Exports

pub use class_meta::{ClassMeta, ConstructorFn, FactoryFn, GetClassMeta};
pub use type_hints::TypeHints;
