//! Items referenced by `#[derive(Object)]` expansions.

pub use alloc::boxed::Box;
pub use alloc::vec::Vec;
pub use core::any::type_name;

pub use crate::flatten::{Flatten, flatten_object};
pub use crate::hydrate::{FromDynamic, HydrateError, downcast_object};
pub use crate::reflect::{Dynamic, Object};
pub use crate::registry::{ClassMeta, GetClassMeta, TypeHints};
pub use crate::value::{Mapping, Value};
