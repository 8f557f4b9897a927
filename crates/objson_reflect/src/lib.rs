#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::objson_reflect::...` paths, which must also
// resolve inside this crate's own tests.
extern crate self as objson_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod serializable;

pub mod flatten;
pub mod hydrate;
pub mod reflect;
pub mod registry;
pub mod text;
pub mod timestamp;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use objson_reflect_derive as derive;

#[cfg(feature = "derive")]
pub use objson_reflect_derive::Object;

pub use flatten::{Flatten, flatten, flatten_object};
pub use hydrate::{FromDynamic, HydrateError, hydrate, hydrate_as};
pub use reflect::{Dynamic, Object, public_attributes};
pub use registry::{ClassMeta, GetClassMeta, TypeHints};
pub use serializable::Serializable;
pub use text::{TextError, TextOptions, from_optional_text, from_text, parse_text, to_text};
pub use timestamp::{Timestamp, TimestampError, format_timestamp, parse_timestamp};
pub use value::{Mapping, Value};
