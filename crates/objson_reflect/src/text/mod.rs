//! JSON text encoding and decoding on top of [`serde_json`].
//!
//! Encoding flattens first, so anything implementing [`Flatten`] can be
//! written out. Timestamps become ISO-8601 strings including the offset.
//! Decoding without a class yields a plain [`Value`] in which timestamps
//! stay strings; decoding into a class goes through [`hydrate`].
//!
//! Empty text and null values map onto each other: `None` encodes to `""`,
//! and `""` decodes to [`Value::Null`].

// -----------------------------------------------------------------------------
// Modules

mod ascii;
mod error;
mod options;

// -----------------------------------------------------------------------------
// Exports

pub use error::TextError;
pub use options::TextOptions;

// -----------------------------------------------------------------------------
// Text

use alloc::string::String;
use alloc::vec::Vec;
use std::io;

use serde_core::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::flatten::Flatten;
use crate::hydrate::{HydrateError, hydrate};
use crate::reflect::Dynamic;
use crate::registry::ClassMeta;
use crate::value::Value;

use ascii::AsciiFormatter;

const INDENT: &[u8] = b"  ";

/// Flattens `value` and writes it as JSON text.
///
/// A value flattening to [`Value::Null`] is written as the empty string.
///
/// # Examples
///
/// ```
/// use objson_reflect::text::{TextOptions, to_text};
///
/// let names = vec!["Kunikida Hanamaru", "Tsushima Yoshiko"];
/// assert_eq!(
///     to_text(&names, &TextOptions::new()).unwrap(),
///     r#"["Kunikida Hanamaru","Tsushima Yoshiko"]"#,
/// );
///
/// assert_eq!(to_text(&"黒澤", &TextOptions::new()).unwrap(), r#""\u9ed2\u6fa4""#);
/// assert_eq!(to_text(&None::<i32>, &TextOptions::new()).unwrap(), "");
/// ```
pub fn to_text<T: Flatten + ?Sized>(value: &T, options: &TextOptions) -> Result<String, TextError> {
    let structure = value.flatten();
    if structure.is_null() {
        return Ok(String::new());
    }
    encode(&structure, options)
}

/// Writes an already flattened structure as JSON text.
///
/// Unlike [`to_text`], [`Value::Null`] is written as `null`.
pub fn encode(structure: &Value, options: &TextOptions) -> Result<String, TextError> {
    let mut buffer = Vec::with_capacity(128);
    match (options.pretty, options.ascii_only) {
        (false, false) => write(&mut buffer, CompactFormatter, structure)?,
        (false, true) => write(&mut buffer, AsciiFormatter::new(CompactFormatter), structure)?,
        (true, false) => write(&mut buffer, PrettyFormatter::with_indent(INDENT), structure)?,
        (true, true) => write(
            &mut buffer,
            AsciiFormatter::new(PrettyFormatter::with_indent(INDENT)),
            structure,
        )?,
    }
    // serde_json only writes UTF-8; a failure here is reported as an encoding error.
    String::from_utf8(buffer).map_err(|error| {
        TextError::Encode(serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, error)))
    })
}

fn write<F: Formatter>(buffer: &mut Vec<u8>, formatter: F, structure: &Value) -> Result<(), TextError> {
    let mut serializer = serde_json::Serializer::with_formatter(buffer, formatter);
    structure.serialize(&mut serializer).map_err(TextError::Encode)
}

/// Parses JSON text into a [`Value`]. Empty text yields [`Value::Null`].
///
/// Strings are never interpreted, including ones that look like timestamps.
pub fn parse_text(text: &str) -> Result<Value, TextError> {
    if text.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(TextError::MalformedText)
}

/// Parses JSON text and hydrates it into `class`.
///
/// A top-level mapping becomes [`Dynamic::Object`], a top-level list becomes
/// a [`Dynamic::List`] with one element per entry (null entries stay
/// [`Dynamic::Raw`]), and empty text or `null` becomes `Dynamic::Raw(Value::Null)`.
///
/// ```
/// use objson_reflect::{Object, from_text, registry::GetClassMeta};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Member {
///     name: String,
/// }
///
/// let members = from_text(r#"[{"name": "Sakurauchi Riko"}, null]"#, &Member::class_meta()).unwrap();
/// let members = members.as_list().unwrap();
///
/// assert_eq!(members[0].downcast_ref::<Member>().unwrap().name, "Sakurauchi Riko");
/// assert!(members[1].is_null());
/// assert!(from_text("", &Member::class_meta()).unwrap().is_null());
/// ```
pub fn from_text(text: &str, class: &ClassMeta) -> Result<Dynamic, TextError> {
    match parse_text(text)? {
        Value::List(items) => items
            .into_iter()
            .map(|item| hydrate_dynamic(item, class))
            .collect::<Result<Vec<_>, _>>()
            .map(Dynamic::List)
            .map_err(TextError::from),
        structure => Ok(hydrate_dynamic(structure, class)?),
    }
}

/// [`from_text`] for optional input.
///
/// Absent text yields null. Without a class the parsed structure is
/// returned raw, as [`parse_text`] does.
pub fn from_optional_text(text: Option<&str>, class: Option<&ClassMeta>) -> Result<Dynamic, TextError> {
    match (text, class) {
        (None, _) => Ok(Dynamic::Raw(Value::Null)),
        (Some(text), None) => parse_text(text).map(Dynamic::Raw),
        (Some(text), Some(class)) => from_text(text, class),
    }
}

fn hydrate_dynamic(structure: Value, class: &ClassMeta) -> Result<Dynamic, HydrateError> {
    Ok(match hydrate(structure, class)? {
        Some(object) => Dynamic::Object(object),
        None => Dynamic::Raw(Value::Null),
    })
}
