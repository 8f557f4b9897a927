#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use objson_reflect as reflect;
pub use objson_utils as utils;

pub use objson_reflect::{Serializable, flatten, hydrate, hydrate_as};
pub use objson_reflect::{from_text, parse_text, to_text};
pub use objson_reflect::{format_timestamp, parse_timestamp};
