use alloc::string::String;
use alloc::vec::Vec;

use crate::flatten::flatten_object;
use crate::hydrate::{HydrateError, hydrate_as};
use crate::reflect::Object;
use crate::registry::GetClassMeta;
use crate::text::{TextError, TextOptions, encode, parse_text};
use crate::value::{Mapping, Value};

/// Conversion methods for every class with a [`ClassMeta`].
///
/// Blanket-implemented for all `T: Object + GetClassMeta`, so any
/// `#[derive(Object)]` type gets these methods for free. Behavior is
/// customized through the class's metadata (type hints, factory hook,
/// constructor), not by overriding methods.
///
/// [`ClassMeta`]: crate::registry::ClassMeta
///
/// # Examples
///
/// ```
/// use objson_reflect::{Object, Serializable, text::TextOptions};
///
/// #[derive(Object, Default, Debug, PartialEq)]
/// #[objson(default)]
/// struct Member {
///     name: String,
///     grade: u8,
/// }
///
/// let ruby = Member { name: "Kurosawa Ruby".into(), grade: 1 };
/// let text = ruby.to_text(&TextOptions::default()).unwrap();
/// assert_eq!(text, r#"{"name":"Kurosawa Ruby","grade":1}"#);
///
/// let back = Member::from_text(&text).unwrap().unwrap();
/// assert_eq!(back, ruby);
/// ```
pub trait Serializable: Object + GetClassMeta {
    /// Flattens `self` into a [`Value::Map`].
    #[inline]
    fn to_structure(&self) -> Value {
        flatten_object(self)
    }

    #[inline]
    fn to_text(&self, options: &TextOptions) -> Result<String, TextError> {
        encode(&self.to_structure(), options)
    }

    /// Hydrates an instance; [`Value::Null`] yields `None`.
    #[inline]
    fn from_structure(structure: Value) -> Result<Option<Self>, HydrateError> {
        hydrate_as::<Self>(structure)
    }

    /// Hydrates every element of a top-level list.
    ///
    /// Null elements yield `None`, and a null structure yields an empty list.
    fn from_structure_list(structure: Value) -> Result<Vec<Option<Self>>, HydrateError> {
        match structure {
            Value::Null => Ok(Vec::new()),
            Value::List(items) => items.into_iter().map(Self::from_structure).collect(),
            other => Err(HydrateError::incompatible("list", other.kind())),
        }
    }

    /// Hydrates the values of a mapping, keeping its keys.
    fn from_structure_map(mapping: Mapping) -> Result<Mapping<Option<Self>>, HydrateError> {
        mapping
            .into_iter()
            .map(|(key, structure)| Self::from_structure(structure).map(|value| (key, value)))
            .collect()
    }

    /// Parses and hydrates an instance. Empty text yields `None`.
    #[inline]
    fn from_text(text: &str) -> Result<Option<Self>, TextError> {
        Ok(Self::from_structure(parse_text(text)?)?)
    }

    /// Parses and hydrates a top-level list. Empty text yields an empty list.
    #[inline]
    fn from_text_list(text: &str) -> Result<Vec<Option<Self>>, TextError> {
        Ok(Self::from_structure_list(parse_text(text)?)?)
    }
}

impl<T: Object + GetClassMeta> Serializable for T {}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

    use crate::hydrate::HydrateError;
    use crate::reflect::Dynamic;
    use crate::{Object, Serializable};
    use crate::text::TextOptions;
    use crate::value::{Mapping, Value};

    // A class covering every kind of attribute the engine handles.
    #[derive(Object, Default)]
    #[objson(default)]
    struct PlainClass {
        strvalue: Option<String>,
        intvalue: Option<i64>,
        dtvalue: Option<DateTime<FixedOffset>>,
        naivevalue: Option<NaiveDateTime>,
        listvalue: Vec<Dynamic>,
        dictvalue: Value,
        #[objson(hint = PlainClass)]
        objvalue: Option<Box<PlainClass>>,
        #[objson(hint = PlainClass)]
        objlistvalue: Vec<PlainClass>,
    }

    // Exposes a private backing field through a property.
    #[derive(Object, Default)]
    #[objson(default, property(get = foo, set = set_foo))]
    struct PropertyClass {
        _foo: Option<String>,
        bar: Option<String>,
    }

    impl PropertyClass {
        fn foo(&self) -> Option<&str> {
            self._foo.as_deref()
        }

        fn set_foo(&mut self, value: Option<String>) {
            self._foo = value;
        }
    }

    // Builds itself from the `foo` key; `bar` is assigned afterwards.
    #[derive(Object)]
    #[objson(factory = FactoryClass::create)]
    struct FactoryClass {
        foo: String,
        bar: Option<String>,
        created_by_factory: bool,
    }

    impl FactoryClass {
        fn create(mapping: &mut Mapping) -> Result<Self, HydrateError> {
            Ok(Self {
                foo: mapping.take("foo")?,
                bar: None,
                created_by_factory: true,
            })
        }
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct Location {
        name: String,
        prefecture: String,
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct Idol {
        name: String,
        birthday: Option<NaiveDateTime>,
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct IdolGroup {
        name: String,
        #[objson(hint = Location)]
        location: Option<Location>,
        #[objson(hint = Idol)]
        members: Vec<Idol>,
    }

    fn jst_datetime() -> DateTime<FixedOffset> {
        NaiveDate::from_ymd_opt(2019, 8, 11)
            .unwrap()
            .and_hms_opt(6, 10, 24)
            .unwrap()
            .and_local_timezone(FixedOffset::east_opt(9 * 3600).unwrap())
            .unwrap()
    }

    fn sample() -> PlainClass {
        let mut dict = Mapping::new();
        dict.insert("key1", Value::from("value1"));
        dict.insert("key2", Value::from(2));

        PlainClass {
            strvalue: Some("str".into()),
            intvalue: Some(1),
            dtvalue: Some(jst_datetime()),
            naivevalue: Some(jst_datetime().naive_local()),
            listvalue: vec![
                Dynamic::raw("a"),
                Dynamic::raw(1),
                Dynamic::object(PlainClass {
                    strvalue: Some("child".into()),
                    ..PlainClass::default()
                }),
            ],
            dictvalue: Value::Map(dict),
            objvalue: Some(Box::new(PlainClass {
                strvalue: Some("child".into()),
                ..PlainClass::default()
            })),
            objlistvalue: vec![
                PlainClass {
                    intvalue: Some(10),
                    ..PlainClass::default()
                },
                PlainClass {
                    intvalue: Some(20),
                    ..PlainClass::default()
                },
            ],
        }
    }

    #[test]
    fn structure_round_trip() {
        let structure = sample().to_structure();

        assert_eq!(structure["strvalue"], "str");
        assert_eq!(structure["objvalue"]["strvalue"], "child");
        assert!(structure["objvalue"]["objvalue"].is_null());
        assert_eq!(structure["objlistvalue"][1]["intvalue"], 20);

        let restored = PlainClass::from_structure(structure.clone()).unwrap().unwrap();
        assert_eq!(restored.to_structure(), structure);
        assert_eq!(restored.objvalue.as_ref().unwrap().strvalue.as_deref(), Some("child"));
        assert_eq!(restored.objlistvalue[0].intvalue, Some(10));

        // `listvalue` has no hint: the nested object comes back as a plain mapping.
        let nested = restored.listvalue[2].as_raw().unwrap();
        assert!(nested.as_map().is_some());
        assert_eq!(nested["strvalue"], "child");
        assert!(restored.listvalue[2].as_object().is_none());
    }

    #[test]
    fn text_round_trip_restores_timestamps() {
        let text = sample().to_text(&TextOptions::default()).unwrap();
        assert!(text.contains(r#""dtvalue":"2019-08-11T06:10:24.000000+09:00""#));
        assert!(text.contains(r#""naivevalue":"2019-08-11T06:10:24.000000""#));

        let restored = PlainClass::from_text(&text).unwrap().unwrap();
        assert_eq!(restored.dtvalue, Some(jst_datetime()));
        assert_eq!(restored.naivevalue, Some(jst_datetime().naive_local()));
        assert_eq!(restored.dictvalue["key2"], 2);
        assert_eq!(restored.listvalue[0].as_raw().unwrap(), "a");
        assert_eq!(restored.listvalue[2].as_raw().unwrap()["strvalue"], "child");
        assert_eq!(restored.to_text(&TextOptions::default()).unwrap(), text);
    }

    #[test]
    fn property_surfacing() {
        let object = PropertyClass {
            _foo: Some("foo_value".into()),
            bar: Some("bar_value".into()),
        };
        assert_eq!(
            object.to_text(&TextOptions::default()).unwrap(),
            r#"{"bar":"bar_value","foo":"foo_value"}"#
        );

        let restored = PropertyClass::from_text(r#"{"foo":"foo_value","bar":"bar_value"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(restored._foo.as_deref(), Some("foo_value"));
        assert_eq!(restored.bar.as_deref(), Some("bar_value"));
    }

    #[test]
    fn factory_precedence() {
        let restored = FactoryClass::from_text(r#"{"foo":"foo_value","bar":"bar_value"}"#)
            .unwrap()
            .unwrap();
        assert!(restored.created_by_factory);
        assert_eq!(restored.foo, "foo_value");
        assert_eq!(restored.bar.as_deref(), Some("bar_value"));

        let err = FactoryClass::from_text(r#"{"bar":"bar_value"}"#).err().unwrap();
        assert_eq!(format!("{err}"), "expected string, found null");
    }

    #[test]
    fn idol_group_round_trip() {
        let birthday = |month, day| {
            NaiveDate::from_ymd_opt(2001, month, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
        };
        let group = IdolGroup {
            name: "Aqours".into(),
            location: Some(Location {
                name: "Uranohoshi Girls' High School".into(),
                prefecture: "Shizuoka".into(),
            }),
            members: vec![
                Idol {
                    name: "Takami Chika".into(),
                    birthday: birthday(8, 1),
                },
                Idol {
                    name: "Sakurauchi Riko".into(),
                    birthday: birthday(9, 19),
                },
                Idol {
                    name: "Matsuura Kanan".into(),
                    birthday: birthday(2, 10),
                },
            ],
        };

        let text = group.to_text(&TextOptions::default()).unwrap();
        let restored = IdolGroup::from_text(&text).unwrap().unwrap();

        assert_eq!(restored.name, "Aqours");
        assert_eq!(restored.location.as_ref().unwrap().prefecture, "Shizuoka");
        assert_eq!(restored.members.len(), 3);
        assert_eq!(restored.members[2].name, group.members[2].name);
        assert_eq!(restored.members[2].birthday, birthday(2, 10));
        assert_eq!(restored.to_text(&TextOptions::default()).unwrap(), text);
    }

    #[test]
    fn top_level_lists_and_maps() {
        let list = PlainClass::from_text_list(r#"[{"intvalue": 1}, null, {"intvalue": 3}]"#).unwrap();
        let values: Vec<_> = list.iter().map(|item| item.as_ref().map(|p| p.intvalue)).collect();
        assert_eq!(values, [Some(Some(1)), None, Some(Some(3))]);

        assert!(PlainClass::from_text_list("").unwrap().is_empty());
        assert!(PlainClass::from_text("").unwrap().is_none());
        assert!(PlainClass::from_text_list(r#"{"intvalue": 1}"#).is_err());

        let mut mapping = Mapping::new();
        mapping.insert("first", serde_json::from_str(r#"{"strvalue": "one"}"#).unwrap());
        mapping.insert("missing", Value::Null);
        let restored = PlainClass::from_structure_map(mapping).unwrap();

        assert_eq!(restored.keys().collect::<Vec<_>>(), ["first", "missing"]);
        assert_eq!(restored["first"].as_ref().unwrap().strvalue.as_deref(), Some("one"));
        assert!(restored["missing"].is_none());
    }
}
