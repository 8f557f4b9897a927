use serde_core::{Serialize, Serializer};

use super::{Mapping, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            // `Display` writes the offset-including form.
            Value::Timestamp(ts) => serializer.collect_str(ts),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl<V: Serialize> Serialize for Mapping<V> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use chrono::{FixedOffset, NaiveDate};

    use crate::timestamp::Timestamp;
    use crate::value::{Mapping, Value};

    #[test]
    fn serialize_keeps_insertion_order() {
        let mut map = Mapping::new();
        map.insert("z", Value::from(1));
        map.insert("a", Value::List(vec![Value::Null, Value::from(true)]));

        let text = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(text, r#"{"z":1,"a":[null,true]}"#);
    }

    #[test]
    fn timestamps_become_strings() {
        let local = NaiveDate::from_ymd_opt(2019, 8, 11)
            .unwrap()
            .and_hms_opt(6, 10, 24)
            .unwrap();
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();

        let aware = Value::Timestamp(Timestamp::with_offset(local, offset));
        let naive = Value::Timestamp(Timestamp::naive(local));

        assert_eq!(
            serde_json::to_string(&aware).unwrap(),
            r#""2019-08-11T06:10:24.000000+09:00""#
        );
        assert_eq!(
            serde_json::to_string(&naive).unwrap(),
            r#""2019-08-11T06:10:24.000000""#
        );
    }
}
