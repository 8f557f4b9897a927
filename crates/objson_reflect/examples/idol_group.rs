//! Flattens an idol group, writes it as text, and reads it back.
//!
//! Run with `cargo run -p objson_reflect --example idol_group`.

use chrono::{DateTime, FixedOffset, NaiveDate};
use objson_reflect::{HydrateError, Mapping, Object, Serializable, TextOptions};

#[derive(Object, Default, Debug)]
#[objson(default, property(get = nickname, set = set_nickname))]
struct Member {
    name: String,
    grade: u8,
    _nickname: Option<String>,
}

impl Member {
    fn new(name: &str, grade: u8, nickname: &str) -> Self {
        Self {
            name: name.into(),
            grade,
            _nickname: Some(nickname.into()),
        }
    }

    fn nickname(&self) -> Option<&str> {
        self._nickname.as_deref()
    }

    fn set_nickname(&mut self, nickname: Option<String>) {
        self._nickname = nickname;
    }
}

#[derive(Object, Debug)]
#[objson(factory = Live::create)]
struct Live {
    venue: String,
    opened_at: Option<DateTime<FixedOffset>>,
}

impl Live {
    fn create(mapping: &mut Mapping) -> Result<Self, HydrateError> {
        Ok(Self {
            venue: mapping.take("venue")?,
            opened_at: None,
        })
    }
}

#[derive(Object, Default, Debug)]
#[objson(default)]
struct Group {
    name: String,
    #[objson(hint = Member)]
    members: Vec<Member>,
    #[objson(hint = Live)]
    first_live: Option<Live>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let jst = FixedOffset::east_opt(9 * 3600).ok_or("invalid offset")?;
    let opened_at = NaiveDate::from_ymd_opt(2017, 2, 25)
        .and_then(|date| date.and_hms_opt(17, 0, 0))
        .and_then(|local| local.and_local_timezone(jst).single())
        .ok_or("invalid date")?;

    let group = Group {
        name: "Guilty Kiss".into(),
        members: vec![
            Member::new("Sakurauchi Riko", 2, "Riko-chan"),
            Member::new("Tsushima Yoshiko", 1, "Yohane"),
            Member::new("Ohara Mari", 3, "Mari"),
        ],
        first_live: Some(Live {
            venue: "Yokohama Arena".into(),
            opened_at: Some(opened_at),
        }),
    };

    let text = group.to_text(&TextOptions::new().with_pretty(true))?;
    println!("{text}");

    let restored = Group::from_text(&text)?.ok_or("empty text")?;
    println!("{restored:#?}");

    Ok(())
}
