pub const READABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub mod day {
    use core::fmt;

    use chrono::NaiveDate;
    use serde::{
        de::{self, Unexpected, Visitor},
        Deserialize as _, Deserializer, Serializer,
    };

    use super::DAY_FORMAT;

    pub fn parse(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).ok()
    }

    pub fn serialize<S>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&day.format(DAY_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DayVisitor;

        impl<'de> Visitor<'de> for DayVisitor {
            type Value = NaiveDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string in the format YYYY-MM-DD")
            }

            fn visit_str<E>(self, value: &str) -> Result<NaiveDate, E>
            where
                E: de::Error,
            {
                parse(value)
                    .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(DayVisitor)
    }

    /// Like `deserialize`, but an absent, empty or blank value yields `None`.
    pub fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) if !s.trim().is_empty() => parse(&s).map(Some).ok_or_else(|| {
                de::Error::invalid_value(Unexpected::Str(&s), &"a date as YYYY-MM-DD")
            }),
            _ => Ok(None),
        }
    }
}

pub mod readable_time {
    use chrono::NaiveDateTime;
    use schemars::gen::SchemaGenerator;
    use schemars::schema::{InstanceType, Schema, SchemaObject};
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::READABLE_TIME_FORMAT;

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(READABLE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, READABLE_TIME_FORMAT).map_err(D::Error::custom)
    }

    pub fn schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("yyyy-mm-dd hh:mm:ss".to_owned()),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct DayQuery {
        #[serde(deserialize_with = "super::day::deserialize_option", default)]
        day: Option<NaiveDate>,
    }

    #[test]
    fn blank_day_is_none() {
        let q: DayQuery = serde_json::from_str(r#"{"day": "  "}"#).unwrap();
        assert!(q.day.is_none());
        let q: DayQuery = serde_json::from_str("{}").unwrap();
        assert!(q.day.is_none());
    }

    #[test]
    fn parses_iso_day() {
        let q: DayQuery = serde_json::from_str(r#"{"day": "2026-01-02"}"#).unwrap();
        assert_eq!(q.day, NaiveDate::from_ymd_opt(2026, 1, 2));
    }

    #[test]
    fn rejects_garbage_day() {
        assert!(serde_json::from_str::<DayQuery>(r#"{"day": "02-01-2026"}"#).is_err());
    }
}
