//! The C++ backend reads its switches as strings, not JSON booleans.
//! These helpers keep the Rust side as `bool` while writing
//! `"yes"`/`"no"` and `"true"`/`"false"` to `setting.json`.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

/// `true` <-> `"yes"`, `false` <-> `"no"`
pub mod yes_no {
    use super::*;

    pub fn serialize<S>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *flag { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(D::Error::custom(format!(
                "expected \"yes\" or \"no\", found \"{}\"",
                other
            ))),
        }
    }
}

/// `true` <-> `"true"`, `false` <-> `"false"`
pub mod true_false {
    use super::*;

    pub fn serialize<S>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *flag { "true" } else { "false" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!(
                "expected \"true\" or \"false\", found \"{}\"",
                other
            ))),
        }
    }
}
