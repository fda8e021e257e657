//! Addon records as served by the API.
//!
//! # Design
//! Every field is optional because the upstream omits fields freely, and an
//! absent field means "unknown", which is not the same as an empty string.
//! All values are kept as text. The two main UI entries are served in a
//! slightly different shape (`UiAddon`); it never leaves this crate and is
//! normalized into an `Addon` right after decoding.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Numeric id, as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Condensed description for small areas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_desc: Option<String>,
    /// Username of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Latest uploaded version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
    /// Download link of the `.zip` archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Total download count, as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<String>,
    #[serde(rename = "lastupdate", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Game patch the addon is compatible with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    /// Addon page on the website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_download: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donate_url: Option<String>,
}

/// An integer the UI endpoint sends either as a JSON number or as a string of
/// decimal digits (optional leading `-`). Held in its decimal text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WireNumber(String);

impl WireNumber {
    pub(crate) fn into_string(self) -> String {
        self.0
    }
}

fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireNumberVisitor)
    }
}

struct WireNumberVisitor;

impl<'de> Visitor<'de> for WireNumberVisitor {
    type Value = WireNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string of decimal digits")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<WireNumber, E> {
        Ok(WireNumber(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<WireNumber, E> {
        Ok(WireNumber(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<WireNumber, E> {
        if is_decimal(value) {
            Ok(WireNumber(value.to_string()))
        } else {
            Err(E::invalid_value(Unexpected::Str(value), &self))
        }
    }
}

/// Wire shape of the `ui=tukui` / `ui=elvui` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct UiAddon {
    pub id: Option<WireNumber>,
    pub name: Option<String>,
    pub small_desc: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub screenshot_url: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub downloads: Option<WireNumber>,
    #[serde(rename = "lastupdate")]
    pub last_update: Option<String>,
    pub patch: Option<String>,
    pub web_url: Option<String>,
    #[serde(rename = "lastdownload")]
    pub last_download: Option<String>,
    pub donate_url: Option<String>,
}

impl UiAddon {
    /// Canonicalize into the uniform record. Pure and total.
    pub(crate) fn into_addon(self) -> Addon {
        Addon {
            id: self.id.map(WireNumber::into_string),
            name: self.name,
            small_desc: self.small_desc,
            author: self.author,
            version: self.version,
            screenshot_url: self.screenshot_url,
            url: self.url,
            category: self.category,
            downloads: self.downloads.map(WireNumber::into_string),
            last_update: self.last_update,
            patch: self.patch,
            web_url: self.web_url,
            last_download: self.last_download,
            donate_url: self.donate_url,
        }
    }
}
