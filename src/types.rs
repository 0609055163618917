//! Shared primitive IDs and QSO value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based order of appearance of a QSO or cross-QSO line.
pub type QsoNumber = u64;
/// 1-based line number in the source text.
pub type LineNumber = u64;
/// Archived document identifier.
pub type DocumentId = u64;

/// Amateur band bucket, serialized by its wavelength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 160 meters.
    #[serde(rename = "160m")]
    B160m,
    /// 80 meters.
    #[serde(rename = "80m")]
    B80m,
    /// 60 meters.
    #[serde(rename = "60m")]
    B60m,
    /// 40 meters.
    #[serde(rename = "40m")]
    B40m,
    /// 30 meters.
    #[serde(rename = "30m")]
    B30m,
    /// 20 meters.
    #[serde(rename = "20m")]
    B20m,
    /// 17 meters.
    #[serde(rename = "17m")]
    B17m,
    /// 15 meters.
    #[serde(rename = "15m")]
    B15m,
    /// 12 meters.
    #[serde(rename = "12m")]
    B12m,
    /// 10 meters.
    #[serde(rename = "10m")]
    B10m,
    /// 6 meters.
    #[serde(rename = "6m")]
    B6m,
    /// 4 meters.
    #[serde(rename = "4m")]
    B4m,
    /// 2 meters.
    #[serde(rename = "2m")]
    B2m,
    /// 1.25 meters (222 MHz).
    #[serde(rename = "1.25m")]
    B125cm,
    /// 70 centimeters.
    #[serde(rename = "70cm")]
    B70cm,
    /// 33 centimeters.
    #[serde(rename = "33cm")]
    B33cm,
    /// 23 centimeters.
    #[serde(rename = "23cm")]
    B23cm,
    /// 13 centimeters.
    #[serde(rename = "13cm")]
    B13cm,
    /// 9 centimeters.
    #[serde(rename = "9cm")]
    B9cm,
    /// 6 centimeters.
    #[serde(rename = "6cm")]
    B6cm,
    /// 3 centimeters.
    #[serde(rename = "3cm")]
    B3cm,
    /// 24 GHz.
    #[serde(rename = "1.25cm")]
    B24G,
    /// 47 GHz.
    #[serde(rename = "6mm")]
    B47G,
    /// 76 GHz.
    #[serde(rename = "4mm")]
    B76G,
    /// 122 GHz.
    #[serde(rename = "2.5mm")]
    B122G,
    /// 134 GHz.
    #[serde(rename = "2mm")]
    B134G,
    /// 241 GHz.
    #[serde(rename = "1mm")]
    B241G,
    /// Optical contacts.
    #[serde(rename = "light")]
    Light,
    /// Anything outside the band plan.
    #[serde(rename = "other")]
    Other,
}

/// Canonical emission mode.
///
/// Serialized as its canonical token (`"CW"`, `"SSB"`, ...). Unknown tokens
/// survive verbatim in [`Mode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Mode {
    /// Continuous wave.
    Cw,
    /// Single side-band phone.
    Ssb,
    /// Radio teletype.
    Rtty,
    /// Frequency modulation phone.
    Fm,
    /// Any other digital mode.
    Digi,
    /// Unrecognized token, kept as written.
    Other(String),
}

impl Mode {
    /// Maps a Cabrillo mode token (`RY`, `CW`, `PH`, `FM`, `DG`).
    ///
    /// Tokens outside the Cabrillo table pass through unchanged.
    pub fn from_cabrillo(token: &str) -> Self {
        match token {
            "RY" => Self::Rtty,
            "CW" => Self::Cw,
            "PH" => Self::Ssb,
            "FM" => Self::Fm,
            "DG" => Self::Digi,
            other => Self::from(other.to_string()),
        }
    }

    /// Canonical token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cw => "CW",
            Self::Ssb => "SSB",
            Self::Rtty => "RTTY",
            Self::Fm => "FM",
            Self::Digi => "DIGI",
            Self::Other(token) => token,
        }
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CW" => Self::Cw,
            "SSB" => Self::Ssb,
            "RTTY" => Self::Rtty,
            "FM" => Self::Fm,
            "DIGI" => Self::Digi,
            _ => Self::Other(value),
        }
    }
}

impl From<Mode> for String {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logged frequency: kHz when the token is all digits, else the raw token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Frequency {
    /// Frequency in kHz.
    Khz(u64),
    /// Band designator such as `SAT`, `1.2G` or `LIGHT`.
    Literal(String),
}

impl Frequency {
    /// Parses a frequency token.
    pub fn parse(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(khz) = token.parse::<u64>() {
                return Self::Khz(khz);
            }
        }
        Self::Literal(token.to_string())
    }

    /// Returns the kHz value when numeric.
    pub fn khz(&self) -> Option<u64> {
        match self {
            Self::Khz(v) => Some(*v),
            Self::Literal(_) => None,
        }
    }
}

/// One typed exchange value.
///
/// [`FieldValue::Invalid`] is the sentinel for a numeric field whose token is
/// not a number; it serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric field value.
    Number(i64),
    /// Text field value.
    Text(String),
    /// Numeric field whose token did not parse.
    Invalid,
}

impl FieldValue {
    /// Parses `token` as an integer, yielding [`FieldValue::Invalid`] on failure.
    pub fn number(token: &str) -> Self {
        token.parse::<i64>().map(Self::Number).unwrap_or(Self::Invalid)
    }

    /// Wraps `token` as text.
    pub fn text(token: &str) -> Self {
        Self::Text(token.to_string())
    }

    /// Integer payload, if any.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// True for the invalid-number sentinel.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}
