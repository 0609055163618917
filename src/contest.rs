//! Normalized contest entry metadata.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cabrillo::headers::HeaderTable;

static OPERATOR_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*|\s+").expect("operator separator regex"));

/// Entry category as declared in the `CATEGORY-*` headers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestCategory {
    /// `CATEGORY-ASSISTED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assisted: Option<String>,
    /// `CATEGORY-BAND`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    /// `CATEGORY-MODE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// `CATEGORY-OPERATOR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// `CATEGORY-OVERLAY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
    /// `CATEGORY-POWER`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    /// `CATEGORY-STATION`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// `CATEGORY-TIME`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// `CATEGORY-TRANSMITTER`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmitter: Option<String>,
}

impl ContestCategory {
    /// True when no category header was present.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Contest entry metadata. Absent headers stay absent.
///
/// Category flags are nested under `category` rather than set as flat
/// `categoryAssisted`, `categoryBand`, ... keys; `category` itself is omitted
/// from the JSON when no `CATEGORY-*` header was present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestReference {
    /// Contest identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest: Option<String>,
    /// Entrant call sign (`CALLSIGN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
    /// Club name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    /// Operator call signs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<String>>,
    /// Entrant location (ARRL section, state, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Maidenhead locator (`GRID-LOCATOR`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    /// Claimed score, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_score: Option<String>,
    /// Entrant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Entrant email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Logging software (`CREATED-BY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Entry category.
    #[serde(default, skip_serializing_if = "ContestCategory::is_empty")]
    pub category: ContestCategory,
}

impl ContestReference {
    /// Builds the reference from collected headers.
    pub fn from_headers(headers: &HeaderTable) -> Self {
        let get = |tag: &str| headers.get_str(tag).map(str::to_string);
        Self {
            contest: get("contest"),
            call: get("callsign"),
            club: get("club"),
            operators: headers.get_str("operators").map(split_operators),
            location: get("location"),
            grid: get("gridLocator"),
            claimed_score: get("claimedScore"),
            name: get("name"),
            email: get("email"),
            created_by: get("createdBy"),
            category: ContestCategory {
                assisted: get("categoryAssisted"),
                band: get("categoryBand"),
                mode: get("categoryMode"),
                operator: get("categoryOperator"),
                overlay: get("categoryOverlay"),
                power: get("categoryPower"),
                station: get("categoryStation"),
                time: get("categoryTime"),
                transmitter: get("categoryTransmitter"),
            },
        }
    }
}

/// Splits an `OPERATORS:` value on commas and whitespace.
pub fn split_operators(value: &str) -> Vec<String> {
    OPERATOR_SEPARATOR_REGEX
        .split(value)
        .filter(|op| !op.is_empty())
        .map(str::to_string)
        .collect()
}
