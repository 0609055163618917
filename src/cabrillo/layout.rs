//! Contest exchange layouts and the rule table that selects them.

use crate::types::FieldValue;

use super::headers::HeaderTable;

/// How an exchange token is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Parsed as an integer.
    Numeric,
    /// Kept verbatim.
    Text,
}

/// One exchange field in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name used in the exchange record.
    pub name: &'static str,
    /// Value typing.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Types a raw token according to [`FieldSpec::kind`].
    pub fn value(&self, token: &str) -> FieldValue {
        match self.kind {
            FieldKind::Numeric => FieldValue::number(token),
            FieldKind::Text => FieldValue::text(token),
        }
    }
}

const fn numeric(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Numeric,
    }
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
    }
}

const RST: FieldSpec = text("rst");
const SERIAL: FieldSpec = numeric("serial");
const CHECK: FieldSpec = numeric("check");
const CQ_ZONE: FieldSpec = numeric("cqZone");
const ITU_ZONE: FieldSpec = numeric("ituZone");
const LOCATION: FieldSpec = text("location");
const SECTION: FieldSpec = text("section");
const GRID: FieldSpec = text("grid");
const CATEGORY: FieldSpec = text("category");
const NAME: FieldSpec = text("name");
const SECTION_OR_POWER: FieldSpec = text("sectionOrPower");
const PREC: FieldSpec = text("prec");
const EXCHANGE: FieldSpec = text("exchange");

/// Ordered exchange fields sent by each side of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeLayout {
    fields: &'static [FieldSpec],
}

impl ExchangeLayout {
    /// Fields in on-the-wire order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Number of fields per side.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for a layout with no exchange fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Even-length layouts carry a trailing transmitter id.
    pub fn has_transmitter(&self) -> bool {
        self.fields.len() % 2 == 0
    }

    /// Minimum tokens for a QSO line: freq, mode, date, time, then call and
    /// exchange for each side.
    pub fn min_tokens(&self) -> usize {
        4 + 2 * (1 + self.fields.len())
    }

    /// Field names, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }
}

/// How a rule matches the contest identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestMatch {
    /// Identifier starts with the pattern.
    Prefix(&'static str),
    /// Identifier contains the pattern anywhere.
    Contains(&'static str),
}

impl ContestMatch {
    /// Tests `contest` against this matcher.
    pub fn matches(&self, contest: &str) -> bool {
        match self {
            Self::Prefix(p) => contest.starts_with(p),
            Self::Contains(p) => contest.contains(p),
        }
    }
}

/// One row of [`LAYOUT_RULES`]: any matcher selects the layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRule {
    /// Alternatives, any of which selects this rule.
    pub matchers: &'static [ContestMatch],
    /// Resulting layout.
    pub layout: ExchangeLayout,
}

impl LayoutRule {
    /// True when any matcher accepts `contest`.
    pub fn matches(&self, contest: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(contest))
    }
}

const fn rule(matchers: &'static [ContestMatch], fields: &'static [FieldSpec]) -> LayoutRule {
    LayoutRule {
        matchers,
        layout: ExchangeLayout { fields },
    }
}

use ContestMatch::{Contains, Prefix};

/// Ordered, first-match-wins contest rules.
pub const LAYOUT_RULES: &[LayoutRule] = &[
    rule(
        &[
            Prefix("CQ-WPX-"),
            Contains("DARC-WAEDC-"),
            Contains("RSGB-AFS-"),
            Contains("RSGB-NFD"),
            Contains("RSGB-SSB"),
            Contains("RSGB-80"),
        ],
        &[RST, SERIAL],
    ),
    rule(
        &[
            Prefix("RSGB-160-"),
            Contains("RSGB-COMM"),
            Contains("RSGB-IOTA"),
            Contains("RSGB-LOW"),
        ],
        &[RST, SERIAL, LOCATION],
    ),
    rule(&[Prefix("ARRL-FD-")], &[CATEGORY, SECTION]),
    rule(&[Prefix("NAQP-")], &[NAME, LOCATION]),
    rule(&[Contains("QSO-PARTY")], &[RST, LOCATION]),
    rule(&[Prefix("CQ-VHF-")], &[RST, GRID]),
    rule(&[Prefix("ARRL-DX-")], &[RST, SECTION_OR_POWER]),
    rule(&[Prefix("ARRL-160-")], &[RST, SECTION]),
    rule(&[Prefix("ARRL-VHF-")], &[GRID]),
    rule(&[Prefix("ARRL-SS-")], &[SERIAL, PREC, CHECK, SECTION]),
    rule(&[Prefix("CQ-WW-")], &[RST, CQ_ZONE]),
    rule(&[Prefix("IARU-HF")], &[RST, ITU_ZONE]),
];

/// Layout used when no rule matches.
pub const DEFAULT_LAYOUT: ExchangeLayout = ExchangeLayout {
    fields: &[RST, EXCHANGE],
};

/// Contest identifier assumed when the `CONTEST:` header is missing.
pub const UNKNOWN_CONTEST: &str = "unknown";

/// Picks the layout for a contest identifier.
pub fn layout_for_contest(contest: &str) -> ExchangeLayout {
    LAYOUT_RULES
        .iter()
        .find(|rule| rule.matches(contest))
        .map(|rule| rule.layout)
        .unwrap_or(DEFAULT_LAYOUT)
}

/// Picks the layout from the `contest` header of `headers`.
pub fn select_layout(headers: &HeaderTable) -> ExchangeLayout {
    let contest = headers.get_str("contest").unwrap_or(UNKNOWN_CONTEST);
    let layout = layout_for_contest(contest);
    tracing::debug!(contest, fields = ?layout.names().collect::<Vec<_>>(), "selected exchange layout");
    layout
}
