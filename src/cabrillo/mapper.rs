//! Maps a tokenized QSO line onto the resolved exchange layout.
//!
//! Token order is fixed by the format:
//! `freq mode date time ourCall ourExchange... theirCall theirExchange... [transmitter]`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    band::BandPlan,
    error::QsoLineError,
    qso::{ExchangeFields, ExchangeRecord, Qso},
    types::{FieldValue, Frequency, LineNumber, Mode, QsoNumber},
};

use super::layout::ExchangeLayout;

const FREQ: usize = 0;
const MODE: usize = 1;
const DATE: usize = 2;
const TIME: usize = 3;
const OUR_CALL: usize = 4;

/// Builds [`Qso`] records for one document's layout.
pub struct QsoFieldMapper<'a> {
    layout: ExchangeLayout,
    bands: &'a dyn BandPlan,
}

impl<'a> QsoFieldMapper<'a> {
    /// Creates a mapper bound to a resolved layout.
    pub fn new(layout: ExchangeLayout, bands: &'a dyn BandPlan) -> Self {
        Self { layout, bands }
    }

    /// Layout this mapper was built for.
    pub fn layout(&self) -> ExchangeLayout {
        self.layout
    }

    /// Maps whitespace-separated `tokens` of a QSO line.
    pub fn map(
        &self,
        tokens: &[&str],
        number: QsoNumber,
        line: LineNumber,
    ) -> Result<Qso, QsoLineError> {
        let expected = self.layout.min_tokens();
        if tokens.len() < expected {
            return Err(QsoLineError::Truncated {
                expected,
                found: tokens.len(),
            });
        }

        let (start, start_millis) = parse_start(tokens[DATE], tokens[TIME])?;
        let freq = Frequency::parse(tokens[FREQ]);
        let band = self.bands.band_for(&freq);

        let len = self.layout.len();
        let their_call = OUR_CALL + len + 1;
        let mut our = self.exchange(tokens, OUR_CALL);
        let their = self.exchange(tokens, their_call);

        // A transmitter id only exists past the end of the their-side exchange.
        if self.layout.has_transmitter() && tokens.len() > expected {
            our.transmitter = tokens.last().map(|t| FieldValue::number(t));
        }

        Ok(Qso {
            number,
            line,
            freq,
            band,
            mode: Mode::from_cabrillo(tokens[MODE]),
            start,
            start_millis,
            our,
            their,
        })
    }

    fn exchange(&self, tokens: &[&str], call_at: usize) -> ExchangeRecord {
        let mut fields = ExchangeFields::new();
        for (i, spec) in self.layout.fields().iter().enumerate() {
            fields.insert(spec.name, spec.value(tokens[call_at + 1 + i]));
        }
        ExchangeRecord {
            call: tokens[call_at].to_string(),
            sent: fields.clone(),
            fields,
            transmitter: None,
        }
    }
}

/// Combines a `YYYY-MM-DD` (or `YYYYMMDD`) date and `HHMM` time into a UTC
/// start truncated to the minute.
pub fn parse_start(date: &str, time: &str) -> Result<(String, i64), QsoLineError> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y%m%d"))
        .map_err(|_| QsoLineError::InvalidDate(date.to_string()))?;

    let invalid_time = || QsoLineError::InvalidTime(time.to_string());
    if !matches!(time.len(), 4 | 6) || !time.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_time());
    }
    let hour = time[0..2].parse::<u32>().map_err(|_| invalid_time())?;
    let minute = time[2..4].parse::<u32>().map_err(|_| invalid_time())?;
    let clock = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid_time)?;

    let at = NaiveDateTime::new(day, clock).and_utc();
    Ok((
        at.format("%Y-%m-%dT%H:%M:00Z").to_string(),
        at.timestamp_millis(),
    ))
}
