//! Single-pass Cabrillo to QSON conversion.

use std::convert::Infallible;

use crate::{
    band::{BandPlan, DefaultBandPlan},
    contest::ContestReference,
    document::{CABRILLO_SOURCE, QsonDocument},
    error::{ParseError, QsoLineError},
    qso::Qso,
    types::{LineNumber, QsoNumber},
};

use super::{
    headers::{CROSS_QSO_TAG, HeaderCollector, HeaderTable, QSO_TAG, to_camel_case},
    layout::select_layout,
    mapper::QsoFieldMapper,
    scanner::LineScanner,
};

/// Parser settings.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Abort on the first rejected QSO line instead of dropping it.
    pub strict: bool,
}

/// Collects mapped QSOs and produces the final document.
#[derive(Debug)]
struct QsonAssembler {
    qsos: Vec<Qso>,
    qsos_other: Vec<Qso>,
    next_number: QsoNumber,
}

impl QsonAssembler {
    fn new() -> Self {
        Self {
            qsos: Vec::new(),
            qsos_other: Vec::new(),
            next_number: 1,
        }
    }

    fn push(&mut self, qso: Qso, cross: bool) {
        self.next_number += 1;
        if cross {
            self.qsos_other.push(qso);
        } else {
            self.qsos.push(qso);
        }
    }

    fn finish(mut self, headers: HeaderTable) -> QsonDocument {
        // Stable: equal start times keep file order.
        self.qsos.sort_by_key(|q| q.start_millis);
        QsonDocument {
            source: CABRILLO_SOURCE.to_string(),
            refs: vec![ContestReference::from_headers(&headers)],
            raw_headers: headers,
            qsos: self.qsos,
            qsos_other: self.qsos_other,
        }
    }
}

/// Cabrillo parser with a pluggable band plan.
#[derive(Debug, Clone, Default)]
pub struct CabrilloParser<B = DefaultBandPlan> {
    options: ParseOptions,
    bands: B,
}

impl CabrilloParser {
    /// Lenient parser with the built-in band plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with the built-in band plan and `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            bands: DefaultBandPlan,
        }
    }
}

impl<B: BandPlan> CabrilloParser<B> {
    /// Parser using a caller-supplied band plan.
    pub fn with_band_plan(options: ParseOptions, bands: B) -> Self {
        Self { options, bands }
    }

    /// Active options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses `text`.
    ///
    /// Rejected QSO lines are dropped with a warning, or abort the parse with
    /// [`ParseError::Line`] when [`ParseOptions::strict`] is set.
    pub fn parse(&self, text: &str) -> Result<QsonDocument, ParseError> {
        let strict = self.options.strict;
        self.run(text, |line, source| {
            if strict {
                Err(ParseError::Line { line, source })
            } else {
                tracing::warn!(line, error = %source, "dropping QSO line");
                Ok(())
            }
        })
    }

    /// Parses `text`, always dropping rejected QSO lines.
    pub fn parse_lenient(&self, text: &str) -> QsonDocument {
        let Ok(doc) = self.run(text, |line, source| {
            tracing::warn!(line, error = %source, "dropping QSO line");
            Ok::<(), Infallible>(())
        });
        doc
    }

    fn run<E>(
        &self,
        text: &str,
        mut on_reject: impl FnMut(LineNumber, QsoLineError) -> Result<(), E>,
    ) -> Result<QsonDocument, E> {
        let mut headers = HeaderCollector::new();
        let mut assembler = QsonAssembler::new();
        // Resolved on the first QSO line from the headers seen so far.
        let mut mapper: Option<QsoFieldMapper<'_>> = None;

        for tagged in LineScanner::new(text) {
            let tag = to_camel_case(&tagged.tag);
            let cross = tag == CROSS_QSO_TAG;
            if tag != QSO_TAG && !cross {
                headers.collect(&tag, &tagged.data);
                continue;
            }

            let mapper = mapper
                .get_or_insert_with(|| QsoFieldMapper::new(select_layout(headers.table()), &self.bands));
            let tokens: Vec<&str> = tagged.data.split_whitespace().collect();
            match mapper.map(&tokens, assembler.next_number, tagged.line) {
                Ok(qso) => assembler.push(qso, cross),
                Err(source) => on_reject(tagged.line, source)?,
            }
        }

        let doc = assembler.finish(headers.into_table());
        tracing::info!(
            qsos = doc.qsos.len(),
            cross_qsos = doc.qsos_other.len(),
            headers = doc.raw_headers.len(),
            "parsed cabrillo log"
        );
        Ok(doc)
    }
}

/// Converts Cabrillo text to a QSON document, dropping unmappable QSO lines.
pub fn cabrillo_to_qson(text: &str) -> QsonDocument {
    CabrilloParser::new().parse_lenient(text)
}
