//! Frequency-to-band lookup.

use crate::types::{Band, Frequency};

/// Resolves a logged [`Frequency`] to its [`Band`].
pub trait BandPlan: Send + Sync {
    /// Returns the band for `freq`, or [`Band::Other`] when it is off-plan.
    fn band_for(&self, freq: &Frequency) -> Band;
}

/// IARU band edges in kHz, inclusive.
const BAND_EDGES_KHZ: &[(u64, u64, Band)] = &[
    (1_800, 2_000, Band::B160m),
    (3_500, 4_000, Band::B80m),
    (5_060, 5_450, Band::B60m),
    (7_000, 7_300, Band::B40m),
    (10_100, 10_150, Band::B30m),
    (14_000, 14_350, Band::B20m),
    (18_068, 18_168, Band::B17m),
    (21_000, 21_450, Band::B15m),
    (24_890, 24_990, Band::B12m),
    (28_000, 29_700, Band::B10m),
    (50_000, 54_000, Band::B6m),
    (69_900, 71_000, Band::B4m),
    (144_000, 148_000, Band::B2m),
    (219_000, 225_000, Band::B125cm),
    (420_000, 450_000, Band::B70cm),
    (902_000, 928_000, Band::B33cm),
    (1_240_000, 1_300_000, Band::B23cm),
    (2_300_000, 2_450_000, Band::B13cm),
    (3_300_000, 3_500_000, Band::B9cm),
    (5_650_000, 5_925_000, Band::B6cm),
    (10_000_000, 10_500_000, Band::B3cm),
    (24_000_000, 24_250_000, Band::B24G),
    (47_000_000, 47_200_000, Band::B47G),
    (75_500_000, 81_000_000, Band::B76G),
    (119_980_000, 123_000_000, Band::B122G),
    (134_000_000, 149_000_000, Band::B134G),
    (241_000_000, 250_000_000, Band::B241G),
];

/// Numeric band designators Cabrillo logs use in place of a frequency above 30 MHz.
const NUMERIC_DESIGNATORS: &[(u64, Band)] = &[
    (50, Band::B6m),
    (70, Band::B4m),
    (144, Band::B2m),
    (222, Band::B125cm),
    (432, Band::B70cm),
    (902, Band::B33cm),
];

const LITERAL_DESIGNATORS: &[(&str, Band)] = &[
    ("1.2G", Band::B23cm),
    ("2.3G", Band::B13cm),
    ("3.4G", Band::B9cm),
    ("5.7G", Band::B6cm),
    ("10G", Band::B3cm),
    ("24G", Band::B24G),
    ("47G", Band::B47G),
    ("76G", Band::B76G),
    ("122G", Band::B122G),
    ("134G", Band::B134G),
    ("241G", Band::B241G),
    ("LIGHT", Band::Light),
];

/// Built-in band plan backed by static tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBandPlan;

impl BandPlan for DefaultBandPlan {
    fn band_for(&self, freq: &Frequency) -> Band {
        match freq {
            Frequency::Khz(khz) => NUMERIC_DESIGNATORS
                .iter()
                .find(|(designator, _)| designator == khz)
                .map(|(_, band)| *band)
                .or_else(|| band_for_khz(*khz))
                .unwrap_or(Band::Other),
            Frequency::Literal(token) => LITERAL_DESIGNATORS
                .iter()
                .find(|(designator, _)| *designator == token.as_str())
                .map(|(_, band)| *band)
                .unwrap_or(Band::Other),
        }
    }
}

fn band_for_khz(khz: u64) -> Option<Band> {
    BAND_EDGES_KHZ
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&khz))
        .map(|(_, _, band)| *band)
}

/// Convenience wrapper over [`DefaultBandPlan`].
pub fn band_for_frequency(freq: &Frequency) -> Band {
    DefaultBandPlan.band_for(freq)
}
