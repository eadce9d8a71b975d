//! Frequency to amateur-band classification.

/// One inclusive band-plan range in MHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRange {
    /// Band label, e.g. `"40m"`.
    pub label: &'static str,
    /// Lower edge in MHz.
    pub low_mhz: f64,
    /// Upper edge in MHz.
    pub high_mhz: f64,
}

impl BandRange {
    const fn new(label: &'static str, low_mhz: f64, high_mhz: f64) -> Self {
        Self {
            label,
            low_mhz,
            high_mhz,
        }
    }

    /// True when `frequency_mhz` lies within `[low, high]`.
    pub fn contains(&self, frequency_mhz: f64) -> bool {
        self.low_mhz <= frequency_mhz && frequency_mhz <= self.high_mhz
    }
}

/// Band plan, scanned in order.
pub const BAND_PLAN: &[BandRange] = &[
    BandRange::new("160m", 1.8, 2.0),
    BandRange::new("80m", 3.5, 3.8),
    BandRange::new("60m", 5.3515, 5.3665),
    BandRange::new("40m", 7.0, 7.3),
    BandRange::new("30m", 10.1, 10.15),
    BandRange::new("20m", 14.0, 14.35),
    BandRange::new("17m", 18.068, 18.168),
    BandRange::new("15m", 21.0, 21.45),
    BandRange::new("12m", 24.89, 24.99),
    BandRange::new("10m", 28.0, 29.7),
    BandRange::new("6m", 50.0, 54.0),
    BandRange::new("2m", 144.0, 148.0),
    BandRange::new("1,2m", 220.0, 225.0),
    BandRange::new("70cm", 430.0, 440.0),
    BandRange::new("23cm", 1240.0, 1300.0),
    BandRange::new("13cm", 2390.0, 2450.0),
    BandRange::new("9cm", 3300.0, 3400.0),
    BandRange::new("5cm", 5650.0, 5850.0),
    BandRange::new("3cm", 10000.0, 10500.0),
    BandRange::new("1,2cm", 24000.0, 24250.0),
    BandRange::new("6mm", 47000.0, 47200.0),
];

/// Maps a frequency in MHz to its band label.
///
/// Frequencies outside every range come back as the frequency itself,
/// rounded to three decimals with an `MHz` suffix (`"14.251MHz"`).
pub fn classify(frequency_mhz: f64) -> String {
    BAND_PLAN
        .iter()
        .find(|range| range.contains(frequency_mhz))
        .map(|range| range.label.to_string())
        .unwrap_or_else(|| format!("{frequency_mhz:.3}MHz"))
}

/// Looks up the range for a band label.
pub fn band_range(label: &str) -> Option<&'static BandRange> {
    BAND_PLAN
        .iter()
        .find(|range| range.label.eq_ignore_ascii_case(label))
}
