use core::fmt;

/// Project tempo, stored the way FL Studio does: thousandths of a beat per
/// minute.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tempo(u32);

impl Tempo {
    /// 140 BPM, what a new project starts with
    pub const DEFAULT: Self = Self(140_000);

    /// Create a tempo from thousandths of a beat per minute
    pub const fn from_millibeats(millibeats: u32) -> Self {
        Self(millibeats)
    }
    /// Create a tempo from whole beats per minute
    pub const fn from_bpm(bpm: u16) -> Self {
        Self(bpm as u32 * 1_000)
    }
    /// Returns thousandths of a beat per minute
    #[inline]
    pub const fn millibeats(&self) -> u32 {
        self.0
    }
    /// Returns beats per minute
    #[inline]
    pub const fn bpm(&self) -> f64 {
        self.0 as f64 / 1_000.
    }
    /// Microseconds per quarter note, as MIDI counts tempo
    pub const fn micros_per_quarter_note(&self) -> f64 {
        60_000_000_000. / self.0 as f64
    }
    /// Microseconds per tick at the given pulses per quarter note
    pub const fn micros_per_tick(&self, ppq: u16) -> f64 {
        self.micros_per_quarter_note() / ppq as f64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03} BPM", self.0 / 1_000, self.0 % 1_000)
    }
}

#[test]
fn tempo_conversions() {
    use pretty_assertions::assert_eq;
    let tempo = Tempo::from_millibeats(120_000);
    assert_eq!(tempo.bpm(), 120.);
    assert_eq!(tempo.micros_per_quarter_note(), 500_000.);
    assert_eq!(tempo.micros_per_tick(96), 500_000. / 96.);
    assert_eq!(Tempo::from_bpm(128), Tempo::from_millibeats(128_000));
    assert_eq!(alloc::format!("{}", Tempo::from_millibeats(128_500)), "128.500 BPM");
}
