use crate::config::Config;
use crate::delta_buffer::{Count, DeltaBuffer};
use crate::dose::{self, DoseLevel};
use crate::format::{fmt_value, justify, Justify};

/// Direction of the count rate, short window vs. the window before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    /// Not enough history for a comparison yet.
    NotSignificant,
}

impl Trend {
    pub fn glyph(&self) -> char {
        match self {
            Trend::Rising         => '↑',
            Trend::Falling        => '↓',
            Trend::Stable         => '=',
            Trend::NotSignificant => '?',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Rising         => "rising",
            Trend::Falling        => "falling",
            Trend::Stable         => "stable",
            Trend::NotSignificant => "n/a",
        }
    }
}

/// One tick's derived measurements.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    /// Latest cumulative total recorded.
    pub total:       u64,
    /// Rate over the short window, counts per minute.
    pub cpm:         f64,
    /// Rate over the long window, counts per minute.
    pub avg_cpm:     f64,
    /// Short-window dose rate.
    pub usv_h:       f64,
    /// Short-window dose rate projected over a year.
    pub msv_year:    f64,
    /// Dose-scale step reached, if any.
    pub dose:        Option<&'static DoseLevel>,
    pub trend:       Trend,
    /// True once the short window is fully backed by real samples.
    pub significant: bool,
}

/// Owns the delta buffer and turns tick samples into [`Reading`]s.
///
/// `record` must be fed a monotonically non-decreasing running total once
/// per tick; all rates are derived by windowed differencing, so a restart
/// of the series goes through [`restore`](Self::restore).
#[derive(Debug)]
pub struct Monitor {
    buffer:        DeltaBuffer<u64>,
    last_total:    u64,
    tick_secs:     f64,
    short_ticks:   usize,
    long_ticks:    usize,
    cpm_per_usv_h: f64,
}

impl Monitor {
    pub fn new(cfg: &Config) -> Self {
        let short = cfg.windows.short_ticks.max(1);
        let long = cfg.windows.long_ticks.max(short);
        // History must cover the long window and two short windows (trend).
        let capacity = cfg.general.capacity.max(long).max(short * 2);
        Self {
            buffer:        DeltaBuffer::new(capacity),
            last_total:    0,
            tick_secs:     cfg.general.tick_ms.max(1) as f64 / 1000.0,
            short_ticks:   short,
            long_ticks:    long,
            cpm_per_usv_h: cfg.tube.cpm_per_usv_h,
        }
    }

    /// Continue a previously persisted series: the saved total becomes the
    /// buffer baseline, so the first recorded sample differences against
    /// it instead of against zero.
    pub fn restore(&mut self, saved_total: u64) {
        self.buffer.reset(saved_total);
        self.last_total = saved_total;
    }

    /// Record this tick's cumulative total.
    pub fn record(&mut self, total: u64) {
        self.buffer.add(total);
        self.last_total = total;
    }

    pub fn total(&self) -> u64 {
        self.last_total
    }

    pub fn reading(&self) -> Reading {
        let cpm = self.cpm_over(self.short_ticks);
        let avg_cpm = self.cpm_over(self.long_ticks);
        let usv_h = dose::usv_per_hour(cpm, self.cpm_per_usv_h);
        let msv_year = dose::msv_per_year(usv_h);
        Reading {
            total:       self.last_total,
            cpm,
            avg_cpm,
            usv_h,
            msv_year,
            dose:        dose::classify(msv_year),
            trend:       self.trend(),
            significant: self.buffer.has_significant(self.short_ticks),
        }
    }

    /// Rate over the last `ticks` samples, scaled to counts per minute.
    /// Degrades to however much history exists early on.
    fn cpm_over(&self, ticks: usize) -> f64 {
        self.buffer.avg_last(ticks) * 60.0 / self.tick_secs
    }

    fn trend(&self) -> Trend {
        let w = self.short_ticks as i64;
        if !self.buffer.has_significant(self.short_ticks * 2) {
            return Trend::NotSignificant;
        }
        let recent = self.buffer.count_between(-w, 0).to_f64();
        let older = self.buffer.count_between(-2 * w, -w).to_f64();
        // Dead band of 10% (at least one count) against Poisson jitter.
        let band = (older * 0.1).max(1.0);
        if recent > older + band {
            Trend::Rising
        } else if recent < older - band {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

/// Two fixed-width status lines, the 16×2 character-display layout:
/// rate and trend on top, dose warning (or dose rate) below.
pub fn status_lines(r: &Reading, width: usize) -> (String, String) {
    let rate = format!("{} cpm {}", fmt_value(r.cpm, 0, 5, Justify::Right), r.trend.glyph());
    let line1 = justify(&rate, width, Justify::Left, ' ');

    let line2 = if !r.significant {
        justify("collecting", width, Justify::Center, ' ')
    } else if let Some(level) = r.dose {
        let label = if width >= 16 { level.long_label } else { level.short_label };
        justify(label, width, Justify::Left, ' ')
    } else {
        justify(&format!("{} uSv/h", fmt_value(r.usv_h, 3, 6, Justify::Right)), width, Justify::Left, ' ')
    };

    (line1, line2)
}
