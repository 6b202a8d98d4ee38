/// Hours per year used when projecting an hourly dose rate to an annual
/// dose (365.25 days).
const HOURS_PER_YEAR: f64 = 8_766.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info     => "INFO",
            Severity::Warning  => "WARN",
            Severity::Critical => "CRIT",
        }
    }
}

/// One step of the annual-dose reference scale.
#[derive(Debug, Clone, Copy)]
pub struct DoseLevel {
    /// Threshold in mSv/year.
    pub msv_per_year: f64,
    /// 10-character label for narrow displays.
    pub short_label:  &'static str,
    /// 16-character label for full-width displays.
    pub long_label:   &'static str,
    pub severity:     Severity,
}

/// Reference scale, ascending. Thresholds are the usual radioprotection
/// landmarks: public effective-dose limit, search-and-cover advisories,
/// occupational limit, evacuation, acute danger, lethal range.
pub static DOSE_SCALE: [DoseLevel; 6] = [
    DoseLevel { msv_per_year: 1.0,    short_label: ">Effective", long_label: "> EFFECTIVE DOSE", severity: Severity::Info },
    DoseLevel { msv_per_year: 10.0,   short_label: ">SrchCover", long_label: "> SEARCH COVER  ", severity: Severity::Warning },
    DoseLevel { msv_per_year: 20.0,   short_label: ">NucWorker", long_label: "> NUCLEAR WORKER", severity: Severity::Warning },
    DoseLevel { msv_per_year: 50.0,   short_label: ">Go away  ", long_label: "> GO AWAY       ", severity: Severity::Critical },
    DoseLevel { msv_per_year: 100.0,  short_label: ">High     ", long_label: "> HIGH - DANGER ", severity: Severity::Critical },
    DoseLevel { msv_per_year: 1000.0, short_label: ">Deadly   ", long_label: "> DEADLY        ", severity: Severity::Critical },
];

/// Highest scale step the given annual dose reaches, or `None` when the
/// dose sits below the lowest threshold.
pub fn classify(msv_per_year: f64) -> Option<&'static DoseLevel> {
    DOSE_SCALE.iter().rev().find(|lvl| msv_per_year >= lvl.msv_per_year)
}

/// Convert a counts-per-minute rate to µSv/h given the tube sensitivity
/// (counts per minute produced by a 1 µSv/h field).
pub fn usv_per_hour(cpm: f64, cpm_per_usv_h: f64) -> f64 {
    if cpm_per_usv_h <= 0.0 {
        return 0.0;
    }
    cpm / cpm_per_usv_h
}

/// Project an hourly dose rate to an annual dose in mSv/year.
pub fn msv_per_year(usv_h: f64) -> f64 {
    usv_h * HOURS_PER_YEAR / 1000.0
}
