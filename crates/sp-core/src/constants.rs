/// Default battery generation rate (batteries/s).
pub const DEFAULT_RATE: &str = "0.5";

/// Fractional digits shown for approximate decimal values.
pub const APPROX_DIGITS: usize = 6;

/// Gate budgets above this make the exhaustive search noticeably slow.
pub const SLOW_GATE_BUDGET: u32 = 100;

/// Environment variable naming an extra TOML presets file.
pub const PRESETS_ENV: &str = "SPLITPLAN_PRESETS";

/// Version tag written into JSON exports.
pub const EXPORT_VERSION: &str = "1";
