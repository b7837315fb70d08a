//! Centralized constants for the plan assistant
//!
//! Single source of truth for plan rules and default values. Settings
//! default to these, and tests refer to them instead of repeating numbers.

/// Participant loan rules
pub mod loan {
    /// Absolute cap on a single participant loan (USD)
    pub const ABSOLUTE_MAX: f64 = 50_000.0;

    /// Share of the vested balance that may be borrowed
    pub const BALANCE_FRACTION: f64 = 0.5;

    /// Shortest general-purpose repayment term (years)
    pub const MIN_TERM_YEARS: u32 = 1;

    /// Longest general-purpose repayment term (years)
    pub const MAX_TERM_YEARS: u32 = 5;

    /// Annual interest rate used for repayment estimates
    pub const ANNUAL_INTEREST_RATE: f64 = 0.085;

    /// Biweekly payroll
    pub const PAY_PERIODS_PER_YEAR: u32 = 26;
}

/// Enrollment rules
pub mod enrollment {
    /// Lowest deferral percentage accepted
    pub const MIN_CONTRIBUTION_PERCENT: f64 = 1.0;

    /// Highest deferral percentage accepted
    pub const MAX_CONTRIBUTION_PERCENT: f64 = 100.0;
}

/// Account snapshot defaults (used when no record system is attached)
pub mod account {
    /// Vested balance (USD)
    pub const DEFAULT_VESTED_BALANCE: f64 = 125_000.0;

    pub const DEFAULT_PARTICIPANT_NAME: &str = "there";
}

/// HTTP host defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const MAX_SESSIONS: usize = 1000;
    pub const SESSION_TIMEOUT_SECS: u64 = 1800;
    pub const CLEANUP_INTERVAL_SECS: u64 = 60;
}

/// Environment variable prefix for overrides (`PLAN_ASSISTANT__SERVER__PORT=9000`)
pub const ENV_PREFIX: &str = "PLAN_ASSISTANT";
