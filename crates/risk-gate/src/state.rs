use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only state the gate carries across trading cycles: the balance
/// high-water mark and the running daily PnL window.
///
/// Modeled as a plain value with public fields so tests can seed and inspect
/// it; the gate owns one instance for the life of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskState {
    /// Monotonic balance high-water mark. Only advances, except by
    /// re-seeding at process restart.
    pub peak_balance: f64,
    /// Realized PnL accumulated since `window_start`.
    pub daily_pnl: f64,
    /// Start of the current daily-PnL window.
    pub window_start: DateTime<Utc>,
}

impl RiskState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            peak_balance: 0.0,
            daily_pnl: 0.0,
            window_start: now,
        }
    }

    /// Advance the high-water mark. Never lowers it.
    pub fn observe_balance(&mut self, balance: f64) {
        if balance > self.peak_balance {
            self.peak_balance = balance;
        }
    }

    /// Add a realized trade PnL to the daily window.
    pub fn record_pnl(&mut self, pnl: f64, now: DateTime<Utc>) {
        self.roll_window(now);
        self.daily_pnl += pnl;

        tracing::info!(trade_pnl = pnl, daily_pnl = self.daily_pnl, "PnL recorded");
    }

    /// Daily PnL after applying any pending window rollover.
    pub fn daily_pnl(&mut self, now: DateTime<Utc>) -> f64 {
        self.roll_window(now);
        self.daily_pnl
    }

    /// Reset the daily PnL when the UTC date has rolled over since
    /// `window_start`.
    pub fn roll_window(&mut self, now: DateTime<Utc>) {
        if now.date_naive() != self.window_start.date_naive() {
            tracing::info!(previous_daily_pnl = self.daily_pnl, "resetting daily PnL window");
            self.daily_pnl = 0.0;
            self.window_start = now;
        }
    }
}

impl Default for RiskState {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}
