//! Trailing-window indicator primitives.
//!
//! Every function reads the *end* of the series: callers pass the full bar
//! window and get the indicator value as of the most recent point.

/// Simple Moving Average over the last `period` points.
pub fn sma(data: &[f64], period: usize) -> f64 {
    if period == 0 || data.len() < period {
        return 0.0;
    }

    let sum: f64 = data[data.len() - period..].iter().sum();
    sum / period as f64
}

/// Exponential Moving Average over the whole series, seeded with the SMA of
/// the first `period` points.
pub fn ema(data: &[f64], period: usize) -> f64 {
    if period == 0 || data.len() < period {
        return 0.0;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = data[..period].iter().sum::<f64>() / period as f64;

    for &value in &data[period..] {
        ema = value * multiplier + ema * (1.0 - multiplier);
    }

    ema
}

/// EMA recurrence over the whole series, returning every produced value.
///
/// The result has length `data.len() - period + 1`; sequences computed with
/// different periods over the same data start at different offsets, which is
/// exactly what [`macd`] has to compensate for.
pub fn ema_sequence(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len() - period + 1);
    result.push(data[..period].iter().sum::<f64>() / period as f64);

    for &value in &data[period..] {
        let prev = *result.last().expect("seeded above");
        result.push(value * multiplier + prev * (1.0 - multiplier));
    }

    result
}

/// MACD(12, 26, 9) as of the last point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub dif: f64,
    pub dea: f64,
    pub hist: f64,
}

pub fn macd(data: &[f64]) -> Macd {
    let ema12 = ema_sequence(data, 12);
    let ema26 = ema_sequence(data, 26);

    if ema12.is_empty() || ema26.is_empty() {
        return Macd { dif: 0.0, dea: 0.0, hist: 0.0 };
    }

    // The two sequences start at different offsets; right-align them on the
    // shorter (26-period) one before subtracting. A per-index subtraction
    // would shift the DIF series by the offset.
    let min_len = ema26.len().min(ema12.len());
    let offset = ema12.len() - min_len;

    let dif_seq: Vec<f64> = (0..min_len)
        .map(|i| ema12[i + offset] - ema26[i])
        .collect();

    let dea_seq = ema_sequence(&dif_seq, 9);
    if dea_seq.is_empty() {
        return Macd { dif: 0.0, dea: 0.0, hist: 0.0 };
    }

    let dif = *dif_seq.last().expect("non-empty");
    let dea = *dea_seq.last().expect("non-empty");

    Macd { dif, dea, hist: dif - dea }
}

/// Simplified single-window RSI over the last `period` deltas.
///
/// This is a plain average of gains and losses over one window, not Wilder's
/// recursive smoothing; the 30/70 thresholds downstream are tuned against
/// this variant. Returns 50 when the series is too short and 100 when the
/// window has no losses.
pub fn rsi(data: &[f64], period: usize) -> f64 {
    if period == 0 || data.len() < period + 1 {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in data.len() - period..data.len() {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Bollinger Bands over the last `period` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn bollinger_bands(data: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    if period == 0 || data.len() < period {
        return BollingerBands { upper: 0.0, middle: 0.0, lower: 0.0 };
    }

    let middle = sma(data, period);

    // Population standard deviation over the same window as the middle band.
    let variance: f64 = data[data.len() - period..]
        .iter()
        .map(|x| (x - middle).powi(2))
        .sum::<f64>()
        / period as f64;
    let std = variance.sqrt();

    BollingerBands {
        upper: middle + std_dev * std,
        middle,
        lower: middle - std_dev * std,
    }
}
