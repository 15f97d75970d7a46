use market_core::Bar;
use serde::{Deserialize, Serialize};

use crate::indicators::{bollinger_bands, ema, macd, rsi, sma};
use crate::IndicatorError;

/// Minimum bar window for a full snapshot (SMA/EMA-120 need the whole span).
pub const MIN_BARS: usize = 120;

/// Overall trend read-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendStrength {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

impl TrendStrength {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStrength::StrongBullish => "STRONG_BULLISH",
            TrendStrength::Bullish => "BULLISH",
            TrendStrength::Neutral => "NEUTRAL",
            TrendStrength::Bearish => "BEARISH",
            TrendStrength::StrongBearish => "STRONG_BEARISH",
        }
    }
}

/// Momentum read-out from MACD histogram and RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumStatus {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
}

impl MomentumStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MomentumStatus::Overbought => "OVERBOUGHT",
            MomentumStatus::Oversold => "OVERSOLD",
            MomentumStatus::Bullish => "BULLISH",
            MomentumStatus::Bearish => "BEARISH",
            MomentumStatus::Neutral => "NEUTRAL",
        }
    }
}

/// Where the close sits inside the Bollinger envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandPosition {
    NearUpper,
    UpperHalf,
    Middle,
    LowerHalf,
    NearLower,
}

impl BandPosition {
    pub fn label(&self) -> &'static str {
        match self {
            BandPosition::NearUpper => "NEAR_UPPER",
            BandPosition::UpperHalf => "UPPER_HALF",
            BandPosition::Middle => "MIDDLE",
            BandPosition::LowerHalf => "LOWER_HALF",
            BandPosition::NearLower => "NEAR_LOWER",
        }
    }
}

/// Volume-price relation read-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeSignal {
    StrongBuying,
    Buying,
    Neutral,
    Selling,
    StrongSelling,
}

impl VolumeSignal {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeSignal::StrongBuying => "STRONG_BUYING",
            VolumeSignal::Buying => "BUYING",
            VolumeSignal::Neutral => "NEUTRAL",
            VolumeSignal::Selling => "SELLING",
            VolumeSignal::StrongSelling => "STRONG_SELLING",
        }
    }
}

/// Full indicator vector for the last bar of a window, plus the four
/// categorical read-outs derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    // Trend
    pub sma10: f64,
    pub sma60: f64,
    pub sma120: f64,
    pub ema10: f64,
    pub ema60: f64,
    pub ema120: f64,

    // Momentum
    pub macd_dif: f64,
    pub macd_dea: f64,
    pub macd_hist: f64,
    pub rsi14: f64,

    // Volatility
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub bb_width: f64,

    // Volume
    pub vma20: f64,
    pub current_volume: f64,

    // Derived read-outs
    pub trend: TrendStrength,
    pub momentum: MomentumStatus,
    pub band_position: BandPosition,
    pub volume_signal: VolumeSignal,
}

/// Compute the full indicator snapshot from an oldest-first bar window.
///
/// Fails with [`IndicatorError::InsufficientData`] below [`MIN_BARS`] bars
/// rather than returning a partially filled vector.
pub fn compute(bars: &[Bar]) -> Result<IndicatorSnapshot, IndicatorError> {
    if bars.len() < MIN_BARS {
        return Err(IndicatorError::InsufficientData {
            have: bars.len(),
            need: MIN_BARS,
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let last_close = *closes.last().expect("window is non-empty");

    let macd = macd(&closes);
    let bands = bollinger_bands(&closes, 20, 2.0);
    let bb_width = (bands.upper - bands.lower) / bands.middle;

    let ema10 = ema(&closes, 10);
    let ema60 = ema(&closes, 60);
    let ema120 = ema(&closes, 120);
    let rsi14 = rsi(&closes, 14);
    let vma20 = sma(&volumes, 20);
    let current_volume = *volumes.last().expect("window is non-empty");

    let trend = classify_trend(last_close, ema10, ema60, ema120);
    let momentum = classify_momentum(macd.hist, rsi14);
    let band_position = classify_band_position(last_close, bands.upper, bands.lower);
    let volume_signal = classify_volume(&closes, current_volume, vma20);

    Ok(IndicatorSnapshot {
        sma10: sma(&closes, 10),
        sma60: sma(&closes, 60),
        sma120: sma(&closes, 120),
        ema10,
        ema60,
        ema120,
        macd_dif: macd.dif,
        macd_dea: macd.dea,
        macd_hist: macd.hist,
        rsi14,
        bb_upper: bands.upper,
        bb_middle: bands.middle,
        bb_lower: bands.lower,
        bb_width,
        vma20,
        current_volume,
        trend,
        momentum,
        band_position,
        volume_signal,
    })
}

fn classify_trend(price: f64, ema10: f64, ema60: f64, ema120: f64) -> TrendStrength {
    let mut bullish = 0;
    let mut bearish = 0;

    if price > ema10 {
        bullish += 1;
    } else {
        bearish += 1;
    }

    if price > ema60 {
        bullish += 1;
    } else {
        bearish += 1;
    }

    // A fully ordered EMA stack counts double.
    if ema10 > ema60 && ema60 > ema120 {
        bullish += 2;
    } else if ema10 < ema60 && ema60 < ema120 {
        bearish += 2;
    }

    if bullish >= 3 {
        TrendStrength::StrongBullish
    } else if bullish > bearish {
        TrendStrength::Bullish
    } else if bearish >= 3 {
        TrendStrength::StrongBearish
    } else if bearish > bullish {
        TrendStrength::Bearish
    } else {
        TrendStrength::Neutral
    }
}

fn classify_momentum(macd_hist: f64, rsi14: f64) -> MomentumStatus {
    let mut signals = 0;

    if macd_hist > 0.0 {
        signals += 1;
    } else {
        signals -= 1;
    }

    // RSI extremes short-circuit the vote.
    if rsi14 > 70.0 {
        return MomentumStatus::Overbought;
    } else if rsi14 < 30.0 {
        return MomentumStatus::Oversold;
    } else if rsi14 > 50.0 {
        signals += 1;
    } else {
        signals -= 1;
    }

    if signals > 0 {
        MomentumStatus::Bullish
    } else if signals < 0 {
        MomentumStatus::Bearish
    } else {
        MomentumStatus::Neutral
    }
}

fn classify_band_position(price: f64, upper: f64, lower: f64) -> BandPosition {
    let range = upper - lower;
    if range == 0.0 {
        return BandPosition::Middle;
    }

    let position = (price - lower) / range;

    if position >= 0.8 {
        BandPosition::NearUpper
    } else if position >= 0.6 {
        BandPosition::UpperHalf
    } else if position >= 0.4 {
        BandPosition::Middle
    } else if position >= 0.2 {
        BandPosition::LowerHalf
    } else {
        BandPosition::NearLower
    }
}

fn classify_volume(closes: &[f64], current_volume: f64, vma20: f64) -> VolumeSignal {
    if closes.len() < 2 || vma20 == 0.0 {
        return VolumeSignal::Neutral;
    }

    let price_change = closes[closes.len() - 1] - closes[closes.len() - 2];
    let volume_ratio = current_volume / vma20;

    if volume_ratio > 1.5 && price_change > 0.0 {
        VolumeSignal::StrongBuying
    } else if volume_ratio > 1.5 && price_change < 0.0 {
        VolumeSignal::StrongSelling
    } else if volume_ratio > 1.0 && price_change > 0.0 {
        VolumeSignal::Buying
    } else if volume_ratio > 1.0 && price_change < 0.0 {
        VolumeSignal::Selling
    } else {
        VolumeSignal::Neutral
    }
}
