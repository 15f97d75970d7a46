use chrono::{DateTime, Utc};
use indicator_engine::IndicatorSnapshot;
use market_core::{MarketSnapshot, Position};

/// Everything the oracle gets to see for one symbol in one cycle.
#[derive(Debug, Clone)]
pub struct MarketContext {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub market: MarketSnapshot,
    pub indicators: IndicatorSnapshot,
    pub position: Position,
}

impl MarketContext {
    /// Render the analysis prompt. The oracle is instructed to answer with a
    /// single JSON object matching the `Decision` wire shape; anything else
    /// fails parsing downstream.
    pub fn render_prompt(&self) -> String {
        let ind = &self.indicators;
        let pos = &self.position;
        let holding_hours = pos.holding.as_secs_f64() / 3600.0;

        format!(
            "You are a professional quantitative futures trader acting as the decision \
engine of an automated trading system. Analyze the market state below and return one \
concrete, executable instruction.

## Market data - {symbol} @ {timestamp}
- current price: {price:.2}
- 24h change: {change:.2}%
- 24h volume: {volume:.2}

## Technical indicators
Trend:
- SMA: SMA10={sma10:.2}, SMA60={sma60:.2}, SMA120={sma120:.2}
- EMA: EMA10={ema10:.2}, EMA60={ema60:.2}, EMA120={ema120:.2}
- trend reading: {trend}

Momentum:
- MACD: DIF={dif:.4}, DEA={dea:.4}, HIST={hist:.4}
- RSI(14): {rsi:.2}
- momentum reading: {momentum}

Volatility:
- Bollinger: upper={bb_upper:.2}, middle={bb_middle:.2}, lower={bb_lower:.2}
- band position: {band_position}
- band width: {bb_width:.4}

Volume:
- current volume: {cur_volume:.2}
- VMA20: {vma20:.2}
- volume-price reading: {volume_signal}

## Current position
- side: {side}
- size: {size:.4}
- entry price: {entry:.2}
- unrealized PnL: {pnl_pct:.2}%
- holding time: {holding:.1}h

## Rules
- Open only when several independent signals agree; otherwise HOLD.
- Add to a position only when it is in profit and the trend is confirmed.
- Close on target, on stop, or on a clear reversal signal.
- Single entry at most 10% of equity, total exposure at most 25%, reward at \
least twice the risk.
- Confidence below 0.6 means no trade; state it honestly.
- Suggest leverage by trend strength: strong 5-10x, moderate 3-5x, weak 1-3x.

Reply with exactly this JSON object and no other text:

{{
  \"action\": \"OPEN_LONG|OPEN_SHORT|ADD_POSITION|CLOSE_POSITION|HOLD\",
  \"confidence\": 0.0-1.0,
  \"size\": 0.0-1.0,
  \"leverage\": 1-20,
  \"reason\": \"technical rationale citing specific indicators\",
  \"stop_loss\": price,
  \"take_profit\": price,
  \"risk_level\": \"LOW|MEDIUM|HIGH\",
  \"expected_holding_period\": \"SHORT|MEDIUM|LONG\"
}}",
            symbol = self.symbol,
            timestamp = self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            price = self.market.price,
            change = self.market.day_change_percent,
            volume = self.market.day_volume,
            sma10 = ind.sma10,
            sma60 = ind.sma60,
            sma120 = ind.sma120,
            ema10 = ind.ema10,
            ema60 = ind.ema60,
            ema120 = ind.ema120,
            trend = ind.trend.label(),
            dif = ind.macd_dif,
            dea = ind.macd_dea,
            hist = ind.macd_hist,
            rsi = ind.rsi14,
            momentum = ind.momentum.label(),
            bb_upper = ind.bb_upper,
            bb_middle = ind.bb_middle,
            bb_lower = ind.bb_lower,
            band_position = ind.band_position.label(),
            bb_width = ind.bb_width,
            cur_volume = ind.current_volume,
            vma20 = ind.vma20,
            volume_signal = ind.volume_signal.label(),
            side = pos.side.label(),
            size = pos.size,
            entry = pos.entry_price,
            pnl_pct = pos.pnl_percent,
            holding = holding_hours,
        )
    }
}
