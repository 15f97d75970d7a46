#[cfg(test)]
mod tests {
    use super::super::indicators::*;

    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
            46.21, 46.25, 45.71, 46.45, 45.78, 45.35, 44.03, 44.18, 44.22, 44.57,
            43.42, 42.66, 43.13, 43.55, 44.01, 44.98, 45.12, 45.55, 45.61, 46.02,
        ]
    }

    #[test]
    fn sma_is_mean_of_trailing_window() {
        let data = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let result = sma(&data, 3);

        // (30+40+50)/3
        assert!((result - 40.0).abs() < 0.001);
    }

    #[test]
    fn sma_short_series_is_zero() {
        let data = vec![1.0, 2.0];
        assert_eq!(sma(&data, 5), 0.0);
        assert_eq!(sma(&data, 0), 0.0);
    }

    #[test]
    fn constant_series_sma_equals_ema() {
        let data = vec![42.5; 60];
        for period in [5usize, 10, 20] {
            assert!((sma(&data, period) - 42.5).abs() < 1e-9);
            assert!((ema(&data, period) - 42.5).abs() < 1e-9);
        }
    }

    #[test]
    fn ema_tracks_uptrend_above_sma_seed() {
        let data: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let result = ema(&data, 5);

        // EMA weights recent points harder, so it sits above the plain mean
        // of the whole series in a monotone uptrend.
        assert!(result > data.iter().sum::<f64>() / data.len() as f64);
    }

    #[test]
    fn ema_sequence_length_and_seed() {
        let prices = sample_prices();
        let seq = ema_sequence(&prices, 12);

        assert_eq!(seq.len(), prices.len() - 12 + 1);
        let seed = prices[..12].iter().sum::<f64>() / 12.0;
        assert!((seq[0] - seed).abs() < 1e-9);
    }

    #[test]
    fn ema_sequence_last_matches_scalar_ema() {
        let prices = sample_prices();
        let seq = ema_sequence(&prices, 10);
        assert!((seq.last().unwrap() - ema(&prices, 10)).abs() < 1e-9);
    }

    #[test]
    fn ema_sequence_short_series_is_empty() {
        assert!(ema_sequence(&[1.0, 2.0], 5).is_empty());
    }

    #[test]
    fn macd_alignment_offset() {
        let prices = sample_prices();
        let ema12 = ema_sequence(&prices, 12);
        let ema26 = ema_sequence(&prices, 26);

        // The DIF series must be as long as the shorter (26-period) sequence,
        // and the alignment offset is exactly the length difference.
        assert_eq!(ema12.len() - ema26.len(), 26 - 12);

        let m = macd(&prices);
        let offset = ema12.len() - ema26.len();
        let expected_last_dif = ema12[offset + ema26.len() - 1] - ema26[ema26.len() - 1];
        assert!((m.dif - expected_last_dif).abs() < 1e-9);
        assert!((m.hist - (m.dif - m.dea)).abs() < 1e-9);
    }

    #[test]
    fn macd_short_series_is_zero() {
        let m = macd(&[1.0, 2.0, 3.0]);
        assert_eq!(m.dif, 0.0);
        assert_eq!(m.dea, 0.0);
        assert_eq!(m.hist, 0.0);
    }

    #[test]
    fn rsi_stays_in_range() {
        let prices = sample_prices();
        let value = rsi(&prices, 14);
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn rsi_uptrend_is_above_fifty() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64 * 2.0).collect();
        assert!(rsi(&data, 14) > 50.0);
    }

    #[test]
    fn rsi_without_losses_is_exactly_one_hundred() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&data, 14), 100.0);

        // A flat window has zero total loss as well.
        let flat = vec![100.0; 20];
        assert_eq!(rsi(&flat, 14), 100.0);
    }

    #[test]
    fn rsi_short_series_is_neutral() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 14), 50.0);
    }

    #[test]
    fn bollinger_band_ordering() {
        let prices = sample_prices();
        let bands = bollinger_bands(&prices, 20, 2.0);

        assert!(bands.upper >= bands.middle);
        assert!(bands.middle >= bands.lower);
    }

    #[test]
    fn bollinger_width_zero_only_for_equal_prices() {
        let flat = vec![100.0; 25];
        let bands = bollinger_bands(&flat, 20, 2.0);
        assert!((bands.upper - bands.lower).abs() < 1e-12);
        assert!((bands.middle - 100.0).abs() < 1e-12);

        let varied = sample_prices();
        let bands = bollinger_bands(&varied, 20, 2.0);
        assert!(bands.upper - bands.lower > 0.0);
    }

    #[test]
    fn bollinger_short_series_is_zero() {
        let bands = bollinger_bands(&[1.0, 2.0], 20, 2.0);
        assert_eq!(bands.middle, 0.0);
    }
}
