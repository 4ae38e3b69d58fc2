//! Per-trade performance metrics.

use crate::domain::trade::{Direction, TradeRecord};
use chrono::NaiveDateTime;

/// Base pip value in account currency for one standard lot. Deliberately
/// fixed rather than derived from contract size and quote-currency rates;
/// stored journals depend on this exact constant.
const PIP_VALUE_PER_LOT: f64 = 10.0;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Pip multiplier for a symbol: 100 for JPY-quoted pairs and spot gold,
/// 10000 for everything else. Unrecognized symbols get the default.
pub fn pip_multiplier(symbol: &str) -> f64 {
    if symbol.contains("JPY") || symbol == "XAU/USD" {
        100.0
    } else {
        10000.0
    }
}

pub fn compute_pips(symbol: &str, direction: Direction, entry_price: f64, exit_price: f64) -> f64 {
    let multiplier = pip_multiplier(symbol);
    match direction {
        Direction::Long => (exit_price - entry_price) * multiplier,
        Direction::Short => (entry_price - exit_price) * multiplier,
    }
}

/// Monetary value of one pip for the given position size. The symbol does not
/// participate: every pair is priced at the fixed per-lot base.
pub fn pip_value(_symbol: &str, volume: f64) -> f64 {
    PIP_VALUE_PER_LOT * volume
}

pub fn compute_pnl(
    symbol: &str,
    direction: Direction,
    entry_price: f64,
    exit_price: f64,
    volume: f64,
) -> f64 {
    compute_pips(symbol, direction, entry_price, exit_price) * pip_value(symbol, volume)
}

/// Risk-reward as a display string, "1:N" with N to one decimal, or the
/// "0:0" sentinel when either leg is zero. The ratio is a magnitude, so the
/// direction does not affect the result; the parameter is kept so call sites
/// read the same as the other per-trade calculations.
pub fn compute_risk_reward_ratio(
    symbol: &str,
    _direction: Direction,
    entry_price: f64,
    stop_loss: f64,
    take_profit: f64,
) -> String {
    let multiplier = pip_multiplier(symbol);
    let risk = (entry_price - stop_loss).abs() * multiplier;
    let reward = (take_profit - entry_price).abs() * multiplier;

    if risk > 0.0 && reward > 0.0 {
        format!("1:{:.1}", reward / risk)
    } else {
        "0:0".to_string()
    }
}

/// PnL expressed as a multiple of the amount risked to the stop-loss.
/// `None` when the inputs cannot define a risk amount: zero or negative
/// entry/stop/volume, a breakeven trade, or a stop sitting on the entry.
pub fn compute_r_multiple(
    entry_price: f64,
    stop_loss: f64,
    pnl: f64,
    symbol: &str,
    volume: f64,
) -> Option<f64> {
    if entry_price <= 0.0 || stop_loss <= 0.0 || pnl == 0.0 || volume <= 0.0 {
        return None;
    }

    let stop_loss_pips = (entry_price - stop_loss).abs() * pip_multiplier(symbol);
    let risk_amount = stop_loss_pips * pip_value(symbol, volume);

    if risk_amount > 0.0 {
        Some(pnl / risk_amount)
    } else {
        None
    }
}

/// Whole minutes between entry and exit, rounded to nearest. `None` when
/// either timestamp is missing or exit is not strictly after entry; absence
/// is distinct from a genuine zero-minute trade and must stay that way.
pub fn compute_hold_time(
    entry_time: Option<NaiveDateTime>,
    exit_time: Option<NaiveDateTime>,
) -> Option<i64> {
    let entry = entry_time?;
    let exit = exit_time?;
    if exit <= entry {
        return None;
    }
    let millis = (exit - entry).num_milliseconds() as f64;
    Some((millis / MILLIS_PER_MINUTE).round() as i64)
}

/// "2d 3h 15m" style rendering of a hold time in minutes.
pub fn format_hold_time(minutes: i64) -> String {
    let days = minutes / (24 * 60);
    let hours = (minutes % (24 * 60)) / 60;
    let mins = minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 {
        parts.push(format!("{mins}m"));
    }

    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Derived metrics for one trade. Constructed fresh from a record on every
/// call, never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeMetrics {
    pub pips: f64,
    pub pnl: f64,
    pub risk_reward: String,
    pub r_multiple: Option<f64>,
    pub hold_time_minutes: Option<i64>,
}

impl TradeMetrics {
    /// Compute every derivable metric for a record, gating each on the fields
    /// it needs. Incomplete price/volume data yields zero pips and PnL;
    /// optional metrics are `None` when their inputs are absent.
    pub fn compute(record: &TradeRecord) -> Self {
        let priced = !record.symbol.is_empty()
            && record.entry_price > 0.0
            && record.exit_price > 0.0
            && record.volume > 0.0;

        let (pips, pnl) = if priced {
            let pips = compute_pips(
                &record.symbol,
                record.direction,
                record.entry_price,
                record.exit_price,
            );
            (pips, pips * pip_value(&record.symbol, record.volume))
        } else {
            (0.0, 0.0)
        };

        let risk_reward = match (record.stop_loss, record.take_profit) {
            (Some(stop), Some(target)) => compute_risk_reward_ratio(
                &record.symbol,
                record.direction,
                record.entry_price,
                stop,
                target,
            ),
            _ => "0:0".to_string(),
        };

        let r_multiple = record.stop_loss.and_then(|stop| {
            compute_r_multiple(record.entry_price, stop, pnl, &record.symbol, record.volume)
        });

        let hold_time_minutes = compute_hold_time(record.entry_time, record.exit_time);

        TradeMetrics {
            pips,
            pnl,
            risk_reward,
            r_multiple,
            hold_time_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn timestamp(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn sample_record() -> TradeRecord {
        TradeRecord {
            symbol: "EURUSD".to_string(),
            direction: Direction::Long,
            entry_price: 1.1000,
            exit_price: 1.1050,
            volume: 1.0,
            stop_loss: Some(1.0950),
            take_profit: Some(1.1100),
            entry_time: Some(timestamp(2024, 3, 4, 9, 30)),
            exit_time: Some(timestamp(2024, 3, 4, 14, 0)),
            quality: None,
        }
    }

    #[test]
    fn pip_multiplier_jpy_pairs() {
        assert_eq!(pip_multiplier("USDJPY"), 100.0);
        assert_eq!(pip_multiplier("EURJPY"), 100.0);
        assert_eq!(pip_multiplier("GBPJPY"), 100.0);
    }

    #[test]
    fn pip_multiplier_gold_exact_match_only() {
        assert_eq!(pip_multiplier("XAU/USD"), 100.0);
        assert_eq!(pip_multiplier("XAUUSD"), 10000.0);
    }

    #[test]
    fn pip_multiplier_default() {
        assert_eq!(pip_multiplier("EURUSD"), 10000.0);
        assert_eq!(pip_multiplier("GBPUSD"), 10000.0);
        assert_eq!(pip_multiplier(""), 10000.0);
    }

    #[test]
    fn pip_multiplier_is_case_sensitive() {
        assert_eq!(pip_multiplier("usdjpy"), 10000.0);
        assert_eq!(pip_multiplier("xau/usd"), 10000.0);
    }

    #[test]
    fn pips_long_winner() {
        let pips = compute_pips("EURUSD", Direction::Long, 1.1000, 1.1050);
        assert_relative_eq!(pips, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn pips_long_loser_is_negative() {
        let pips = compute_pips("EURUSD", Direction::Long, 1.1050, 1.1000);
        assert_relative_eq!(pips, -50.0, epsilon = 1e-9);
    }

    #[test]
    fn pips_short_winner() {
        let pips = compute_pips("USDJPY", Direction::Short, 150.00, 149.50);
        assert_relative_eq!(pips, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn pips_flat_trade_is_zero() {
        let pips = compute_pips("EURUSD", Direction::Long, 1.1000, 1.1000);
        assert_eq!(pips, 0.0);
    }

    #[test]
    fn pip_value_scales_with_volume() {
        assert_relative_eq!(pip_value("EURUSD", 1.0), 10.0);
        assert_relative_eq!(pip_value("EURUSD", 0.5), 5.0);
        assert_relative_eq!(pip_value("USDJPY", 2.5), 25.0);
    }

    #[test]
    fn pnl_eurusd_long_standard_lot() {
        let pnl = compute_pnl("EURUSD", Direction::Long, 1.10000, 1.10500, 1.0);
        assert_relative_eq!(pnl, 500.0, epsilon = 1e-6);
    }

    #[test]
    fn pnl_usdjpy_short_half_lot() {
        let pnl = compute_pnl("USDJPY", Direction::Short, 150.00, 149.50, 0.5);
        assert_relative_eq!(pnl, 250.0, epsilon = 1e-6);
    }

    #[test]
    fn risk_reward_two_to_one() {
        let ratio = compute_risk_reward_ratio("EURUSD", Direction::Long, 1.1000, 1.0950, 1.1100);
        assert_eq!(ratio, "1:2.0");
    }

    #[test]
    fn risk_reward_direction_independent() {
        let long = compute_risk_reward_ratio("EURUSD", Direction::Long, 1.1000, 1.0950, 1.1100);
        let short = compute_risk_reward_ratio("EURUSD", Direction::Short, 1.1000, 1.0950, 1.1100);
        assert_eq!(long, short);
    }

    #[test]
    fn risk_reward_sentinel_when_stop_on_entry() {
        let ratio = compute_risk_reward_ratio("EURUSD", Direction::Long, 1.1000, 1.1000, 1.1100);
        assert_eq!(ratio, "0:0");
    }

    #[test]
    fn risk_reward_sentinel_when_target_on_entry() {
        let ratio = compute_risk_reward_ratio("EURUSD", Direction::Long, 1.1000, 1.0950, 1.1000);
        assert_eq!(ratio, "0:0");
    }

    #[test]
    fn risk_reward_fractional_ratio_rounds_to_one_decimal() {
        // risk 50 pips, reward 75 pips -> 1.5
        let ratio = compute_risk_reward_ratio("EURUSD", Direction::Long, 1.1000, 1.0950, 1.1075);
        assert_eq!(ratio, "1:1.5");
    }

    #[test]
    fn r_multiple_one_r_winner() {
        // 50 pip stop on one lot risks $500; a $500 win is exactly 1R.
        let r = compute_r_multiple(1.1000, 1.0950, 500.0, "EURUSD", 1.0).unwrap();
        assert_relative_eq!(r, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn r_multiple_losing_trade_is_negative() {
        let r = compute_r_multiple(1.1000, 1.0950, -250.0, "EURUSD", 1.0).unwrap();
        assert_relative_eq!(r, -0.5, epsilon = 1e-9);
    }

    #[test]
    fn r_multiple_undefined_for_breakeven() {
        assert!(compute_r_multiple(1.1000, 1.0950, 0.0, "EURUSD", 1.0).is_none());
    }

    #[test]
    fn r_multiple_undefined_without_stop_distance() {
        assert!(compute_r_multiple(1.1000, 1.1000, 500.0, "EURUSD", 1.0).is_none());
    }

    #[test]
    fn r_multiple_undefined_for_degenerate_inputs() {
        assert!(compute_r_multiple(0.0, 1.0950, 500.0, "EURUSD", 1.0).is_none());
        assert!(compute_r_multiple(1.1000, 0.0, 500.0, "EURUSD", 1.0).is_none());
        assert!(compute_r_multiple(1.1000, 1.0950, 500.0, "EURUSD", 0.0).is_none());
    }

    #[test]
    fn hold_time_whole_minutes() {
        let entry = timestamp(2024, 3, 4, 9, 30);
        let exit = timestamp(2024, 3, 4, 14, 0);
        assert_eq!(compute_hold_time(Some(entry), Some(exit)), Some(270));
    }

    #[test]
    fn hold_time_rounds_to_nearest_minute() {
        let entry = timestamp(2024, 3, 4, 9, 0);
        let exit = entry + chrono::Duration::seconds(90);
        assert_eq!(compute_hold_time(Some(entry), Some(exit)), Some(2));

        let exit = entry + chrono::Duration::seconds(29);
        assert_eq!(compute_hold_time(Some(entry), Some(exit)), Some(0));
    }

    #[test]
    fn hold_time_undefined_when_not_after_entry() {
        let t = timestamp(2024, 3, 4, 9, 30);
        assert_eq!(compute_hold_time(Some(t), Some(t)), None);

        let earlier = timestamp(2024, 3, 4, 9, 0);
        assert_eq!(compute_hold_time(Some(t), Some(earlier)), None);
    }

    #[test]
    fn hold_time_undefined_when_missing() {
        let t = timestamp(2024, 3, 4, 9, 30);
        assert_eq!(compute_hold_time(None, Some(t)), None);
        assert_eq!(compute_hold_time(Some(t), None), None);
        assert_eq!(compute_hold_time(None, None), None);
    }

    #[test]
    fn format_hold_time_examples() {
        assert_eq!(format_hold_time(0), "0m");
        assert_eq!(format_hold_time(45), "45m");
        assert_eq!(format_hold_time(75), "1h 15m");
        assert_eq!(format_hold_time(1440), "1d");
        assert_eq!(format_hold_time(2890), "2d 10m");
    }

    #[test]
    fn metrics_complete_record() {
        let metrics = TradeMetrics::compute(&sample_record());
        assert_relative_eq!(metrics.pips, 50.0, epsilon = 1e-6);
        assert_relative_eq!(metrics.pnl, 500.0, epsilon = 1e-6);
        assert_eq!(metrics.risk_reward, "1:2.0");
        assert_relative_eq!(metrics.r_multiple.unwrap(), 1.0, epsilon = 1e-6);
        assert_eq!(metrics.hold_time_minutes, Some(270));
    }

    #[test]
    fn metrics_zero_volume_yields_zero_pnl() {
        let mut record = sample_record();
        record.volume = 0.0;
        let metrics = TradeMetrics::compute(&record);
        assert_eq!(metrics.pips, 0.0);
        assert_eq!(metrics.pnl, 0.0);
        assert_eq!(metrics.r_multiple, None);
    }

    #[test]
    fn metrics_without_stops_use_sentinel_ratio() {
        let mut record = sample_record();
        record.stop_loss = None;
        record.take_profit = None;
        let metrics = TradeMetrics::compute(&record);
        assert_eq!(metrics.risk_reward, "0:0");
        assert_eq!(metrics.r_multiple, None);
    }

    #[test]
    fn metrics_without_timestamps_have_no_hold_time() {
        let mut record = sample_record();
        record.entry_time = None;
        let metrics = TradeMetrics::compute(&record);
        assert_eq!(metrics.hold_time_minutes, None);
    }

    proptest! {
        #[test]
        fn pips_antisymmetric_in_direction(
            entry in 0.0001_f64..1000.0,
            exit in 0.0001_f64..1000.0,
        ) {
            let long = compute_pips("EURUSD", Direction::Long, entry, exit);
            let short = compute_pips("EURUSD", Direction::Short, entry, exit);
            prop_assert_eq!(long, -short);
        }

        #[test]
        fn pnl_sign_matches_pips_sign(
            entry in 0.0001_f64..1000.0,
            exit in 0.0001_f64..1000.0,
            volume in 0.01_f64..100.0,
        ) {
            let pips = compute_pips("GBPUSD", Direction::Long, entry, exit);
            let pnl = compute_pnl("GBPUSD", Direction::Long, entry, exit, volume);
            prop_assert_eq!(pnl > 0.0, pips > 0.0);
            prop_assert_eq!(pnl < 0.0, pips < 0.0);
        }

        #[test]
        fn r_multiple_exact_quotient(
            pnl in (-1e6_f64..1e6).prop_filter("non-zero", |p| *p != 0.0),
            stop_distance in 0.0001_f64..0.1,
        ) {
            let entry = 1.2000;
            let stop = entry - stop_distance;
            let risk = (entry - stop).abs() * 10000.0 * 10.0;
            let r = compute_r_multiple(entry, stop, pnl, "EURUSD", 1.0);
            prop_assert_eq!(r, Some(pnl / risk));
        }
    }
}
