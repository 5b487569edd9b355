use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use domain_model::CandleType;

use crate::error::{ContractError, Result};
use crate::validation::{check_date, check_timeframe, ValidationRules};

/// Column of [`PairHistory::data`] holding the candle open time in epoch millis.
pub const DATE_TS_COLUMN: &str = "__date_ts";

/// One `[pair, timeframe, candletype]` entry, encoded as a 3-element array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PairInterval(pub String, pub String, pub String);

pub type PairIntervalTuple = PairInterval;

impl PairInterval {
    pub fn pair(&self) -> &str {
        &self.0
    }

    pub fn timeframe(&self) -> &str {
        &self.1
    }

    pub fn candle_type(&self) -> &str {
        &self.2
    }

    /// `None` when the backend reports a candle type this client does not know.
    pub fn parsed_candle_type(&self) -> Option<CandleType> {
        self.2.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AvailablePairResult {
    pub pairs: Vec<String>,
    pub pair_interval: Vec<PairInterval>,
    pub length: usize,
}

impl AvailablePairResult {
    pub fn validate(&self) -> Result<()> {
        if self.length != self.pairs.len() {
            return Err(ContractError::LengthMismatch {
                field: "pairs",
                length: self.length,
                actual: self.pairs.len(),
            });
        }
        let mut pairs = HashSet::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            if !pairs.insert(pair.as_str()) {
                return Err(ContractError::DuplicatePair(pair.clone()));
            }
        }
        if let Some(interval) = self.pair_interval.iter().find(|interval| !pairs.contains(interval.pair())) {
            return Err(ContractError::UnlistedPair(interval.pair().to_string()));
        }
        Ok(())
    }
}

/// Loosely typed candle detail value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CandleInfoValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CandleInfoValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CandleInfoValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CandleInfoElement {
    pub label: String,
    pub value: CandleInfoValue,
    pub max_value: CandleInfoValue,
    pub min_value: CandleInfoValue,
}

impl CandleInfoElement {
    /// Whether a numeric value lies within numeric bounds, `None` if any of them is not a number.
    pub fn in_bounds(&self) -> Option<bool> {
        let value = self.value.as_f64()?;
        let min = self.min_value.as_f64()?;
        let max = self.max_value.as_f64()?;
        Some(min <= value && value <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SingleCandleInfo {
    pub data: Vec<CandleInfoElement>,
}

impl SingleCandleInfo {
    pub fn get(&self, label: &str) -> Option<&CandleInfoElement> {
        self.data.iter().find(|element| element.label == label)
    }
}

/// Rewritten combo file echoed back after a push or a remove.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboFileResponse {
    pub file_content: String,
    pub file_name: String,
}

pub type PushComboFileResponse = ComboFileResponse;
pub type RemoveComboResponse = ComboFileResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MarkAreaType {
    #[serde(rename = "area")]
    Area,
}

/// Chart band, omitted bounds span the whole axis.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarkArea {
    #[serde(rename = "type")]
    pub kind: MarkAreaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MarkArea {
    pub fn new() -> Self {
        Self {
            kind: MarkAreaType::Area,
            start: None,
            end: None,
            y_start: None,
            y_end: None,
            color: None,
            label: None,
        }
    }
}

impl Default for MarkArea {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PairHistory {
    pub strategy: String,
    pub pair: String,
    pub timeframe: String,
    pub timeframe_ms: i64,
    pub columns: Vec<String>,
    /// Every column the strategy produced, `columns` may be a filtered subset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_columns: Option<Vec<String>>,
    /// Rows aligned to `columns`, `None` marks a missing value.
    pub data: Vec<Vec<Option<f64>>>,
    pub annotations: Vec<MarkArea>,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_signals: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_signals: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter_long_signals: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_long_signals: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter_short_signals: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_short_signals: Option<u64>,
    pub last_analyzed: i64,
    pub data_start_ts: i64,
    pub data_start: String,
    pub data_stop: String,
    pub data_stop_ts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalCounts {
    Directional {
        enter_long: u64,
        exit_long: u64,
        enter_short: u64,
        exit_short: u64,
    },
    Legacy {
        buy: u64,
        sell: u64,
    },
    None,
}

impl PairHistory {
    pub fn validate(&self, rules: &ValidationRules) -> Result<()> {
        debug!("Validating pair history {} {} ({} rows)", self.pair, self.timeframe, self.data.len());
        if self.length != self.data.len() {
            return Err(ContractError::LengthMismatch {
                field: "data",
                length: self.length,
                actual: self.data.len(),
            });
        }
        let expected = self.columns.len();
        if let Some((row, values)) = self.data.iter().enumerate().find(|(_, values)| values.len() != expected) {
            return Err(ContractError::RowWidthMismatch {
                row,
                width: values.len(),
                expected,
            });
        }
        if let Some(all_columns) = &self.all_columns {
            if let Some(column) = self.columns.iter().find(|column| !all_columns.contains(column)) {
                return Err(ContractError::ColumnNotInAllColumns(column.clone()));
            }
        }
        self.validate_timeframe()?;
        if !self.data.is_empty() {
            self.validate_bounds()?;
        }
        if self.signal_counts() == SignalCounts::None {
            if rules.require_signal_family {
                return Err(ContractError::MissingSignalCounts);
            }
            warn!("Pair history {} {} carries no signal counts", self.pair, self.timeframe);
        }
        Ok(())
    }

    fn validate_timeframe(&self) -> Result<()> {
        let timeframe = check_timeframe(&self.timeframe)?;
        match timeframe.millis() {
            Some(expected) if expected != self.timeframe_ms => Err(ContractError::TimeframeMismatch {
                timeframe: self.timeframe.clone(),
                expected,
                actual: self.timeframe_ms,
            }),
            _ => Ok(()),
        }
    }

    fn validate_bounds(&self) -> Result<()> {
        let start = check_date(&self.data_start)?.timestamp_millis();
        check_timestamp("data_start_ts", start, self.data_start_ts)?;
        let stop = check_date(&self.data_stop)?.timestamp_millis();
        check_timestamp("data_stop_ts", stop, self.data_stop_ts)?;

        let Some(dates) = self.column(DATE_TS_COLUMN) else {
            return Ok(());
        };
        if let Some(Some(first)) = dates.first() {
            check_timestamp("data_start_ts", *first as i64, self.data_start_ts)?;
        }
        if let Some(Some(last)) = dates.last() {
            check_timestamp("data_stop_ts", *last as i64, self.data_stop_ts)?;
        }
        Ok(())
    }

    /// Values of one column across all rows.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.data.iter()
            .map(|row| row.get(index).copied().flatten())
            .collect())
    }

    pub fn signal_counts(&self) -> SignalCounts {
        let directional = [
            self.enter_long_signals,
            self.exit_long_signals,
            self.enter_short_signals,
            self.exit_short_signals,
        ];
        if directional.iter().any(Option::is_some) {
            return SignalCounts::Directional {
                enter_long: self.enter_long_signals.unwrap_or_default(),
                exit_long: self.exit_long_signals.unwrap_or_default(),
                enter_short: self.enter_short_signals.unwrap_or_default(),
                exit_short: self.exit_short_signals.unwrap_or_default(),
            };
        }
        if self.buy_signals.is_some() || self.sell_signals.is_some() {
            return SignalCounts::Legacy {
                buy: self.buy_signals.unwrap_or_default(),
                sell: self.sell_signals.unwrap_or_default(),
            };
        }
        SignalCounts::None
    }
}

fn check_timestamp(field: &'static str, expected: i64, actual: i64) -> Result<()> {
    if expected != actual {
        return Err(ContractError::TimestampMismatch { field, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pair_history() -> PairHistory {
        serde_json::from_value(json!({
            "strategy": "SampleStrategy",
            "pair": "BTC/USDT",
            "timeframe": "1h",
            "timeframe_ms": 3600000,
            "columns": ["__date_ts", "open", "close", "rsi"],
            "all_columns": ["__date_ts", "open", "high", "low", "close", "rsi"],
            "data": [
                [1672531200000.0, 16541.8, 16600.1, null],
                [1672534800000.0, 16600.1, 16580.0, 51.2],
            ],
            "annotations": [{"type": "area", "start": "2023-01-01 00:00:00+00:00", "color": "#00FF09"}],
            "length": 2,
            "enter_long_signals": 1,
            "exit_long_signals": 0,
            "last_analyzed": 1672538400000_i64,
            "data_start_ts": 1672531200000_i64,
            "data_start": "2023-01-01 00:00:00+00:00",
            "data_stop": "2023-01-01 01:00:00+00:00",
            "data_stop_ts": 1672534800000_i64,
        })).unwrap()
    }

    #[test]
    fn test_pair_interval_is_three_strings() {
        let interval: PairInterval = serde_json::from_value(json!(["BTC/USDT", "5m", "spot"])).unwrap();
        assert_eq!(interval.pair(), "BTC/USDT");
        assert_eq!(interval.timeframe(), "5m");
        assert_eq!(interval.candle_type(), "spot");
        assert_eq!(interval.parsed_candle_type(), Some(CandleType::Spot));
        assert_eq!(serde_json::to_value(&interval).unwrap(), json!(["BTC/USDT", "5m", "spot"]));

        assert!(serde_json::from_value::<PairInterval>(json!(["BTC/USDT", "5m"])).is_err());
        assert!(serde_json::from_value::<PairInterval>(json!(["BTC/USDT", "5m", "spot", "x"])).is_err());
        assert!(serde_json::from_value::<PairInterval>(json!(["BTC/USDT", 5, "spot"])).is_err());
    }

    #[test]
    fn test_available_pairs_length_counts_pairs() {
        let result: AvailablePairResult = serde_json::from_value(json!({
            "pairs": ["BTC/USDT", "ETH/USDT"],
            "pair_interval": [
                ["BTC/USDT", "5m", "spot"],
                ["BTC/USDT", "1h", "spot"],
                ["ETH/USDT", "5m", "spot"],
            ],
            "length": 2,
        })).unwrap();
        assert!(result.validate().is_ok());

        let mut wrong = result.clone();
        wrong.length = 3;
        assert!(matches!(wrong.validate(), Err(ContractError::LengthMismatch { field: "pairs", .. })));

        let mut unlisted = result.clone();
        unlisted.pair_interval.push(PairInterval("XRP/USDT".into(), "5m".into(), "spot".into()));
        assert!(matches!(unlisted.validate(), Err(ContractError::UnlistedPair(pair)) if pair == "XRP/USDT"));

        let mut duplicated = result;
        duplicated.pairs.push("ETH/USDT".to_string());
        duplicated.length = 3;
        assert!(matches!(duplicated.validate(), Err(ContractError::DuplicatePair(_))));
    }

    #[test]
    fn test_candle_info_values() {
        let info: SingleCandleInfo = serde_json::from_value(json!({
            "data": [
                {"label": "rsi", "value": 51.2, "max_value": 100, "min_value": 0},
                {"label": "trend", "value": "up", "max_value": null, "min_value": null},
                {"label": "is_pivot", "value": true, "max_value": null, "min_value": null},
            ]
        })).unwrap();
        let rsi = info.get("rsi").unwrap();
        assert_eq!(rsi.value, CandleInfoValue::Number(51.2));
        assert_eq!(rsi.in_bounds(), Some(true));

        let trend = info.get("trend").unwrap();
        assert_eq!(trend.value, CandleInfoValue::Text("up".to_string()));
        assert_eq!(trend.max_value, CandleInfoValue::Null);
        assert_eq!(trend.in_bounds(), None);

        assert_eq!(info.get("is_pivot").unwrap().value, CandleInfoValue::Bool(true));
        assert!(info.get("macd").is_none());
    }

    #[test]
    fn test_candle_info_out_of_bounds() {
        let element = CandleInfoElement {
            label: "rsi".to_string(),
            value: CandleInfoValue::Number(120.0),
            max_value: CandleInfoValue::Number(100.0),
            min_value: CandleInfoValue::Number(0.0),
        };
        assert_eq!(element.in_bounds(), Some(false));
    }

    #[test]
    fn test_combo_file_response_is_camel_case() {
        let input = json!({"fileContent": "combo_7 = ...", "fileName": "combos.py"});
        let push: PushComboFileResponse = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(push.file_name, "combos.py");
        let remove: RemoveComboResponse = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(push, remove);
        assert_eq!(serde_json::to_value(&remove).unwrap(), input);
    }

    #[test]
    fn test_mark_area_type_is_area() {
        let area: MarkArea = serde_json::from_value(json!({"type": "area", "y_start": 1.5})).unwrap();
        assert_eq!(area.kind, MarkAreaType::Area);
        assert_eq!(area.y_start, Some(1.5));
        assert_eq!(serde_json::to_value(MarkArea::new()).unwrap(), json!({"type": "area"}));

        assert!(serde_json::from_value::<MarkArea>(json!({"type": "line"})).is_err());
        assert!(serde_json::from_value::<MarkArea>(json!({"start": "2023-01-01 00:00:00+00:00"})).is_err());
    }

    #[test]
    fn test_pair_history_round_trip() {
        let history = pair_history();
        let encoded = serde_json::to_string(&history).unwrap();
        let decoded: PairHistory = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, history);
        assert_eq!(decoded.data[0][3], None);
    }

    #[test]
    fn test_pair_history_valid() {
        let history = pair_history();
        assert!(history.validate(&ValidationRules::default()).is_ok());
        assert_eq!(history.column("rsi"), Some(vec![None, Some(51.2)]));
        assert_eq!(history.column("volume"), None);
        assert_eq!(history.signal_counts(), SignalCounts::Directional {
            enter_long: 1,
            exit_long: 0,
            enter_short: 0,
            exit_short: 0,
        });
    }

    #[test]
    fn test_pair_history_length_mismatch() {
        let mut history = pair_history();
        history.length = 3;
        assert!(matches!(
            history.validate(&ValidationRules::default()),
            Err(ContractError::LengthMismatch { field: "data", length: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_pair_history_row_width_mismatch() {
        let mut history = pair_history();
        history.data[1].pop();
        assert!(matches!(
            history.validate(&ValidationRules::default()),
            Err(ContractError::RowWidthMismatch { row: 1, width: 3, expected: 4 })
        ));
    }

    #[test]
    fn test_pair_history_column_outside_all_columns() {
        let mut history = pair_history();
        history.all_columns = Some(vec!["__date_ts".to_string(), "open".to_string()]);
        assert!(matches!(
            history.validate(&ValidationRules::default()),
            Err(ContractError::ColumnNotInAllColumns(column)) if column == "close"
        ));
    }

    #[test]
    fn test_pair_history_timestamp_mismatch() {
        let mut history = pair_history();
        history.data_stop_ts += 1;
        assert!(matches!(
            history.validate(&ValidationRules::default()),
            Err(ContractError::TimestampMismatch { field: "data_stop_ts", .. })
        ));

        let mut history = pair_history();
        history.data[0][0] = Some(1672527600000.0);
        assert!(matches!(
            history.validate(&ValidationRules::default()),
            Err(ContractError::TimestampMismatch { field: "data_start_ts", .. })
        ));
    }

    #[test]
    fn test_pair_history_timeframe_mismatch() {
        let mut history = pair_history();
        history.timeframe_ms = 300_000;
        assert!(matches!(
            history.validate(&ValidationRules::default()),
            Err(ContractError::TimeframeMismatch { expected: 3_600_000, .. })
        ));
    }

    #[test]
    fn test_pair_history_empty_data() {
        let mut history = pair_history();
        history.data.clear();
        history.length = 0;
        history.data_start = String::new();
        history.data_stop = String::new();
        history.data_start_ts = 0;
        history.data_stop_ts = 0;
        assert!(history.validate(&ValidationRules::default()).is_ok());
    }

    #[test]
    fn test_pair_history_signal_families() {
        let mut history = pair_history();
        history.enter_long_signals = None;
        history.exit_long_signals = None;
        history.buy_signals = Some(4);
        history.sell_signals = Some(2);
        assert_eq!(history.signal_counts(), SignalCounts::Legacy { buy: 4, sell: 2 });

        history.buy_signals = None;
        history.sell_signals = None;
        assert_eq!(history.signal_counts(), SignalCounts::None);
        assert!(history.validate(&ValidationRules::default()).is_ok());

        let strict = ValidationRules {
            require_signal_family: true,
            ..ValidationRules::default()
        };
        assert!(matches!(history.validate(&strict), Err(ContractError::MissingSignalCounts)));
    }
}
