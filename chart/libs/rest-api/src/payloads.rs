use serde::{Deserialize, Deserializer, Serialize};
use serde_urlencoded::to_string;
use tracing::trace;

use domain_model::timerange::Timerange;
use domain_model::{MarginMode, TradingMode};

use crate::error::{ContractError, Result};
use crate::validation::{check_date, check_not_empty, check_timeframe, ValidationRules};

/// Filter for pair discovery, absent fields mean no filter.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct AvailablePairPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake_currency: Option<String>,
}

impl AvailablePairPayload {
    pub fn to_query(&self) -> Result<String> {
        let query = to_string(self)?;
        trace!("Available pairs query: {query:?}");
        Ok(query)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PairCandlePayload {
    pub pair: String,
    pub timeframe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl PairCandlePayload {
    pub fn validate(&self) -> Result<()> {
        check_not_empty("pair", &self.pair)?;
        check_timeframe(&self.timeframe)?;
        if self.limit == Some(0) {
            return Err(ContractError::NonPositiveLimit);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CandleInfoPayload {
    pub pair: String,
    pub timeframe: String,
    pub date: String,
    /// `None` is sent as `null` and asks for every field. The key itself is required.
    #[serde(deserialize_with = "required_nullable")]
    pub filter: Option<String>,
}

fn required_nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

impl CandleInfoPayload {
    pub fn validate(&self) -> Result<()> {
        check_not_empty("pair", &self.pair)?;
        check_timeframe(&self.timeframe)?;
        check_date(&self.date)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PushComboPayload {
    pub pair: String,
    pub timeframe: String,
    pub date: String,
    pub side: String,
    pub combo_id: i64,
    pub confidence: f64,
    pub inner_side: String,
    pub is_bad: bool,
}

impl PushComboPayload {
    pub fn validate(&self, rules: &ValidationRules) -> Result<()> {
        check_not_empty("pair", &self.pair)?;
        check_timeframe(&self.timeframe)?;
        check_date(&self.date)?;
        check_not_empty("side", &self.side)?;
        check_not_empty("inner_side", &self.inner_side)?;
        rules.check_confidence(self.confidence)
    }

    /// Payload that removes the combo this payload pushes.
    pub fn removal(&self) -> RemoveComboPayload {
        RemoveComboPayload {
            pair: self.pair.clone(),
            timeframe: self.timeframe.clone(),
            date: self.date.clone(),
            side: self.side.clone(),
            combo_id: self.combo_id,
            inner_side: self.inner_side.clone(),
            is_bad: self.is_bad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RemoveComboPayload {
    pub pair: String,
    pub timeframe: String,
    pub date: String,
    pub side: String,
    pub combo_id: i64,
    pub inner_side: String,
    pub is_bad: bool,
}

impl RemoveComboPayload {
    pub fn validate(&self) -> Result<()> {
        check_not_empty("pair", &self.pair)?;
        check_timeframe(&self.timeframe)?;
        check_date(&self.date)?;
        check_not_empty("side", &self.side)?;
        check_not_empty("inner_side", &self.inner_side)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExchangeSelectPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_mode: Option<TradingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_mode: Option<MarginMode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PairHistoryPayload {
    #[serde(flatten)]
    pub exchange: ExchangeSelectPayload,
    pub pair: String,
    pub timeframe: String,
    pub timerange: String,
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freqaimodel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_mode: Option<bool>,
}

impl PairHistoryPayload {
    pub fn validate(&self) -> Result<()> {
        check_not_empty("pair", &self.pair)?;
        check_timeframe(&self.timeframe)?;
        check_not_empty("strategy", &self.strategy)?;
        self.parsed_timerange()?;
        Ok(())
    }

    pub fn parsed_timerange(&self) -> Result<Timerange> {
        self.timerange.parse()
            .map_err(|_| ContractError::InvalidTimerange(self.timerange.clone()))
    }
}
