use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dtos::{AvailablePairResult, ComboFileResponse, MarkArea, PairHistory, SingleCandleInfo};
use crate::endpoints::{
    GET_AVAILABLE_PAIRS, POST_CANDLE_INFO, POST_PAIR_CANDLES, POST_PAIR_HISTORY, POST_PUSH_COMBO,
    POST_REMOVE_COMBO,
};
use crate::error::{ContractError, Result};
use crate::payloads::{
    AvailablePairPayload, CandleInfoPayload, PairCandlePayload, PairHistoryPayload,
    PushComboPayload, RemoveComboPayload,
};
use crate::validation::ValidationRules;

/// Every wire contract by name, for checking documents whose type is only known at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Contract {
    AvailablePairPayload,
    AvailablePairResult,
    PairCandlePayload,
    CandleInfoPayload,
    SingleCandleInfo,
    PushComboPayload,
    RemoveComboPayload,
    ComboFileResponse,
    PairHistoryPayload,
    PairHistory,
    MarkArea,
}

impl Contract {
    pub const ALL: [Contract; 11] = [
        Contract::AvailablePairPayload,
        Contract::AvailablePairResult,
        Contract::PairCandlePayload,
        Contract::CandleInfoPayload,
        Contract::SingleCandleInfo,
        Contract::PushComboPayload,
        Contract::RemoveComboPayload,
        Contract::ComboFileResponse,
        Contract::PairHistoryPayload,
        Contract::PairHistory,
        Contract::MarkArea,
    ];

    fn name(&self) -> &'static str {
        match self {
            Contract::AvailablePairPayload => "available-pair-payload",
            Contract::AvailablePairResult => "available-pair-result",
            Contract::PairCandlePayload => "pair-candle-payload",
            Contract::CandleInfoPayload => "candle-info-payload",
            Contract::SingleCandleInfo => "single-candle-info",
            Contract::PushComboPayload => "push-combo-payload",
            Contract::RemoveComboPayload => "remove-combo-payload",
            Contract::ComboFileResponse => "combo-file-response",
            Contract::PairHistoryPayload => "pair-history-payload",
            Contract::PairHistory => "pair-history",
            Contract::MarkArea => "mark-area",
        }
    }

    /// Endpoint that sends or returns this contract, `None` for embedded types.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Contract::AvailablePairPayload | Contract::AvailablePairResult => Some(GET_AVAILABLE_PAIRS),
            Contract::PairCandlePayload => Some(POST_PAIR_CANDLES),
            Contract::CandleInfoPayload | Contract::SingleCandleInfo => Some(POST_CANDLE_INFO),
            Contract::PushComboPayload => Some(POST_PUSH_COMBO),
            Contract::RemoveComboPayload => Some(POST_REMOVE_COMBO),
            Contract::PairHistoryPayload | Contract::PairHistory => Some(POST_PAIR_HISTORY),
            Contract::ComboFileResponse | Contract::MarkArea => None,
        }
    }

    /// Decodes `json` as this contract and runs its structural checks.
    pub fn validate_json(&self, json: &str, rules: &ValidationRules) -> Result<()> {
        debug!("Validating document as {self}");
        match self {
            Contract::AvailablePairPayload => decode::<AvailablePairPayload>(json).map(drop),
            Contract::AvailablePairResult => decode::<AvailablePairResult>(json)?.validate(),
            Contract::PairCandlePayload => decode::<PairCandlePayload>(json)?.validate(),
            Contract::CandleInfoPayload => decode::<CandleInfoPayload>(json)?.validate(),
            Contract::SingleCandleInfo => decode::<SingleCandleInfo>(json).map(drop),
            Contract::PushComboPayload => decode::<PushComboPayload>(json)?.validate(rules),
            Contract::RemoveComboPayload => decode::<RemoveComboPayload>(json)?.validate(),
            Contract::ComboFileResponse => decode::<ComboFileResponse>(json).map(drop),
            Contract::PairHistoryPayload => decode::<PairHistoryPayload>(json)?.validate(),
            Contract::PairHistory => decode::<PairHistory>(json)?.validate(rules),
            Contract::MarkArea => decode::<MarkArea>(json).map(drop),
        }
    }
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Contract {
    type Err = ContractError;
    fn from_str(input: &str) -> Result<Contract> {
        Contract::ALL.into_iter()
            .find(|contract| contract.name() == input)
            .ok_or_else(|| ContractError::UnknownContract(input.to_string()))
    }
}
