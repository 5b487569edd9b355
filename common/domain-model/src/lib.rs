use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};
use chrono::Duration;
use serde::{Deserialize, Serialize};

pub mod date;
pub mod timerange;

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Timeframe {
    pub amount: u32,
    pub unit: TimeframeUnit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimeframeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeframeUnit {
    fn suffix(&self) -> char {
        match self {
            TimeframeUnit::Second => 's',
            TimeframeUnit::Minute => 'm',
            TimeframeUnit::Hour => 'h',
            TimeframeUnit::Day => 'd',
            TimeframeUnit::Week => 'w',
            TimeframeUnit::Month => 'M',
        }
    }
}

impl Timeframe {
    pub fn new(amount: u32, unit: TimeframeUnit) -> Self {
        Self { amount, unit }
    }

    /// Candle length, `None` for calendar months.
    pub fn duration(&self) -> Option<Duration> {
        let amount = i64::from(self.amount);
        match self.unit {
            TimeframeUnit::Second => Some(Duration::seconds(amount)),
            TimeframeUnit::Minute => Some(Duration::minutes(amount)),
            TimeframeUnit::Hour => Some(Duration::hours(amount)),
            TimeframeUnit::Day => Some(Duration::days(amount)),
            TimeframeUnit::Week => Some(Duration::weeks(amount)),
            TimeframeUnit::Month => None,
        }
    }

    pub fn millis(&self) -> Option<i64> {
        self.duration().map(|duration| duration.num_milliseconds())
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Timeframe {
    type Err = Error;
    fn from_str(input: &str) -> Result<Timeframe, Self::Err> {
        let Some(suffix) = input.chars().last() else {
            bail!("Empty timeframe")
        };
        let unit = match suffix {
            's' => TimeframeUnit::Second,
            'm' => TimeframeUnit::Minute,
            'h' => TimeframeUnit::Hour,
            'd' => TimeframeUnit::Day,
            'w' => TimeframeUnit::Week,
            'M' => TimeframeUnit::Month,
            _ => bail!("Unknown timeframe: {input}")
        };
        let digits = &input[..input.len() - 1];
        if !digits.starts_with(|digit: char| ('1'..='9').contains(&digit))
            || !digits.chars().all(|char| char.is_ascii_digit()) {
            bail!("Unknown timeframe: {input}")
        }
        let amount: u32 = digits.parse()?;
        Ok(Timeframe::new(amount, unit))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(value: Timeframe) -> Self {
        value.to_string()
    }
}

/// Third element of a pair interval, names the candle series kind.
#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CandleType {
    #[serde(rename = "spot")]
    Spot,
    #[serde(rename = "futures")]
    Futures,
    #[serde(rename = "mark")]
    Mark,
    #[serde(rename = "index")]
    Index,
    #[serde(rename = "premiumIndex")]
    PremiumIndex,
    #[serde(rename = "funding_rate")]
    FundingRate,
}

impl fmt::Display for CandleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CandleType::Spot => "spot",
            CandleType::Futures => "futures",
            CandleType::Mark => "mark",
            CandleType::Index => "index",
            CandleType::PremiumIndex => "premiumIndex",
            CandleType::FundingRate => "funding_rate",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CandleType {
    type Err = Error;
    fn from_str(input: &str) -> Result<CandleType, Self::Err> {
        match input {
            "spot" => Ok(CandleType::Spot),
            "futures" => Ok(CandleType::Futures),
            "mark" => Ok(CandleType::Mark),
            "index" => Ok(CandleType::Index),
            "premiumIndex" => Ok(CandleType::PremiumIndex),
            "funding_rate" => Ok(CandleType::FundingRate),
            input => bail!("Unknown candle type: {input}")
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    Spot,
    Margin,
    Futures,
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

impl FromStr for TradingMode {
    type Err = Error;
    fn from_str(input: &str) -> Result<TradingMode, Self::Err> {
        match input {
            "spot" => Ok(TradingMode::Spot),
            "margin" => Ok(TradingMode::Margin),
            "futures" => Ok(TradingMode::Futures),
            input => bail!("Unknown trading mode: {input}")
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Copy)]
pub enum MarginMode {
    #[serde(rename = "")]
    None,
    #[serde(rename = "cross")]
    Cross,
    #[serde(rename = "isolated")]
    Isolated,
}

impl fmt::Display for MarginMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarginMode::None => Ok(()),
            MarginMode::Cross => write!(f, "cross"),
            MarginMode::Isolated => write!(f, "isolated"),
        }
    }
}

impl FromStr for MarginMode {
    type Err = Error;
    fn from_str(input: &str) -> Result<MarginMode, Self::Err> {
        match input {
            "" => Ok(MarginMode::None),
            "cross" => Ok(MarginMode::Cross),
            "isolated" => Ok(MarginMode::Isolated),
            input => bail!("Unknown margin mode: {input}")
        }
    }
}
