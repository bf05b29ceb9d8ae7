use serde::{Deserialize, Serialize};
use std::fmt;

/// The subscription tier an account was purchased under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Plan {
    Standard,
    Advanced,
    Dynasty,
}

impl Plan {
    /// Every plan, in catalog order.
    pub const ALL: [Plan; 3] = [Plan::Standard, Plan::Advanced, Plan::Dynasty];
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Plan::Standard => "Standard",
            Plan::Advanced => "Advanced",
            Plan::Dynasty => "Dynasty",
        };
        f.write_str(name)
    }
}

/// The lifecycle stage of a simulated trading account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Evaluation,
    Funded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Evaluation => f.write_str("Evaluation"),
            Stage::Funded => f.write_str("Funded"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Active,
    /// A risk rule (max drawdown or daily loss limit) was breached.
    Violated,
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Active => "Active",
            Status::Violated => "Violated",
            Status::Closed => "Closed",
        };
        f.write_str(name)
    }
}

/// The fixed intraday session buckets used for the session breakdown.
///
/// The declaration order is the canonical order: rankings reduce over
/// [`Session::ALL`], and the derived `Ord` keeps `BTreeMap` keys in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Session {
    PreMarket,
    Morning,
    Lunch,
    Afternoon,
}

impl Session {
    pub const ALL: [Session; 4] = [
        Session::PreMarket,
        Session::Morning,
        Session::Lunch,
        Session::Afternoon,
    ];

    /// Maps an exchange-local hour of day onto its session bucket.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=8 => Session::PreMarket,
            9..=11 => Session::Morning,
            12..=13 => Session::Lunch,
            _ => Session::Afternoon,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Session::PreMarket => "Pre-Market",
            Session::Morning => "Morning",
            Session::Lunch => "Lunch",
            Session::Afternoon => "Afternoon",
        };
        f.write_str(name)
    }
}

/// The five weekdays the futures markets are traded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl TradingDay {
    pub const ALL: [TradingDay; 5] = [
        TradingDay::Monday,
        TradingDay::Tuesday,
        TradingDay::Wednesday,
        TradingDay::Thursday,
        TradingDay::Friday,
    ];

    /// Returns `None` for weekend days.
    pub fn from_weekday(weekday: chrono::Weekday) -> Option<Self> {
        match weekday {
            chrono::Weekday::Mon => Some(TradingDay::Monday),
            chrono::Weekday::Tue => Some(TradingDay::Tuesday),
            chrono::Weekday::Wed => Some(TradingDay::Wednesday),
            chrono::Weekday::Thu => Some(TradingDay::Thursday),
            chrono::Weekday::Fri => Some(TradingDay::Friday),
            chrono::Weekday::Sat | chrono::Weekday::Sun => None,
        }
    }
}

impl fmt::Display for TradingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TradingDay::Monday => "Monday",
            TradingDay::Tuesday => "Tuesday",
            TradingDay::Wednesday => "Wednesday",
            TradingDay::Thursday => "Thursday",
            TradingDay::Friday => "Friday",
        };
        f.write_str(name)
    }
}
