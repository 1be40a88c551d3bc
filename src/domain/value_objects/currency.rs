//! Currency amounts embedded in free-text item descriptions

use std::ops::AddAssign;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Item type that marks an inventory entry as money rather than goods
pub const CURRENCY_ITEM_TYPE: &str = "货币";

static GOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)金币").unwrap());
static SILVER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)银币").unwrap());
static COPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)铜币").unwrap());

/// Gold / silver / copper amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl CurrencyAmount {
    pub fn new(gold: u64, silver: u64, copper: u64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    /// Extract the first amount preceding each unit marker.
    ///
    /// Text without a marker yields zero for that denomination; repeated
    /// markers are not summed.
    pub fn parse(description: &str) -> Self {
        Self {
            gold: first_amount(&GOLD_RE, description),
            silver: first_amount(&SILVER_RE, description),
            copper: first_amount(&COPPER_RE, description),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.gold == 0 && self.silver == 0 && self.copper == 0
    }
}

impl AddAssign for CurrencyAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.gold = self.gold.saturating_add(rhs.gold);
        self.silver = self.silver.saturating_add(rhs.silver);
        self.copper = self.copper.saturating_add(rhs.copper);
    }
}

fn first_amount(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
