use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::signal::SignalDirection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivePrices {
    pub usd: f64,
    pub php: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerValue {
    pub upper: f64,
    pub lower: f64,
}

/// Analysis block of an asset entry: either the signals or the reason they
/// could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Signals {
        rsi_value: f64,
        rsi_signal: SignalDirection,
        macd_signal: SignalDirection,
        bb_value: BollingerValue,
        bb_signal: SignalDirection,
    },
    Error {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    pub live_prices: Option<LivePrices>,
    pub analysis: Analysis,
}

impl AssetReport {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            live_prices: None,
            analysis: Analysis::Error {
                error: message.into(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.analysis, Analysis::Error { .. })
    }
}

/// Asset key → report, kept in the order entries were added.
///
/// Serializes as a JSON object whose keys follow insertion order, so the
/// response mirrors the trading-pair table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullReport {
    entries: Vec<(String, AssetReport)>,
}

impl FullReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add an entry. A repeated key replaces the earlier report in place.
    pub fn insert(&mut self, asset_id: impl Into<String>, report: AssetReport) {
        let asset_id = asset_id.into();
        match self.entries.iter_mut().find(|(key, _)| *key == asset_id) {
            Some((_, existing)) => *existing = report,
            None => self.entries.push((asset_id, report)),
        }
    }

    pub fn get(&self, asset_id: &str) -> Option<&AssetReport> {
        self.entries
            .iter()
            .find(|(key, _)| key == asset_id)
            .map(|(_, report)| report)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetReport)> {
        self.entries.iter().map(|(key, report)| (key.as_str(), report))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_failure()).count()
    }
}

impl Serialize for FullReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, report) in &self.entries {
            map.serialize_entry(key, report)?;
        }
        map.end()
    }
}
