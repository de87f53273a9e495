use serde::Serialize;

/// Exchange symbol paired with the canonical asset key used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradingPair {
    /// Exchange notation, e.g. `BTC/USDT`
    pub symbol: &'static str,
    /// Cross-provider identifier, e.g. `bitcoin`
    pub asset_id: &'static str,
}

impl TradingPair {
    pub const fn new(symbol: &'static str, asset_id: &'static str) -> Self {
        Self { symbol, asset_id }
    }

    /// Symbol without the separator, as spot exchanges expect it (`BTCUSDT`)
    pub fn exchange_symbol(&self) -> String {
        self.symbol.replace('/', "")
    }
}
