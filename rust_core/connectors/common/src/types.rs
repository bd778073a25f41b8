pub use book_store::{RawChange, RawLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inbound level-2 feed messages, tagged by their `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedMessage {
    Snapshot {
        #[serde(default)]
        product_id: Option<String>,
        asks: Vec<RawLevel>,
        bids: Vec<RawLevel>,
    },
    L2update {
        #[serde(default)]
        product_id: Option<String>,
        changes: Vec<RawChange>,
    },
    Subscriptions {
        #[serde(default)]
        channels: serde_json::Value,
    },
    Error {
        #[serde(default)]
        message: String,
        #[serde(default)]
        reason: Option<String>,
    },
    #[serde(other)]
    Other,
}

impl FeedMessage {
    pub fn product_id(&self) -> Option<&str> {
        match self {
            FeedMessage::Snapshot { product_id, .. } | FeedMessage::L2update { product_id, .. } => {
                product_id.as_deref()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSpec {
    pub name: String,
    pub product_ids: Vec<String>,
}

/// Outbound subscribe request, sent once the socket is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub channels: Vec<ChannelSpec>,
}

impl SubscribeMessage {
    pub fn level2(pair: &str) -> Self {
        SubscribeMessage {
            kind: "subscribe".to_string(),
            channels: vec![ChannelSpec {
                name: "level2".to_string(),
                product_ids: vec![pair.to_string()],
            }],
        }
    }
}

/// Lending-rate document: one record per listed token.
#[derive(Debug, Clone, Deserialize)]
pub struct RateDocument {
    #[serde(rename = "cToken", default)]
    pub tokens: Vec<TokenRate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRate {
    pub underlying_symbol: String,
    pub supply_rate: RateValue,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateValue {
    pub value: Decimal,
}

/// Annual supply rates for the two assets of the pair, as fractions
/// (0.02 is 2%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatePair {
    pub base: Decimal,
    pub quote: Decimal,
}
