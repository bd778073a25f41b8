use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("parse error: {field} {value:?}: {source}")]
    Parse {
        field: &'static str,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error("invalid size: {0}")]
    InvalidSize(Decimal),

    #[error("book not initialized, waiting for snapshot")]
    NotInitialized,
}
