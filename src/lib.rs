#![doc(test(attr(deny(warnings))))]

//! Accounts Core models personal financial accounts and the transactions
//! that move money through them, deriving balances and per-variant metrics
//! on demand from a shared transaction ledger.

pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Accounts Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
