//! Balance oracle — the fungible token ledger as seen by the governance core.
//!
//! The core consumes balances, it never maintains them. Every engine depends
//! only on the [`BalanceOracle`] trait; the token ledger itself (transfers,
//! minting, burning) lives outside this workspace. [`StaticBalances`] is a
//! map-backed implementation for tests and simple embeddings.

use curia_types::{Identity, TokenAmount};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("balance oracle unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of the voting-token ledger.
///
/// Any error from this interface is fatal to the calling operation: the
/// engines abort the triggering call and retry nothing.
pub trait BalanceOracle {
    /// Current token balance of `account`. Unknown accounts hold zero.
    fn balance_of(&self, account: &Identity) -> Result<TokenAmount, OracleError>;

    /// Total token supply, the denominator of every quorum check.
    fn total_supply(&self) -> Result<TokenAmount, OracleError>;
}

/// An in-memory oracle with fixed balances.
#[derive(Clone, Debug, Default)]
pub struct StaticBalances {
    balances: HashMap<Identity, TokenAmount>,
    total_supply: TokenAmount,
}

impl StaticBalances {
    pub fn new(total_supply: TokenAmount) -> Self {
        Self {
            balances: HashMap::new(),
            total_supply,
        }
    }

    /// Set an account's balance. Does not adjust `total_supply`; the two are
    /// independent so tests can model supply held outside the voter set.
    pub fn set_balance(&mut self, account: impl Into<Identity>, amount: TokenAmount) {
        self.balances.insert(account.into(), amount);
    }

    pub fn set_total_supply(&mut self, amount: TokenAmount) {
        self.total_supply = amount;
    }
}

impl BalanceOracle for StaticBalances {
    fn balance_of(&self, account: &Identity) -> Result<TokenAmount, OracleError> {
        Ok(self.balances.get(account).copied().unwrap_or(0))
    }

    fn total_supply(&self) -> Result<TokenAmount, OracleError> {
        Ok(self.total_supply)
    }
}

/// An oracle that is always down. Every engine must abort the triggering
/// operation on oracle failure without committing anything; this double
/// exists so tests can prove that.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableOracle;

impl BalanceOracle for UnavailableOracle {
    fn balance_of(&self, _account: &Identity) -> Result<TokenAmount, OracleError> {
        Err(OracleError::Unavailable("oracle offline".into()))
    }

    fn total_supply(&self) -> Result<TokenAmount, OracleError> {
        Err(OracleError::Unavailable("oracle offline".into()))
    }
}
