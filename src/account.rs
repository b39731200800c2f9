use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

pub type AccountId = String;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must not be negative")]
    InvalidAmount,
    #[error("Insufficient funds")]
    InsufficientFunds,
}

/// One ledger entry. Id and owner are fixed at creation, the balance
/// only changes through [`Account::deposit`] and [`Account::withdraw`],
/// which keep it non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    owner_name: String,
    balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, owner_name: String, balance: Decimal) -> Self {
        Self {
            id,
            owner_name,
            balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::zero() {
            return Err(AccountError::InvalidAmount);
        }
        self.balance += amount;
        Ok(())
    }

    /// Validation happens before the balance moves, so a failed
    /// withdrawal leaves the account untouched.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::zero() {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(())
    }
}
