use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountError, AccountId},
    storage::{self, AccountRow, StorageError},
};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Account `{0}` not found")]
    AccountNotFound(AccountId),
    #[error("Cannot transfer to the same account")]
    InvalidTransfer,
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Directory of all accounts plus the durable state file that mirrors it.
///
/// Ids are allocated from a per-instance counter, so independent `Bank`
/// values over different files never interfere. Every successful
/// mutation rewrites the whole state file; nothing is persisted when an
/// operation fails.
#[derive(Debug)]
pub struct Bank {
    accounts: HashMap<AccountId, Account>,
    // state-file row order: file order on load, appends at the end
    order: Vec<AccountId>,
    next_id: u64,
    state_path: PathBuf,
}

impl Bank {
    /// Opens the ledger backed by `state_path`. An existing state file is
    /// loaded in file order and the id counter resumes past the largest
    /// id on record; a missing file means an empty ledger.
    pub fn open(state_path: impl Into<PathBuf>) -> Result<Self, BankError> {
        let state_path = state_path.into();
        let mut bank = Self {
            accounts: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            state_path,
        };
        if bank.state_path.exists() {
            bank.load()?;
        }
        Ok(bank)
    }

    fn load(&mut self) -> Result<(), BankError> {
        self.accounts.clear();
        self.order.clear();
        let mut max_id = 0u64;
        for row in storage::read_rows(&self.state_path)? {
            let numeric: u64 = row
                .account_id
                .parse()
                .ok()
                .filter(|id| *id > 0)
                .ok_or(StorageError::MalformedId {
                    id: row.account_id.clone(),
                })?;
            max_id = max_id.max(numeric);
            let account = Account::new(row.account_id.clone(), row.owner_name, row.balance);
            // a repeated id keeps its first position, last row wins
            if self.accounts.insert(row.account_id.clone(), account).is_none() {
                self.order.push(row.account_id);
            }
        }
        self.next_id = max_id + 1;
        info!(
            accounts = self.order.len(),
            next_id = self.next_id,
            "Loaded ledger state"
        );
        Ok(())
    }

    fn persist(&self) -> Result<(), BankError> {
        storage::write_rows(
            &self.state_path,
            self.accounts_in_order().map(|acc| AccountRow {
                account_id: acc.id().to_string(),
                owner_name: acc.owner_name().to_string(),
                balance: acc.balance(),
            }),
        )?;
        Ok(())
    }

    /// Accounts in state-file row order.
    pub fn accounts_in_order(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|id| self.accounts.get(id))
    }

    pub fn create_account(
        &mut self,
        owner_name: &str,
        starting_balance: Decimal,
    ) -> Result<AccountId, BankError> {
        if starting_balance < Decimal::zero() {
            return Err(AccountError::InvalidAmount.into());
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        let account = Account::new(id.clone(), owner_name.to_string(), starting_balance);
        self.accounts.insert(id.clone(), account);
        self.order.push(id.clone());
        self.persist()?;
        debug!(account_id = %id, owner_name, "Created account");
        Ok(id)
    }

    pub fn get_account(&self, id: &str) -> Result<&Account, BankError> {
        self.accounts
            .get(id)
            .ok_or_else(|| BankError::AccountNotFound(id.to_string()))
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| BankError::AccountNotFound(id.to_string()))
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), BankError> {
        self.account_mut(id)?.deposit(amount)?;
        self.persist()?;
        debug!(account_id = id, %amount, "Deposit");
        Ok(())
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), BankError> {
        self.account_mut(id)?.withdraw(amount)?;
        self.persist()?;
        debug!(account_id = id, %amount, "Withdrawal");
        Ok(())
    }

    /// Moves `amount` between two distinct accounts as one atomic step:
    /// both legs are validated before either balance changes and the
    /// state file is rewritten once, after both.
    pub fn transfer(&mut self, from_id: &str, to_id: &str, amount: Decimal) -> Result<(), BankError> {
        if from_id == to_id {
            return Err(BankError::InvalidTransfer);
        }
        if !self.accounts.contains_key(to_id) {
            return Err(BankError::AccountNotFound(to_id.to_string()));
        }
        self.account_mut(from_id)?.withdraw(amount)?;
        // the source leg already checked the amount's sign
        self.account_mut(to_id)?.deposit(amount)?;
        self.persist()?;
        debug!(from_id, to_id, %amount, "Transfer");
        Ok(())
    }

    pub fn check_balance(&self, id: &str) -> Result<Decimal, BankError> {
        Ok(self.get_account(id)?.balance())
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}
