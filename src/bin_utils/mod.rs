//! This module could be a separate crate on its own, to bootstrap [`crate::bank`]
//! within the binary, but keeping it here lets the integration test drive the
//! menu with scripted input.

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::bank::Bank;

const MENU: &str = "
Simple Banking System
1. Create Account
2. Deposit
3. Withdraw
4. Transfer
5. Check Balance
6. Exit
(Type 'exit' or 'quit' anytime to leave)
> ";

enum Flow {
    Continue,
    Exit,
}

/// Line-based menu over the five [`Bank`] operations. Domain errors are
/// echoed as `Error: <message>` and the loop keeps going; only the exit
/// commands and end of input end the session.
pub struct Shell<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub bank: Bank,
}

impl<'w, R, W> Shell<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                return Ok(());
            };
            if let Flow::Exit = self.dispatch(&choice.to_lowercase())? {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.create_account(),
            "2" => self.deposit(),
            "3" => self.withdraw(),
            "4" => self.transfer(),
            "5" => self.check_balance(),
            "6" | "exit" | "quit" => {
                writeln!(self.output, "Goodbye!")?;
                Ok(Flow::Exit)
            }
            _ => {
                writeln!(
                    self.output,
                    "Invalid option. Please choose 1-6, or type 'exit' to quit."
                )?;
                Ok(Flow::Continue)
            }
        }
    }

    fn create_account(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Owner Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("Starting Balance: ")? else {
            return Ok(Flow::Exit);
        };
        let balance = match raw.parse::<Decimal>() {
            Ok(balance) => balance,
            Err(err) => return self.report(err),
        };
        match self.bank.create_account(&name, balance) {
            Ok(id) => {
                writeln!(self.output, "Account created: ID {id}")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    fn deposit(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Account ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("Deposit Amount: ")? else {
            return Ok(Flow::Exit);
        };
        let amount = match raw.parse::<Decimal>() {
            Ok(amount) => amount,
            Err(err) => return self.report(err),
        };
        match self.bank.deposit(&id, amount) {
            Ok(()) => {
                writeln!(self.output, "Deposit successful.")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    fn withdraw(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Account ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("Withdraw Amount: ")? else {
            return Ok(Flow::Exit);
        };
        let amount = match raw.parse::<Decimal>() {
            Ok(amount) => amount,
            Err(err) => return self.report(err),
        };
        match self.bank.withdraw(&id, amount) {
            Ok(()) => {
                writeln!(self.output, "Withdrawal successful.")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    fn transfer(&mut self) -> Result<Flow> {
        let Some(from) = self.prompt("From Account ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(to) = self.prompt("To Account ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("Transfer Amount: ")? else {
            return Ok(Flow::Exit);
        };
        let amount = match raw.parse::<Decimal>() {
            Ok(amount) => amount,
            Err(err) => return self.report(err),
        };
        match self.bank.transfer(&from, &to, amount) {
            Ok(()) => {
                writeln!(self.output, "Transfer successful.")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    fn check_balance(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Account ID: ")? else {
            return Ok(Flow::Exit);
        };
        match self.bank.check_balance(&id) {
            Ok(balance) => {
                writeln!(self.output, "Current balance: {balance}")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(err),
        }
    }

    /// Writes the prompt and reads one trimmed line; `None` means the
    /// input reached end of file.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: impl std::fmt::Display) -> Result<Flow> {
        writeln!(self.output, "Error: {err}")?;
        Ok(Flow::Continue)
    }
}
