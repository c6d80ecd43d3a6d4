use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::account::{Account, AccountKind};
use crate::customer::{self, Customer};
use crate::money::Amount;
use crate::services;

const MENU: &str = "\nMenu:
1. Deposit
2. Withdraw
3. Display Balance
4. Calculate Interest (Savings only)
5. Manage Loans
6. Pay Bills
0. Exit";

/// Answers supplied on the command line. Anything missing, or present
/// but invalid, falls back to the interactive prompt.
#[derive(Debug, Default)]
pub struct Prefill {
    pub name: Option<String>,
    pub email: Option<String>,
}

/**
 * Drives one whole console session: collect the customer, then loop
 * over account creation and the transaction menu until the user
 * declines to switch accounts. Reader and writer are generic so tests
 * can run entire sessions against in-memory buffers.
 *
 * The only errors that escape are console I/O failures; every domain
 * rejection is printed and the session keeps going.
 */
pub fn run<R: BufRead, W: Write>(input: &mut R, output: &mut W, prefill: Prefill) -> Result<()> {
    let customer = collect_customer(input, output, prefill)?;
    debug!(
        name = customer.name(),
        email = customer.email(),
        "customer collected"
    );

    loop {
        let Some(mut account) = select_account(input, output, customer.clone())? else {
            // Nothing was created; go straight back to the type prompt.
            continue;
        };
        debug!(
            account = account.id(),
            owner = account.owner().name(),
            "account ready"
        );
        run_menu(input, output, &mut account)?;

        let answer = prompt(input, output, "Do you want to switch accounts? (yes/no): ")?;
        if !answer.eq_ignore_ascii_case("yes") {
            break;
        }
        debug!(account = account.id(), "account dropped for switch");
    }
    Ok(())
}

fn collect_customer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    mut prefill: Prefill,
) -> Result<Customer> {
    let name = loop {
        let candidate = match prefill.name.take() {
            Some(value) => value,
            None => prompt(input, output, "Enter customer name: ")?,
        };
        match customer::validate_name(&candidate) {
            Ok(()) => break candidate,
            Err(err) => writeln!(output, "{err}")?,
        }
    };
    let email = loop {
        let candidate = match prefill.email.take() {
            Some(value) => value,
            None => prompt(input, output, "Enter customer email: ")?,
        };
        match customer::validate_email(&candidate) {
            Ok(()) => break candidate,
            Err(err) => writeln!(output, "{err}")?,
        }
    };
    Ok(Customer::new(name, email))
}

/**
 * One pass of account creation. Returns None when no account came out
 * of it (bad type selector, bad rate); the caller decides to retry.
 */
fn select_account<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    owner: Customer,
) -> Result<Option<Account>> {
    match prompt_choice(input, output, "Enter account type (1: Savings, 2: Checking): ")? {
        1 => {
            let rate = prompt_amount(input, output, "Enter interest rate (max 12%): ")?;
            match Account::open(owner, AccountKind::Savings { interest_rate: rate }) {
                Ok(account) => Ok(Some(account)),
                Err(err) => {
                    warn!(%rate, "savings account rejected");
                    writeln!(output, "{err}")?;
                    Ok(None)
                }
            }
        }
        2 => match Account::open(owner, AccountKind::Checking) {
            Ok(account) => Ok(Some(account)),
            Err(err) => {
                writeln!(output, "{err}")?;
                Ok(None)
            }
        },
        other => {
            warn!(selection = other, "invalid account type");
            writeln!(output, "Invalid account type.")?;
            Ok(None)
        }
    }
}

fn run_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    account: &mut Account,
) -> Result<()> {
    loop {
        writeln!(output, "{MENU}")?;
        match prompt_choice(input, output, "Select an option: ")? {
            1 => {
                let amount = prompt_amount(input, output, "Enter deposit amount: ")?;
                match account.deposit(amount) {
                    Ok(balance) => {
                        debug!(account = account.id(), %balance, "deposit applied");
                        writeln!(output, "Deposited: {amount}")?;
                    }
                    Err(err) => {
                        warn!(account = account.id(), %amount, "deposit rejected");
                        writeln!(output, "{err}")?;
                    }
                }
            }
            2 => {
                let amount = prompt_amount(input, output, "Enter withdrawal amount: ")?;
                match account.withdraw(amount) {
                    Ok(balance) => {
                        debug!(account = account.id(), %balance, "withdrawal applied");
                        writeln!(output, "Withdrawn: {amount}")?;
                    }
                    Err(err) => {
                        warn!(account = account.id(), %amount, "withdrawal rejected");
                        writeln!(output, "{err}")?;
                    }
                }
            }
            3 => {
                writeln!(
                    output,
                    "{} Balance: {}",
                    account.kind().label(),
                    account.balance()
                )?;
            }
            4 => match account.interest() {
                Ok(interest) => writeln!(output, "Interest Earned: {interest}")?,
                Err(err) => writeln!(output, "{err}")?,
            },
            5 => writeln!(output, "{}", services::manage_loans())?,
            6 => writeln!(output, "{}", services::pay_bills())?,
            0 => {
                writeln!(output, "Exiting...")?;
                return Ok(());
            }
            other => {
                warn!(selection = other, "invalid menu option");
                writeln!(output, "Invalid option. Try again.")?;
            }
        }
    }
}

/// Numeric prompts re-ask until the line parses; malformed input never
/// reaches the account.
fn prompt_choice<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<i64> {
    loop {
        let line = prompt(input, output, text)?;
        match line.parse::<i64>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                warn!(input = %line, "rejected non-numeric selection");
                writeln!(output, "Invalid number. Try again.")?;
            }
        }
    }
}

fn prompt_amount<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Amount> {
    loop {
        let line = prompt(input, output, text)?;
        match Amount::parse(&line) {
            Ok(amount) => return Ok(amount),
            Err(err) => {
                warn!(input = %line, %err, "rejected malformed amount");
                writeln!(output, "Invalid number. Try again.")?;
            }
        }
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<String> {
    write!(output, "{text}")?;
    output.flush()?;
    read_line(input)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from console")?;
    if read == 0 {
        bail!("console input ended unexpectedly");
    }
    Ok(line.trim().to_string())
}
