use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::customer::Customer;
use crate::money::Amount;

/// Largest amount a single withdrawal may move. Applies per call;
/// nothing is accumulated across calls.
pub const WITHDRAWAL_CEILING: Amount = Amount::from_units(1_000_000);

/// Savings interest rates are percentages in [0, 12].
pub const MAX_INTEREST_RATE: Amount = Amount::from_units(12);

/**
 * Every rule the account can refuse an operation over, worded exactly
 * as the console reports it. A rejected operation never touches the
 * balance.
 */
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Deposit amount must be positive.")]
    NonPositiveDeposit,
    #[error("Withdrawal amount must be between 1 and 10,00,000.")]
    WithdrawalOutOfRange,
    #[error("Insufficient funds.")]
    InsufficientFunds,
    #[error("Interest calculation available for Savings Account only.")]
    InterestNotApplicable,
    #[error("Invalid interest rate. Must be between 0 and 12.")]
    InvalidInterestRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Savings { interest_rate: Amount },
    Checking,
}

impl AccountKind {
    fn id_prefix(self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "SA",
            AccountKind::Checking => "CA",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "Savings Account",
            AccountKind::Checking => "Checking Account",
        }
    }
}

/**
 * The one live account of a session segment. Balance starts at zero,
 * stays non-negative, and only moves through deposit and withdraw.
 */
#[derive(Debug)]
pub struct Account {
    id: String,
    owner: Customer,
    balance: Amount,
    kind: AccountKind,
}

impl Account {
    /**
     * Opens an account for `owner`. Savings accounts validate their
     * interest rate here; an out-of-range rate yields no account at
     * all. Ids are best-effort unique: variant prefix plus the epoch
     * milliseconds at creation.
     */
    pub fn open(owner: Customer, kind: AccountKind) -> Result<Account, AccountError> {
        if let AccountKind::Savings { interest_rate } = kind {
            if interest_rate < Amount::ZERO || interest_rate > MAX_INTEREST_RATE {
                return Err(AccountError::InvalidInterestRate);
            }
        }
        let id = format!("{}{}", kind.id_prefix(), Utc::now().timestamp_millis());
        debug!(account = %id, owner = owner.name(), "opened account");
        Ok(Account {
            id,
            owner,
            balance: Amount::ZERO,
            kind,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &Customer {
        &self.owner
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Adds `amount` to the balance and returns the new balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<Amount, AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::NonPositiveDeposit);
        }
        self.balance += amount;
        Ok(self.balance)
    }

    /// Removes `amount` from the balance and returns the new balance.
    /// Rejects amounts outside (0, ceiling] before even looking at the
    /// balance, so the two failure messages stay distinct.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount, AccountError> {
        if !amount.is_positive() || amount > WITHDRAWAL_CEILING {
            return Err(AccountError::WithdrawalOutOfRange);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(self.balance)
    }

    /**
     * Interest earned at the account's rate, as a pure query. Checking
     * accounts answer with an explicit not-applicable error instead of
     * pretending to a rate they do not have.
     */
    pub fn interest(&self) -> Result<Amount, AccountError> {
        match self.kind {
            AccountKind::Savings { interest_rate } => Ok(self.balance.percent_of(interest_rate)),
            AccountKind::Checking => Err(AccountError::InterestNotApplicable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPOSIT_1000: Amount = Amount::from_units(1000);
    const WITHDRAW_200: Amount = Amount::from_units(200);

    fn owner() -> Customer {
        Customer::new("Ada Lovelace", "ada@example.com")
    }

    fn savings(rate_units: i64) -> Account {
        Account::open(
            owner(),
            AccountKind::Savings {
                interest_rate: Amount::from_units(rate_units),
            },
        )
        .expect("rate is within bounds")
    }

    fn checking() -> Account {
        Account::open(owner(), AccountKind::Checking).expect("checking accounts always open")
    }

    mod opening {
        use super::*;

        #[test]
        fn savings_id_is_prefixed() {
            assert!(savings(5).id().starts_with("SA"));
        }

        #[test]
        fn checking_id_is_prefixed() {
            assert!(checking().id().starts_with("CA"));
        }

        #[test]
        fn balance_starts_at_zero() {
            assert_eq!(savings(5).balance(), Amount::ZERO);
        }

        #[test]
        fn boundary_rates_accepted() {
            for rate in [0, 12] {
                let account = Account::open(
                    owner(),
                    AccountKind::Savings {
                        interest_rate: Amount::from_units(rate),
                    },
                );
                assert!(account.is_ok());
            }
        }

        #[test]
        fn rate_above_twelve_rejected() {
            let account = Account::open(
                owner(),
                AccountKind::Savings {
                    interest_rate: Amount::from_units(15),
                },
            );
            assert_eq!(account.unwrap_err(), AccountError::InvalidInterestRate);
        }

        #[test]
        fn negative_rate_rejected() {
            let account = Account::open(
                owner(),
                AccountKind::Savings {
                    interest_rate: Amount::from_units(-1),
                },
            );
            assert_eq!(account.unwrap_err(), AccountError::InvalidInterestRate);
        }
    }

    mod deposits {
        use super::*;

        #[test]
        fn deposit_adds_to_balance() {
            let mut account = savings(5);
            assert_eq!(account.deposit(DEPOSIT_1000), Ok(DEPOSIT_1000));
            assert_eq!(account.balance(), DEPOSIT_1000);
        }

        #[test]
        fn deposits_accumulate() {
            let mut account = checking();
            account.deposit(DEPOSIT_1000).unwrap();
            account.deposit(WITHDRAW_200).unwrap();
            assert_eq!(account.balance(), Amount::from_units(1200));
        }

        #[test]
        fn zero_deposit_rejected() {
            let mut account = savings(5);
            assert_eq!(
                account.deposit(Amount::ZERO),
                Err(AccountError::NonPositiveDeposit)
            );
            assert_eq!(account.balance(), Amount::ZERO);
        }

        #[test]
        fn negative_deposit_rejected() {
            let mut account = savings(5);
            assert_eq!(
                account.deposit(Amount::from_units(-50)),
                Err(AccountError::NonPositiveDeposit)
            );
            assert_eq!(account.balance(), Amount::ZERO);
        }
    }

    mod withdrawals {
        use super::*;

        #[test]
        fn withdrawal_subtracts_from_balance() {
            let mut account = savings(5);
            account.deposit(DEPOSIT_1000).unwrap();
            assert_eq!(account.withdraw(WITHDRAW_200), Ok(Amount::from_units(800)));
            assert_eq!(account.balance(), Amount::from_units(800));
        }

        #[test]
        fn zero_withdrawal_rejected() {
            let mut account = savings(5);
            account.deposit(DEPOSIT_1000).unwrap();
            assert_eq!(
                account.withdraw(Amount::ZERO),
                Err(AccountError::WithdrawalOutOfRange)
            );
            assert_eq!(account.balance(), DEPOSIT_1000);
        }

        #[test]
        fn negative_withdrawal_rejected() {
            let mut account = savings(5);
            account.deposit(DEPOSIT_1000).unwrap();
            assert_eq!(
                account.withdraw(Amount::from_units(-10)),
                Err(AccountError::WithdrawalOutOfRange)
            );
            assert_eq!(account.balance(), DEPOSIT_1000);
        }

        #[test]
        fn withdrawal_above_ceiling_rejected() {
            let mut account = checking();
            assert_eq!(
                account.withdraw(Amount::from_units(1_500_000)),
                Err(AccountError::WithdrawalOutOfRange)
            );
            assert_eq!(account.balance(), Amount::ZERO);
        }

        #[test]
        fn withdrawal_at_ceiling_allowed() {
            let mut account = checking();
            account.deposit(WITHDRAWAL_CEILING).unwrap();
            assert_eq!(account.withdraw(WITHDRAWAL_CEILING), Ok(Amount::ZERO));
        }

        #[test]
        fn ceiling_is_per_call_not_cumulative() {
            let mut account = checking();
            account.deposit(WITHDRAWAL_CEILING).unwrap();
            account.deposit(WITHDRAWAL_CEILING).unwrap();
            account.withdraw(WITHDRAWAL_CEILING).unwrap();
            assert_eq!(account.withdraw(WITHDRAWAL_CEILING), Ok(Amount::ZERO));
        }

        #[test]
        fn insufficient_funds_leaves_balance() {
            let mut account = savings(5);
            account.deposit(WITHDRAW_200).unwrap();
            assert_eq!(
                account.withdraw(DEPOSIT_1000),
                Err(AccountError::InsufficientFunds)
            );
            assert_eq!(account.balance(), WITHDRAW_200);
        }
    }

    mod interest {
        use super::*;

        #[test]
        fn savings_interest_is_balance_times_rate() {
            let mut account = savings(5);
            account.deposit(DEPOSIT_1000).unwrap();
            assert_eq!(account.interest(), Ok(Amount::from_units(50)));
        }

        #[test]
        fn interest_does_not_mutate_balance() {
            let mut account = savings(5);
            account.deposit(DEPOSIT_1000).unwrap();
            account.interest().unwrap();
            account.interest().unwrap();
            assert_eq!(account.balance(), DEPOSIT_1000);
        }

        #[test]
        fn fractional_rate() {
            let mut account = Account::open(
                owner(),
                AccountKind::Savings {
                    interest_rate: Amount::parse("5.5").unwrap(),
                },
            )
            .unwrap();
            account.deposit(WITHDRAW_200).unwrap();
            assert_eq!(account.interest(), Ok(Amount::from_units(11)));
        }

        #[test]
        fn checking_interest_not_applicable() {
            let mut account = checking();
            account.deposit(DEPOSIT_1000).unwrap();
            assert_eq!(account.interest(), Err(AccountError::InterestNotApplicable));
        }

        #[test]
        fn deposit_withdraw_interest_scenario() {
            let mut account = savings(5);
            account.deposit(DEPOSIT_1000).unwrap();
            account.withdraw(WITHDRAW_200).unwrap();
            assert_eq!(account.balance(), Amount::from_units(800));
            assert_eq!(account.interest(), Ok(Amount::from_units(40)));
        }
    }
}
