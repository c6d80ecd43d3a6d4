//! Placeholder menu services. Loan management and bill payment exist
//! as menu entries only; each prints a fixed notice and touches no
//! account state.

pub fn manage_loans() -> &'static str {
    "Managing loan services..."
}

pub fn pay_bills() -> &'static str {
    "Managing bill payment services..."
}
