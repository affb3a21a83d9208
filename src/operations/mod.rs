mod deposit;

pub(crate) use deposit::{DepositOutcome, StakeDepositOperation};
