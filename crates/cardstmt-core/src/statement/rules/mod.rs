//! Value normalizers and the built-in bank pattern table.

pub mod account;
pub mod amounts;
pub mod banks;
pub mod dates;
pub mod patterns;

pub use account::{mask_account_number, MASK};
pub use amounts::{format_inr_amount, parse_amount};
pub use banks::builtin_definitions;
pub use dates::{parse_statement_date, DateOrder};
