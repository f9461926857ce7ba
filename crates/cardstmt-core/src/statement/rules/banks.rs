//! Built-in bank profiles.
//!
//! Every pattern is compiled case-insensitive with `.` matching newlines, so
//! the `.*?` between an anchor and its value may cross line breaks. Amount and
//! account captures require at least one digit, so a stray separator after
//! an anchor is never captured on its own. Account captures stop at the first
//! four-digit group after a mask, or after four groups of a full number, so a
//! date or amount later on the same line is never read as the card suffix.

use super::dates::DateOrder;
use crate::statement::registry::{BankDefinition, PatternDefinitions};

struct BuiltinBank {
    key: &'static str,
    signatures: &'static [&'static str],
    account: &'static str,
    balance: &'static str,
    due_date: &'static str,
    credit_limit: &'static str,
    statement_period: &'static str,
}

impl BuiltinBank {
    fn definition(&self) -> BankDefinition {
        BankDefinition {
            key: self.key.to_string(),
            signatures: self.signatures.iter().map(|s| s.to_string()).collect(),
            date_order: DateOrder::DayMonthYear,
            patterns: PatternDefinitions {
                account_pattern: Some(self.account.to_string()),
                balance_pattern: Some(self.balance.to_string()),
                due_date_pattern: Some(self.due_date.to_string()),
                credit_limit_pattern: Some(self.credit_limit.to_string()),
                statement_period_pattern: Some(self.statement_period.to_string()),
            },
        }
    }
}

// Registry order is identification precedence.
const BUILTIN_BANKS: &[BuiltinBank] = &[
    BuiltinBank {
        key: "HDFC",
        signatures: &["hdfc", "hdfcbank", "housing development finance"],
        account: r"(?:Card Number|Card No\.?|Card ending(?:\s+in)?).*?([*X]{2,}(?:[ -]?[*X]{2,})*[ -]?\d{4}|\d{4}(?:[ -]?[*X\d]{4}){2,3})",
        balance: r"(?:Total Amount Due|Amount Due|Balance Due|Outstanding).*?₹?\s*(\d[\d,]*(?:\.\d+)?)",
        due_date: r"(?:Payment Due Date|Due Date).*?(\d{1,2}[-/ ](?:[A-Za-z]{3,9}|\d{1,2})[-/ ]\d{4})",
        credit_limit: r"(?:Credit Limit|Available Limit).*?₹?\s*(\d[\d,]*(?:\.\d+)?)",
        statement_period: r"(?:Statement Period|Bill(?:ing)? Period).*?(\d{1,2}[-/](?:[A-Za-z]{3}|\d{1,2})[-/]\d{4})\s*(?:to|-)\s*(\d{1,2}[-/](?:[A-Za-z]{3}|\d{1,2})[-/]\d{4})",
    },
    BuiltinBank {
        key: "ICICI",
        signatures: &["icici", "icicibank", "industrial credit and investment"],
        account: r"(?:Card No\.?|Card Number|Card ending(?:\s+in)?).*?([*X]{2,}(?:[ -]?[*X]{2,})*[ -]?\d{4}|\d{4}(?:[ -]?[*X\d]{4}){2,3})",
        balance: r"(?:Outstanding Amount|Total Due|Amount Due).*?(?:\bRs\.?|\bINR|₹)\s*(\d[\d,]*(?:\.\d+)?)",
        due_date: r"(?:Payment Due Date|Due Date|Payment Date).*?(\d{1,2}[/-]\d{1,2}[/-]\d{4})",
        credit_limit: r"(?:Available Credit Limit|Credit Limit).*?(?:\bRs\.?|\bINR|₹)\s*(\d[\d,]*(?:\.\d+)?)",
        statement_period: r"(?:Bill Period|Statement Period).*?(\d{1,2}[/-]\d{1,2}[/-]\d{4})\s*(?:to|-)\s*(\d{1,2}[/-]\d{1,2}[/-]\d{4})",
    },
    BuiltinBank {
        key: "SBI",
        signatures: &["sbi", "sbicard", "state bank of india"],
        account: r"(?:Credit Card Number|Card No\.?|Card Number).*?([*X]{2,}(?:[ -]?[*X]{2,})*[ -]?\d{4}|\d{4}(?:[ -]?[*X\d]{4}){2,3})",
        balance: r"(?:Total Amount Payable|Outstanding|Total Due).*?(?:\bRs\.?|\bINR|₹)\s*(\d[\d,]*(?:\.\d+)?)",
        due_date: r"(?:Payment Due By|Payment Due Date|Due Date).*?(\d{1,2}-\d{1,2}-\d{4})",
        credit_limit: r"(?:Total Credit Limit|Credit Limit).*?(?:\bRs\.?|\bINR|₹)\s*(\d[\d,]*(?:\.\d+)?)",
        statement_period: r"(?:Statement Period|Bill Period|Statement Date).*?(\d{1,2}-\d{1,2}-\d{4})\s*(?:to|-)\s*(\d{1,2}-\d{1,2}-\d{4})",
    },
    BuiltinBank {
        key: "AXIS",
        signatures: &["axis", "axisbank"],
        account: r"(?:Card Number|Card No\.?).*?([*X]{2,}(?:[ -]?[*X]{2,})*[ -]?\d{4}|\d{4}(?:[ -]?[*X\d]{4}){2,3})",
        balance: r"(?:Amount Due|Total Outstanding).*?(?:\bRs\.?|\bINR|₹)\s*(\d[\d,]*(?:\.\d+)?)",
        due_date: r"(?:Payment Due Date|Due Date|Payment Date).*?(\d{1,2}/\d{1,2}/\d{4})",
        credit_limit: r"(?:Credit Limit|Available Limit).*?(?:\bRs\.?|\bINR|₹)\s*(\d[\d,]*(?:\.\d+)?)",
        statement_period: r"(?:Statement Period|Bill Date).*?(\d{1,2}/\d{1,2}/\d{4})\s*(?:to|-)\s*(\d{1,2}/\d{1,2}/\d{4})",
    },
    BuiltinBank {
        key: "KOTAK",
        signatures: &["kotak", "kotakbank"],
        account: r"(?:Card No\.?|Card Number).*?([*X]{2,}(?:[ -]?[*X]{2,})*[ -]?\d{4}|\d{4}(?:[ -]?[*X\d]{4}){2,3})",
        balance: r"(?:Total Outstanding|Amount Due).*?(?:₹|\bRs\.?)\s*(\d[\d,]*(?:\.\d+)?)",
        due_date: r"(?:Payment Due Date|Payment Due|Due Date).*?(\d{1,2}[- ][A-Za-z]{3,9}[- ]\d{4}|\d{1,2}[-/]\d{1,2}[-/]\d{4})",
        credit_limit: r"(?:Credit Limit|Available Credit).*?(?:₹|\bRs\.?)\s*(\d[\d,]*(?:\.\d+)?)",
        statement_period: r"(?:Bill Date|Statement Period).*?(\d{1,2}-[A-Za-z]{3}-\d{4})\s*(?:to|-)\s*(\d{1,2}-[A-Za-z]{3}-\d{4})",
    },
];

/// Definitions of the banks supported out of the box, in precedence order.
pub fn builtin_definitions() -> Vec<BankDefinition> {
    BUILTIN_BANKS.iter().map(BuiltinBank::definition).collect()
}
