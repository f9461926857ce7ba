//! Issuing bank identification.

use tracing::debug;

use super::registry::{BankProfile, PatternRegistry};

/// Find the issuing bank by signature.
///
/// Profiles are tried in registry order and the first whose signature occurs
/// in the text wins, so text naming two banks resolves to the earlier one.
pub fn identify_bank<'r>(text: &str, registry: &'r PatternRegistry) -> Option<&'r BankProfile> {
    let found = registry
        .profiles()
        .iter()
        .find(|profile| profile.matches_signature(text));

    match found {
        Some(profile) => debug!("Identified bank {}", profile.key()),
        None => debug!("No bank signature in {} characters of text", text.len()),
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_case_insensitive() {
        let registry = PatternRegistry::builtin();
        let bank = identify_bank("Your Kotak Mahindra credit card", &registry);
        assert_eq!(bank.map(|b| b.key()), Some("KOTAK"));

        let bank = identify_bank("STATE BANK OF\nINDIA", &registry);
        assert_eq!(bank.map(|b| b.key()), Some("SBI"));
    }

    #[test]
    fn test_whole_word_only() {
        let registry = PatternRegistry::builtin();
        // "taxis" contains "axis", "sbin" contains "sbi"
        assert!(identify_bank("Airport taxis and SBIN codes", &registry).is_none());
    }

    #[test]
    fn test_glued_bank_names() {
        let registry = PatternRegistry::builtin();
        let cases = [
            ("Visit www.sbicard.com for details", "SBI"),
            ("HDFCBANK Credit Card Statement", "HDFC"),
            ("customer.care@icicibank.com", "ICICI"),
            ("https://www.axisbank.com/cards", "AXIS"),
            ("KOTAKBANK LTD", "KOTAK"),
            ("www.kotak.com", "KOTAK"),
        ];

        for (text, key) in cases {
            assert_eq!(identify_bank(text, &registry).map(|b| b.key()), Some(key), "{}", text);
        }
    }

    #[test]
    fn test_earlier_bank_wins() {
        let registry = PatternRegistry::builtin();
        let text = "Pay your Axis card from an HDFC account";
        assert_eq!(identify_bank(text, &registry).map(|b| b.key()), Some("HDFC"));
    }

    #[test]
    fn test_empty_text() {
        let registry = PatternRegistry::builtin();
        assert!(identify_bank("", &registry).is_none());
    }
}
