//! Bank profiles and the read-only registry that holds them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::rules::banks::builtin_definitions;
use super::rules::dates::DateOrder;
use crate::error::RegistryError;
use crate::models::statement::Field;

/// Uncompiled bank profile, as written in code or a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDefinition {
    /// Stable bank key, e.g. "HDFC".
    pub key: String,

    /// Bank-name tokens that identify the issuer (case-insensitive, whole word).
    pub signatures: Vec<String>,

    /// Order the bank prints date components in.
    #[serde(default)]
    pub date_order: DateOrder,

    /// The five field patterns.
    pub patterns: PatternDefinitions,
}

/// Pattern sources for the five fields. All must be present to register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinitions {
    pub account_pattern: Option<String>,
    pub balance_pattern: Option<String>,
    pub due_date_pattern: Option<String>,
    pub credit_limit_pattern: Option<String>,
    pub statement_period_pattern: Option<String>,
}

impl PatternDefinitions {
    /// Pattern source for a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        let pattern = match field {
            Field::AccountNumber => &self.account_pattern,
            Field::StatementPeriod => &self.statement_period_pattern,
            Field::TotalBalance => &self.balance_pattern,
            Field::PaymentDueDate => &self.due_date_pattern,
            Field::CreditLimit => &self.credit_limit_pattern,
        };
        pattern.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Fields without a pattern.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

/// A compiled, validated bank profile.
#[derive(Debug, Clone)]
pub struct BankProfile {
    key: String,
    signatures: Vec<String>,
    signature_pattern: Regex,
    date_order: DateOrder,
    /// Indexed like [`Field::ALL`].
    patterns: [Regex; 5],
}

impl BankProfile {
    /// Compile and validate a definition. Fails unless all five patterns are
    /// present, compile, and declare the expected capture groups.
    pub fn compile(def: &BankDefinition) -> Result<Self, RegistryError> {
        let signatures: Vec<String> = def
            .signatures
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if signatures.is_empty() {
            return Err(RegistryError::NoSignatures(def.key.clone()));
        }

        let signature_pattern = compile_signatures(&signatures).map_err(|source| {
            RegistryError::InvalidPattern {
                bank: def.key.clone(),
                field: "signatures",
                source,
            }
        })?;

        let mut compiled = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            compiled.push(compile_field_pattern(&def.key, field, &def.patterns)?);
        }

        let patterns: [Regex; 5] = compiled
            .try_into()
            .map_err(|_| RegistryError::IncompletePattern {
                bank: def.key.clone(),
                field: "patterns",
            })?;

        Ok(Self {
            key: def.key.clone(),
            signatures,
            signature_pattern,
            date_order: def.date_order,
            patterns,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }

    /// Compiled pattern for a field.
    pub fn pattern(&self, field: Field) -> &Regex {
        let idx = match field {
            Field::AccountNumber => 0,
            Field::StatementPeriod => 1,
            Field::TotalBalance => 2,
            Field::PaymentDueDate => 3,
            Field::CreditLimit => 4,
        };
        &self.patterns[idx]
    }

    /// Whether any of the bank's signatures occurs in the text.
    pub fn matches_signature(&self, text: &str) -> bool {
        self.signature_pattern.is_match(text)
    }
}

fn compile_signatures(signatures: &[String]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = signatures
        .iter()
        .map(|s| {
            s.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();

    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
}

fn compile_field_pattern(
    bank: &str,
    field: Field,
    patterns: &PatternDefinitions,
) -> Result<Regex, RegistryError> {
    let source = patterns
        .get(field)
        .ok_or_else(|| RegistryError::IncompletePattern {
            bank: bank.to_string(),
            field: field.pattern_name(),
        })?;

    // Case-insensitive, `.` crosses line breaks
    let regex = Regex::new(&format!("(?is){}", source)).map_err(|e| RegistryError::InvalidPattern {
        bank: bank.to_string(),
        field: field.pattern_name(),
        source: e,
    })?;

    let found = regex.captures_len() - 1;
    if found != field.capture_groups() {
        return Err(RegistryError::UnexpectedGroups {
            bank: bank.to_string(),
            field: field.pattern_name(),
            expected: field.capture_groups(),
            found,
        });
    }

    Ok(regex)
}

/// Immutable set of bank profiles in identification precedence order.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    profiles: Vec<BankProfile>,
}

impl PatternRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding the built-in banks only.
    pub fn builtin() -> Self {
        Self::builder().with_builtin_banks().build()
    }

    /// Built-in banks followed by the configured extras. Extras that fail
    /// validation are skipped, so their statements stay unidentified.
    pub fn with_extra_banks(extra: &[BankDefinition]) -> Self {
        let mut builder = Self::builder().with_builtin_banks();
        for def in extra {
            if let Err(e) = builder.register(def) {
                warn!("Skipping bank profile {}: {}", def.key, e);
            }
        }
        builder.build()
    }

    /// Look up a profile by key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&BankProfile> {
        self.profiles.iter().find(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// Profiles in precedence order.
    pub fn profiles(&self) -> &[BankProfile] {
        &self.profiles
    }

    /// Registered bank keys in precedence order.
    pub fn keys(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collects validated profiles before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    profiles: Vec<BankProfile>,
}

impl RegistryBuilder {
    /// Register the built-in banks.
    pub fn with_builtin_banks(mut self) -> Self {
        for def in builtin_definitions() {
            // Built-in definitions are covered by tests; a failure here is a bug.
            match BankProfile::compile(&def) {
                Ok(profile) => self.profiles.push(profile),
                Err(e) => warn!("Built-in bank profile {} rejected: {}", def.key, e),
            }
        }
        self
    }

    /// Validate and append a bank profile.
    pub fn register(&mut self, def: &BankDefinition) -> Result<&mut Self, RegistryError> {
        if self.profiles.iter().any(|p| p.key.eq_ignore_ascii_case(&def.key)) {
            return Err(RegistryError::DuplicateBank(def.key.clone()));
        }

        let profile = BankProfile::compile(def)?;
        debug!("Registered bank profile {}", profile.key);
        self.profiles.push(profile);
        Ok(self)
    }

    pub fn build(self) -> PatternRegistry {
        PatternRegistry {
            profiles: self.profiles,
        }
    }
}
