use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::SaleConfig;
use crate::phase::Phase;

/// Addresses approved for one gated phase, kept lowercase so membership
/// checks are case-insensitive.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Whitelist(BTreeSet<String>);

impl Whitelist {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Whitelist(
            addresses
                .into_iter()
                .map(|address| address.as_ref().trim().to_lowercase())
                .collect(),
        )
    }

    pub fn contains(&self, address: &str) -> bool {
        self.0.contains(&address.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Whitelist {
    fn from(addresses: Vec<String>) -> Self {
        Whitelist::new(addresses)
    }
}

impl From<Whitelist> for Vec<String> {
    fn from(whitelist: Whitelist) -> Self {
        whitelist.0.into_iter().collect()
    }
}

/// Whether `address` may mint during `phase` according to the loaded config.
/// FCFS reuses the second whitelist.
pub fn is_eligible(phase: Phase, address: &str, config: &SaleConfig) -> bool {
    match phase {
        Phase::Waiting => false,
        Phase::Whitelist1 => config.whitelist1.contains(address),
        Phase::Fcfs => config.whitelist2.contains(address),
        Phase::Public => true,
    }
}
