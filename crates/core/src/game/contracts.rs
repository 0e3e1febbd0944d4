use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Stockpile;

/// A delivery order: hand in the required stockpile, collect the reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Resources consumed on fulfilment.
    #[serde(default)]
    pub require: Stockpile,
    /// Cash paid out.
    pub reward: u32,
}

impl Contract {
    /// Contract paying `reward` for `require`.
    pub fn new(require: Stockpile, reward: u32) -> Self {
        Self { require, reward }
    }

    /// True when `stockpile` covers the requirement.
    pub fn is_met_by(&self, stockpile: &Stockpile) -> bool {
        stockpile.covers(&self.require)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} C, {} W, {} S → ${}",
            self.require.concrete, self.require.wood, self.require.steel, self.reward
        )
    }
}

/// The contracts in play, offered one at a time and cycling forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractBook {
    contracts: Vec<Contract>,
    current: usize,
}

impl ContractBook {
    /// Book starting at the first contract.
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self {
            contracts,
            current: 0,
        }
    }

    /// The contract currently on offer.
    pub fn current(&self) -> Option<&Contract> {
        self.contracts.get(self.current)
    }

    /// One-based number of the current contract.
    pub fn number(&self) -> usize {
        self.current + 1
    }

    /// Pay out the current contract from `stockpile` and move on to the next
    /// one. Returns the reward, or `None` when the stockpile falls short.
    pub fn fulfil(&mut self, stockpile: &mut Stockpile) -> Option<u32> {
        let contract = self.current()?;
        let reward = contract.reward;
        if !stockpile.withdraw(&contract.require) {
            return None;
        }
        self.current = (self.current + 1) % self.contracts.len();
        Some(reward)
    }
}
