//! Network identifiers

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SelectionError;

/// The three logical networks a node can join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Network {
    /// Production network
    #[default]
    #[serde(rename = "main")]
    Production,
    /// Public test network
    #[serde(rename = "test")]
    PublicTest,
    /// Local regression test network
    #[serde(rename = "regtest")]
    RegressionTest,
}

impl Network {
    /// Every network, in specialization order.
    pub const ALL: [Network; 3] = [
        Network::Production,
        Network::PublicTest,
        Network::RegressionTest,
    ];

    /// Short name used in logs, config files and `--network`.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Production => "main",
            Network::PublicTest => "test",
            Network::RegressionTest => "regtest",
        }
    }

    pub fn is_test(&self) -> bool {
        !matches!(self, Network::Production)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Network::Production => 0,
            Network::PublicTest => 1,
            Network::RegressionTest => 2,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "production" => Ok(Network::Production),
            "test" | "testnet" => Ok(Network::PublicTest),
            "regtest" => Ok(Network::RegressionTest),
            other => Err(SelectionError::UnknownNetwork(other.to_string())),
        }
    }
}
