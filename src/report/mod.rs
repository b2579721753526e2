//! Human-readable status lines from a metagraph snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("hotkey not registered in metagraph: {hotkey}")]
    UnknownHotkey { hotkey: String },

    #[error("metagraph has {hotkeys} hotkeys but {neurons} neuron entries")]
    Inconsistent { hotkeys: usize, neurons: usize },
}

/// Which set of columns [`format_status`] prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Miner,
    Validator,
}

/// Per-uid network statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuronStats {
    pub consensus: f64,
    pub stake: f64,
    pub trust: f64,
    pub incentive: f64,
    pub emission: f64,
    pub validator_trust: f64,
}

/// Snapshot of the network state; `neurons[uid]` belongs to `hotkeys[uid]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metagraph {
    pub hotkeys: Vec<String>,
    pub neurons: Vec<NeuronStats>,
}

impl Metagraph {
    pub fn new(hotkeys: Vec<String>, neurons: Vec<NeuronStats>) -> Result<Self, ReportError> {
        if hotkeys.len() != neurons.len() {
            return Err(ReportError::Inconsistent {
                hotkeys: hotkeys.len(),
                neurons: neurons.len(),
            });
        }
        Ok(Self { hotkeys, neurons })
    }

    /// First uid registered under `hotkey`.
    pub fn uid_of(&self, hotkey: &str) -> Option<usize> {
        self.hotkeys.iter().position(|h| h == hotkey)
    }
}

/// Formats the status line for `hotkey` at `block`.
///
/// Miners get `Stake | Trust | Incentive | Emission`; validators get `VTrust`.
pub fn format_status(
    metagraph: &Metagraph,
    hotkey: &str,
    block: u64,
    role: Role,
) -> Result<String, ReportError> {
    let unknown = || ReportError::UnknownHotkey {
        hotkey: hotkey.to_string(),
    };
    let uid = metagraph.uid_of(hotkey).ok_or_else(unknown)?;
    let neuron = metagraph.neurons.get(uid).ok_or_else(unknown)?;

    let mut line = format!(
        "UID:{} | Block:{} | Consensus:{} | ",
        uid, block, neuron.consensus
    );

    let detail = match role {
        Role::Miner => format!(
            "Stake:{} | Trust:{} | Incentive:{} | Emission:{}",
            neuron.stake, neuron.trust, neuron.incentive, neuron.emission
        ),
        Role::Validator => format!("VTrust:{} | ", neuron.validator_trust),
    };
    line.push_str(&detail);

    Ok(line)
}
