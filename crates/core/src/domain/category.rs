// Message Category Domain Model
// Each category gets its own queue instance with independent tuning.

use serde::{Deserialize, Serialize};

use crate::domain::queue::{OrderingPolicy, QueueConfig};

/// Message category whose jobs share one queue instance and one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    Block,
    AggregateAndProof,
    Attestation,
    VoluntaryExit,
    ProposerSlashing,
    AttesterSlashing,
    SyncCommitteeContribution,
    SyncCommitteeMessage,
}

impl MessageCategory {
    pub const ALL: [MessageCategory; 8] = [
        MessageCategory::Block,
        MessageCategory::AggregateAndProof,
        MessageCategory::Attestation,
        MessageCategory::VoluntaryExit,
        MessageCategory::ProposerSlashing,
        MessageCategory::AttesterSlashing,
        MessageCategory::SyncCommitteeContribution,
        MessageCategory::SyncCommitteeMessage,
    ];

    /// Default per-category tuning.
    ///
    /// Low-volume, correctness-sensitive categories run serialized FIFO so a
    /// single current item is protected. High-volume categories run LIFO with
    /// parallel validation: under overload the most recent messages are the
    /// ones still worth validating.
    pub fn default_config(self) -> QueueConfig {
        match self {
            MessageCategory::Block => QueueConfig::new(1024, OrderingPolicy::OldestFirst),
            MessageCategory::AggregateAndProof => {
                QueueConfig::new(4096, OrderingPolicy::NewestFirst).with_max_concurrency(16)
            }
            MessageCategory::Attestation => {
                QueueConfig::new(16384, OrderingPolicy::NewestFirst).with_max_concurrency(64)
            }
            MessageCategory::VoluntaryExit => QueueConfig::new(4096, OrderingPolicy::OldestFirst),
            MessageCategory::ProposerSlashing => QueueConfig::new(4096, OrderingPolicy::OldestFirst),
            MessageCategory::AttesterSlashing => QueueConfig::new(4096, OrderingPolicy::OldestFirst),
            MessageCategory::SyncCommitteeContribution => {
                QueueConfig::new(4096, OrderingPolicy::NewestFirst)
            }
            MessageCategory::SyncCommitteeMessage => {
                QueueConfig::new(4096, OrderingPolicy::NewestFirst)
            }
        }
    }
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageCategory::Block => write!(f, "block"),
            MessageCategory::AggregateAndProof => write!(f, "aggregate_and_proof"),
            MessageCategory::Attestation => write!(f, "attestation"),
            MessageCategory::VoluntaryExit => write!(f, "voluntary_exit"),
            MessageCategory::ProposerSlashing => write!(f, "proposer_slashing"),
            MessageCategory::AttesterSlashing => write!(f, "attester_slashing"),
            MessageCategory::SyncCommitteeContribution => {
                write!(f, "sync_committee_contribution")
            }
            MessageCategory::SyncCommitteeMessage => write!(f, "sync_committee_message"),
        }
    }
}
