//! Simulated governance service - proposals live in memory only

use std::time::Duration;

use crate::error::GovernanceError;
use crate::models::{NewProposal, Proposal, ProposalStatus, VoteOption, VoteTally};

/// Simulated latency of proposal creation
pub const CREATE_PROPOSAL_DELAY: Duration = Duration::from_millis(1500);

/// Simulated latency of a vote
pub const VOTE_DELAY: Duration = Duration::from_millis(1000);

/// Simulated latency of chain initialization
pub const INITIALIZE_DELAY: Duration = Duration::from_millis(2000);

/// Voting power added by a single vote
pub const VOTE_WEIGHT: u64 = 10_000;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const VOTING_PERIOD_MS: i64 = 14 * DAY_MS;

pub struct Governance {
    proposals: Vec<Proposal>,
}

impl Governance {
    /// Seeded with one open and one passed proposal, relative to `now_ms`
    pub fn with_samples(now_ms: i64) -> Self {
        let proposals = vec![
            Proposal {
                id: 1,
                title: "Increase block reward".to_string(),
                description: "Raise the mining reward from 50 WTF to 75 WTF to attract more miners."
                    .to_string(),
                proposer: "wtf1proposer123456789abcdef".to_string(),
                status: ProposalStatus::Voting,
                voting_end_time: now_ms + 7 * DAY_MS,
                votes: VoteTally {
                    yes: 650_000,
                    no: 120_000,
                    abstain: 50_000,
                    no_with_veto: 30_000,
                },
                deposit: 1000.0,
                total_deposit: 1000.0,
            },
            Proposal {
                id: 2,
                title: "Network upgrade".to_string(),
                description: "Upgrade the consensus algorithm for better security and throughput."
                    .to_string(),
                proposer: "wtf1proposer987654321fedcba".to_string(),
                status: ProposalStatus::Passed,
                voting_end_time: now_ms - 2 * DAY_MS,
                votes: VoteTally {
                    yes: 890_000,
                    no: 45_000,
                    abstain: 30_000,
                    no_with_veto: 15_000,
                },
                deposit: 2000.0,
                total_deposit: 2000.0,
            },
        ];
        Governance { proposals }
    }

    /// Newest first
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn create(&mut self, new: NewProposal, now_ms: i64) -> &Proposal {
        let id = self.proposals.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.proposals.insert(
            0,
            Proposal {
                id,
                title: new.title,
                description: new.description,
                proposer: new.proposer,
                status: ProposalStatus::Voting,
                voting_end_time: now_ms + VOTING_PERIOD_MS,
                votes: VoteTally::default(),
                deposit: new.deposit,
                total_deposit: new.deposit,
            },
        );
        &self.proposals[0]
    }

    pub fn vote(&mut self, proposal_id: u64, option: VoteOption) -> Result<&Proposal, GovernanceError> {
        let proposal = self
            .proposals
            .iter_mut()
            .find(|p| p.id == proposal_id)
            .ok_or(GovernanceError::NotFound(proposal_id))?;
        if proposal.status != ProposalStatus::Voting {
            return Err(GovernanceError::VotingClosed(proposal_id));
        }
        proposal.votes.add(option, VOTE_WEIGHT);
        Ok(proposal)
    }
}
