//! Network messages - communication between App and Network layers

use crate::models::{
    Block, MiningStatus, NewProposal, Proposal, StatsSnapshot, TransferRequest, VoteOption, Wallet,
};
use crate::network::poller::PollEvent;

/// Independently polled data feeds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    Stats,
    Blocks,
    Mining,
}

/// A mutating user action, already validated
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Transfer(TransferRequest),
    CreateWallet,
    QueryBalance { address: String },
    StartMining { miner_address: String },
    StopMining,
    CreateProposal(NewProposal),
    Vote { proposal_id: u64, option: VoteOption },
    InitializeChain,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Transfer(_) => ActionKind::Transfer,
            Action::CreateWallet => ActionKind::CreateWallet,
            Action::QueryBalance { .. } => ActionKind::QueryBalance,
            Action::StartMining { .. } => ActionKind::StartMining,
            Action::StopMining => ActionKind::StopMining,
            Action::CreateProposal(_) => ActionKind::CreateProposal,
            Action::Vote { option, .. } => ActionKind::Vote(*option),
            Action::InitializeChain => ActionKind::InitializeChain,
        }
    }
}

/// Action identity without its payload, kept by the App while in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Transfer,
    CreateWallet,
    QueryBalance,
    StartMining,
    StopMining,
    CreateProposal,
    Vote(VoteOption),
    InitializeChain,
}

/// Payload of a successful action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    Done,
    Wallet(Wallet),
    Balance(f64),
    Proposals(Vec<Proposal>),
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run an action; exactly one `ActionFinished` comes back for `id`
    Dispatch { id: u64, action: Action },
    /// Fetch a feed now without touching its interval
    Refetch(Feed),
    /// Cancel everything in flight and stop the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Stats(PollEvent<StatsSnapshot>),
    Blocks(PollEvent<Vec<Block>>),
    Mining(PollEvent<MiningStatus>),
    /// Current proposal list from the governance service
    Proposals(Vec<Proposal>),
    ActionFinished {
        id: u64,
        result: Result<ActionOutput, String>,
    },
}

impl From<PollEvent<StatsSnapshot>> for NetworkResponse {
    fn from(ev: PollEvent<StatsSnapshot>) -> Self {
        NetworkResponse::Stats(ev)
    }
}

impl From<PollEvent<Vec<Block>>> for NetworkResponse {
    fn from(ev: PollEvent<Vec<Block>>) -> Self {
        NetworkResponse::Blocks(ev)
    }
}

impl From<PollEvent<MiningStatus>> for NetworkResponse {
    fn from(ev: PollEvent<MiningStatus>) -> Self {
        NetworkResponse::Mining(ev)
    }
}
