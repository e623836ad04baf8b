use serde::{Deserialize, Deserializer, Serialize};

/// Aggregate chain counters as reported under `blockchain` by `GET /api`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainSummary {
    pub height: u64,
    pub pending_transactions: u64,
    pub total_supply: f64,
}

/// Body of `GET /api`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChainInfo {
    pub blockchain: Option<ChainSummary>,
}

/// Chain statistics merged from `GET /api` and `GET /api/mining/status`.
///
/// Replaced whole on every successful fetch; never edited in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsSnapshot {
    pub height: u64,
    pub pending_transactions: u64,
    pub total_supply: f64,
    pub mining_status: bool,
}

impl StatsSnapshot {
    pub fn merge(info: ChainInfo, mining: &MiningFlag) -> Self {
        let chain = info.blockchain.unwrap_or_default();
        StatsSnapshot {
            height: chain.height,
            pending_transactions: chain.pending_transactions,
            total_supply: chain.total_supply,
            mining_status: mining.is_mining(),
        }
    }
}

/// Only `isMining` of the mining status body, read as the stats feed needs it.
/// Anything other than `true` counts as not mining; other fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MiningFlag {
    is_mining: serde_json::Value,
}

impl MiningFlag {
    pub fn is_mining(&self) -> bool {
        self.is_mining.as_bool().unwrap_or(false)
    }
}

/// `null` decodes as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /api/mining/status`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MiningStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub is_mining: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub miner_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hash_rate: f64,
    pub difficulty: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub blocks_found: u64,
    pub last_block_time: Option<i64>,
}

impl Default for MiningStatus {
    fn default() -> Self {
        MiningStatus {
            is_mining: false,
            miner_address: String::new(),
            hash_rate: 0.0,
            difficulty: 4,
            blocks_found: 0,
            last_block_time: None,
        }
    }
}

/// A transaction as embedded in a block
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: String,
    pub from_address: Option<String>,
    pub to_address: String,
    pub amount: f64,
    pub timestamp: i64,
}

/// A block as returned by the explorer endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub index: u64,
    pub hash: String,
    pub previous_hash: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub nonce: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Rough serialized size: 500 bytes of header plus 250 per transaction
    pub fn approx_size(&self) -> usize {
        500 + self.transactions.len() * 250
    }

    /// Fill ratio against a nominal capacity of 10 transactions, capped at 100
    pub fn fill_percent(&self) -> u16 {
        ((self.transactions.len() * 10).min(100)) as u16
    }
}

/// Body of `GET /api/blockchain/blocks`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlocksPage {
    pub blocks: Vec<Block>,
}

/// Freshly created key pair, shown to the user exactly once
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub address: String,
    pub private_key: String,
    pub public_key: String,
}

/// Body of `GET /api/wallets/:address/balance`
#[derive(Clone, Debug, Deserialize)]
pub struct Balance {
    pub balance: f64,
}

/// Body of `POST /api/transactions`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub private_key: String,
}

/// Body of `POST /api/mining/start`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartMining {
    pub miner_address: String,
}

/// Governance proposal lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalStatus {
    Voting,
    Passed,
    Rejected,
    Failed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProposalStatus::Voting => "Voting",
            ProposalStatus::Passed => "Passed",
            ProposalStatus::Rejected => "Rejected",
            ProposalStatus::Failed => "Failed",
        }
    }
}

/// Vote choices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteOption {
    Yes,
    No,
    Abstain,
    NoWithVeto,
}

impl VoteOption {
    pub const ALL: [VoteOption; 4] = [
        VoteOption::Yes,
        VoteOption::No,
        VoteOption::Abstain,
        VoteOption::NoWithVeto,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            VoteOption::Yes => "Yes",
            VoteOption::No => "No",
            VoteOption::Abstain => "Abstain",
            VoteOption::NoWithVeto => "No with veto",
        }
    }
}

/// Accumulated voting power per option
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
    pub no_with_veto: u64,
}

impl VoteTally {
    pub fn get(&self, option: VoteOption) -> u64 {
        match option {
            VoteOption::Yes => self.yes,
            VoteOption::No => self.no,
            VoteOption::Abstain => self.abstain,
            VoteOption::NoWithVeto => self.no_with_veto,
        }
    }

    pub fn add(&mut self, option: VoteOption, weight: u64) {
        let slot = match option {
            VoteOption::Yes => &mut self.yes,
            VoteOption::No => &mut self.no,
            VoteOption::Abstain => &mut self.abstain,
            VoteOption::NoWithVeto => &mut self.no_with_veto,
        };
        *slot = slot.saturating_add(weight);
    }

    pub fn total(&self) -> u64 {
        self.yes + self.no + self.abstain + self.no_with_veto
    }

    /// Share of `option` in percent; 0 when nobody has voted
    pub fn percentage(&self, option: VoteOption) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(option) as f64 / total as f64 * 100.0
        }
    }
}

/// A governance proposal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub proposer: String,
    pub status: ProposalStatus,
    /// Milliseconds since the Unix epoch
    pub voting_end_time: i64,
    pub votes: VoteTally,
    pub deposit: f64,
    pub total_deposit: f64,
}

/// Input for a new proposal, already validated
#[derive(Clone, Debug, PartialEq)]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    pub proposer: String,
    pub deposit: f64,
}
