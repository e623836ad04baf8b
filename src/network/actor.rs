//! Network actor - owns the pollers and runs actions in the Tokio runtime

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::format::now_millis;
use crate::messages::network::{Action, ActionOutput, Feed};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;
use crate::network::governance::{
    Governance, CREATE_PROPOSAL_DELAY, INITIALIZE_DELAY, VOTE_DELAY,
};
use crate::network::poller::{spawn_poller, PollHandle};

/// The three feeds, each with its own interval
struct Pollers {
    stats: PollHandle,
    blocks: PollHandle,
    mining: PollHandle,
}

impl Pollers {
    fn get(&self, feed: Feed) -> &PollHandle {
        match feed {
            Feed::Stats => &self.stats,
            Feed::Blocks => &self.blocks,
            Feed::Mining => &self.mining,
        }
    }
}

/// Network actor that polls feeds and executes dispatched actions
pub struct NetworkActor {
    client: ApiClient,
    config: Config,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    governance: Arc<Mutex<Governance>>,
    active_actions: JoinSet<()>,
    cancel: CancellationToken,
}

impl NetworkActor {
    pub fn new(config: Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: ApiClient::new(config.api_base.clone(), config.request_timeout()),
            config,
            response_tx,
            governance: Arc::new(Mutex::new(Governance::with_samples(now_millis()))),
            active_actions: JoinSet::new(),
            cancel: CancellationToken::new(),
        }
    }

    fn start_pollers(&self) -> Pollers {
        let client = self.client.clone();
        let stats = spawn_poller(
            "stats",
            self.config.stats_interval(),
            move || {
                let client = client.clone();
                async move { client.fetch_stats().await }
            },
            self.response_tx.clone(),
            &self.cancel,
        );

        let client = self.client.clone();
        let limit = self.config.block_limit;
        let blocks = spawn_poller(
            "blocks",
            self.config.blocks_interval(),
            move || {
                let client = client.clone();
                async move { client.blocks(limit).await }
            },
            self.response_tx.clone(),
            &self.cancel,
        );

        let client = self.client.clone();
        let mining = spawn_poller(
            "mining",
            self.config.mining_interval(),
            move || {
                let client = client.clone();
                async move { client.mining_status().await }
            },
            self.response_tx.clone(),
            &self.cancel,
        );

        Pollers { stats, blocks, mining }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        tracing::info!(api_base = %self.client.base(), "Network actor started");
        let pollers = self.start_pollers();

        let proposals = self.governance.lock().await.proposals().to_vec();
        let _ = self.response_tx.send(NetworkResponse::Proposals(proposals));

        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Dispatch { id, action }) => self.spawn_action(id, action),

                        Some(NetworkCommand::Refetch(feed)) => pollers.get(feed).refetch(),

                        Some(NetworkCommand::Shutdown) | None => {
                            tracing::info!("Network actor shutting down");
                            self.cancel.cancel();
                            break;
                        }
                    }
                }

                // Reap finished actions
                Some(_result) = self.active_actions.join_next(), if !self.active_actions.is_empty() => {}
            }
        }

        drop(pollers);
        self.active_actions.abort_all();
    }

    fn spawn_action(&mut self, id: u64, action: Action) {
        let client = self.client.clone();
        let governance = self.governance.clone();
        let response_tx = self.response_tx.clone();
        let token = self.cancel.child_token();

        tracing::info!(id, action = ?action.kind(), "Executing action");
        self.active_actions.spawn(async move {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tracing::info!(id, "Action cancelled");
                }
                result = execute_action(&client, &governance, action) => {
                    match &result {
                        Ok(_) => tracing::info!(id, "Action completed"),
                        Err(e) => tracing::warn!(id, error = %e, "Action failed"),
                    }
                    let _ = response_tx.send(NetworkResponse::ActionFinished { id, result });
                }
            }
        });
    }
}

/// Perform one action against the API or the simulated services
pub async fn execute_action(
    client: &ApiClient,
    governance: &Mutex<Governance>,
    action: Action,
) -> Result<ActionOutput, String> {
    match action {
        Action::Transfer(transfer) => client
            .submit_transfer(&transfer)
            .await
            .map(|_| ActionOutput::Done)
            .map_err(|e| e.to_string()),
        Action::CreateWallet => client
            .create_wallet()
            .await
            .map(ActionOutput::Wallet)
            .map_err(|e| e.to_string()),
        Action::QueryBalance { address } => client
            .balance(&address)
            .await
            .map(ActionOutput::Balance)
            .map_err(|e| e.to_string()),
        Action::StartMining { miner_address } => client
            .start_mining(&miner_address)
            .await
            .map(|_| ActionOutput::Done)
            .map_err(|e| e.to_string()),
        Action::StopMining => client
            .stop_mining()
            .await
            .map(|_| ActionOutput::Done)
            .map_err(|e| e.to_string()),
        Action::CreateProposal(new) => {
            tokio::time::sleep(CREATE_PROPOSAL_DELAY).await;
            let mut gov = governance.lock().await;
            gov.create(new, now_millis());
            Ok(ActionOutput::Proposals(gov.proposals().to_vec()))
        }
        Action::Vote { proposal_id, option } => {
            tokio::time::sleep(VOTE_DELAY).await;
            let mut gov = governance.lock().await;
            gov.vote(proposal_id, option).map_err(|e| e.to_string())?;
            Ok(ActionOutput::Proposals(gov.proposals().to_vec()))
        }
        Action::InitializeChain => {
            tokio::time::sleep(INITIALIZE_DELAY).await;
            Ok(ActionOutput::Done)
        }
    }
}
