//! Command handlers - business logic for processing UI events
//!
//! Every mutating action goes through [`AppState::dispatch`]: validation has
//! already happened, the owning panel's busy flag is set and the action is
//! handed to the network layer. [`AppState::finish_action`] clears the flag
//! and produces exactly one notification per action.

use crate::app::state::{
    BusyPanel, WalletFocus, PROPOSAL_DEPOSIT, PROPOSAL_DESCRIPTION, PROPOSAL_PROPOSER,
    PROPOSAL_TITLE, TRANSFER_AMOUNT, TRANSFER_FROM, TRANSFER_KEY, TRANSFER_TO,
};
use crate::app::AppState;
use crate::constants::{FETCH_FAILED_MESSAGE, SAMPLE_MINER_ADDRESSES};
use crate::error::ValidationError;
use crate::format::format_currency;
use crate::messages::network::{Action, ActionKind, ActionOutput, Feed};
use crate::messages::ui_events::{AppTab, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{NewProposal, TransferRequest, VoteOption};
use crate::network::poller::PollOutcome;
use crate::validate::{require_address, require_amount, require_filled, validate_address};

impl ActionKind {
    pub fn panel(&self) -> BusyPanel {
        match self {
            ActionKind::Transfer => BusyPanel::Transfer,
            ActionKind::CreateWallet | ActionKind::QueryBalance => BusyPanel::Wallet,
            ActionKind::StartMining | ActionKind::StopMining => BusyPanel::Mining,
            ActionKind::CreateProposal | ActionKind::Vote(_) => BusyPanel::Governance,
            ActionKind::InitializeChain => BusyPanel::Chain,
        }
    }

    /// Feeds to refresh once the action has succeeded
    pub fn refetches(&self) -> &'static [Feed] {
        match self {
            ActionKind::Transfer | ActionKind::InitializeChain => &[Feed::Stats],
            ActionKind::StartMining | ActionKind::StopMining => &[Feed::Stats, Feed::Mining],
            _ => &[],
        }
    }

    fn success_message(&self) -> String {
        match self {
            ActionKind::Transfer => "Transaction submitted, awaiting confirmation".to_string(),
            ActionKind::CreateWallet => "New wallet created".to_string(),
            ActionKind::QueryBalance => "Balance loaded".to_string(),
            ActionKind::StartMining => "Mining started, searching for new blocks".to_string(),
            ActionKind::StopMining => "Mining stopped".to_string(),
            ActionKind::CreateProposal => "Proposal created".to_string(),
            ActionKind::Vote(option) => format!("Vote recorded: {}", option.as_str()),
            ActionKind::InitializeChain => "Blockchain initialized".to_string(),
        }
    }
}

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        self.input_mode = InputMode::Normal;
        self.active_tab = tab;
    }

    pub fn next_field(&mut self) {
        if self.show_proposal_form {
            self.proposal_form.next_field();
            return;
        }
        if self.active_tab == AppTab::Wallet {
            match self.wallet_focus {
                WalletFocus::Transfer if self.transfer_form.selected + 1 < self.transfer_form.fields.len() => {
                    self.transfer_form.next_field();
                }
                WalletFocus::Transfer => {
                    self.wallet_focus = WalletFocus::Balance;
                    self.balance_form.select(0);
                }
                WalletFocus::Balance => {
                    self.wallet_focus = WalletFocus::Transfer;
                    self.transfer_form.select(0);
                }
            }
        }
    }

    pub fn prev_field(&mut self) {
        if self.show_proposal_form {
            self.proposal_form.prev_field();
            return;
        }
        if self.active_tab == AppTab::Wallet {
            match self.wallet_focus {
                WalletFocus::Transfer if self.transfer_form.selected > 0 => {
                    self.transfer_form.prev_field();
                }
                WalletFocus::Transfer => {
                    self.wallet_focus = WalletFocus::Balance;
                    self.balance_form.select(0);
                }
                WalletFocus::Balance => {
                    self.wallet_focus = WalletFocus::Transfer;
                    let last = self.transfer_form.fields.len().saturating_sub(1);
                    self.transfer_form.select(last);
                }
            }
        }
    }

    pub fn select_next(&mut self) {
        match self.active_tab {
            AppTab::Dashboard => {
                let len = self.blocks.data().len();
                if len > 0 {
                    self.selected_block = (self.selected_block + 1) % len;
                }
            }
            AppTab::Governance => {
                if !self.proposals.is_empty() {
                    self.selected_proposal = (self.selected_proposal + 1) % self.proposals.len();
                }
            }
            _ => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.active_tab {
            AppTab::Dashboard => {
                let len = self.blocks.data().len();
                if len > 0 {
                    self.selected_block = self.selected_block.checked_sub(1).unwrap_or(len - 1);
                }
            }
            AppTab::Governance => {
                if !self.proposals.is_empty() {
                    self.selected_proposal = self
                        .selected_proposal
                        .checked_sub(1)
                        .unwrap_or(self.proposals.len() - 1);
                }
            }
            _ => {}
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if let Some(form) = self.active_form_mut() {
            let selected = form.selected;
            form.select(selected);
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(form) = self.active_form_mut() {
            form.enter_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.delete_char();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.move_cursor_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.move_cursor_right();
        }
    }

    pub fn fill_sample_address(&mut self) {
        let address = SAMPLE_MINER_ADDRESSES[self.sample_index % SAMPLE_MINER_ADDRESSES.len()];
        self.sample_index += 1;
        self.miner_form.set_value(0, address);
    }

    // ========================
    // Popups
    // ========================

    pub fn show_detail(&mut self) {
        if !self.blocks.data().is_empty() {
            self.show_block_detail = true;
        }
    }

    pub fn open_proposal_form(&mut self) {
        if self.active_tab == AppTab::Governance {
            self.show_proposal_form = true;
            self.proposal_form.select(0);
        }
    }

    pub fn close_popup(&mut self) {
        self.show_block_detail = false;
        self.created_wallet = None;
        self.show_proposal_form = false;
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    pub fn expire_notification(&mut self, id: u64) {
        self.notifications.expire(id);
    }

    // ========================
    // Dispatcher
    // ========================

    /// Mark the owning panel busy and hand the action to the network layer.
    /// Refused while that panel already has an action in flight.
    pub fn dispatch(&mut self, action: Action) -> Option<NetworkCommand> {
        let kind = action.kind();
        let panel = kind.panel();
        if self.busy.get(panel) {
            tracing::debug!(action = ?kind, "Panel busy, ignoring action");
            return None;
        }
        self.busy.set(panel, true);
        let id = self.next_action_id();
        self.pending.insert(id, kind);
        tracing::info!(id, action = ?kind, "Dispatching action");
        Some(NetworkCommand::Dispatch { id, action })
    }

    fn reject(&mut self, error: ValidationError) -> Option<NetworkCommand> {
        tracing::debug!(%error, "Validation failed");
        self.notifications.error(error.to_string());
        None
    }

    /// Submit whatever form has focus
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        if self.show_proposal_form {
            return self.create_proposal();
        }
        match (self.active_tab, self.wallet_focus) {
            (AppTab::Wallet, WalletFocus::Transfer) => self.submit_transfer(),
            (AppTab::Wallet, WalletFocus::Balance) => self.query_balance(),
            (AppTab::Mining, _) => self.start_mining(),
            _ => None,
        }
    }

    pub fn submit_transfer(&mut self) -> Option<NetworkCommand> {
        if self.busy.transfer {
            return None;
        }
        match self.validate_transfer() {
            Ok(transfer) => self.dispatch(Action::Transfer(transfer)),
            Err(e) => self.reject(e),
        }
    }

    fn validate_transfer(&self) -> Result<TransferRequest, ValidationError> {
        let form = &self.transfer_form;
        let from = form.value(TRANSFER_FROM).trim();
        let to = form.value(TRANSFER_TO).trim();
        let amount = form.value(TRANSFER_AMOUNT);
        let key = form.value(TRANSFER_KEY).trim();

        require_filled(&[from, to, amount, key])?;
        if !validate_address(from) || !validate_address(to) {
            return Err(ValidationError::InvalidAddress);
        }
        let amount = require_amount(amount)?;

        Ok(TransferRequest {
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
            private_key: key.to_string(),
        })
    }

    pub fn create_wallet(&mut self) -> Option<NetworkCommand> {
        self.dispatch(Action::CreateWallet)
    }

    pub fn query_balance(&mut self) -> Option<NetworkCommand> {
        if self.busy.wallet {
            return None;
        }
        match require_address(self.balance_form.value(0)) {
            Ok(address) => {
                let address = address.to_string();
                self.dispatch(Action::QueryBalance { address })
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn start_mining(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        if self.busy.mining {
            return None;
        }
        match require_address(self.miner_form.value(0)) {
            Ok(address) => {
                let miner_address = address.to_string();
                self.dispatch(Action::StartMining { miner_address })
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn stop_mining(&mut self) -> Option<NetworkCommand> {
        self.dispatch(Action::StopMining)
    }

    pub fn create_proposal(&mut self) -> Option<NetworkCommand> {
        if self.busy.governance {
            return None;
        }
        match self.validate_proposal() {
            Ok(proposal) => self.dispatch(Action::CreateProposal(proposal)),
            Err(e) => self.reject(e),
        }
    }

    fn validate_proposal(&self) -> Result<NewProposal, ValidationError> {
        let form = &self.proposal_form;
        let title = form.value(PROPOSAL_TITLE).trim();
        let description = form.value(PROPOSAL_DESCRIPTION).trim();
        let deposit = form.value(PROPOSAL_DEPOSIT);
        let proposer = form.value(PROPOSAL_PROPOSER).trim();

        require_filled(&[title, description, deposit, proposer])?;
        if !validate_address(proposer) {
            return Err(ValidationError::InvalidAddress);
        }
        let deposit = require_amount(deposit)?;

        Ok(NewProposal {
            title: title.to_string(),
            description: description.to_string(),
            proposer: proposer.to_string(),
            deposit,
        })
    }

    pub fn vote(&mut self, option: VoteOption) -> Option<NetworkCommand> {
        let proposal_id = self.proposals.get(self.selected_proposal)?.id;
        self.dispatch(Action::Vote { proposal_id, option })
    }

    pub fn initialize_chain(&mut self) -> Option<NetworkCommand> {
        self.dispatch(Action::InitializeChain)
    }

    /// Manual refresh: chain stats plus the feed shown on the current tab
    pub fn refresh(&self) -> Vec<NetworkCommand> {
        let mut cmds = vec![NetworkCommand::Refetch(Feed::Stats)];
        match self.active_tab {
            AppTab::Dashboard => cmds.push(NetworkCommand::Refetch(Feed::Blocks)),
            AppTab::Mining => cmds.push(NetworkCommand::Refetch(Feed::Mining)),
            _ => {}
        }
        cmds
    }

    /// Settle a dispatched action. Returns follow-up refetches.
    pub fn finish_action(&mut self, id: u64, result: Result<ActionOutput, String>) -> Vec<NetworkCommand> {
        let Some(kind) = self.pending.remove(&id) else {
            tracing::debug!(id, "Result for unknown action");
            return Vec::new();
        };
        self.busy.set(kind.panel(), false);

        match result {
            Ok(output) => {
                match output {
                    ActionOutput::Wallet(wallet) => self.created_wallet = Some(wallet),
                    ActionOutput::Balance(balance) => {
                        self.balance_result = Some(format!("Balance: {}", format_currency(balance)));
                    }
                    ActionOutput::Proposals(list) => self.set_proposals(list),
                    ActionOutput::Done => {}
                }

                match kind {
                    ActionKind::Transfer => self.transfer_form.clear(),
                    ActionKind::CreateProposal => {
                        self.proposal_form.clear();
                        self.show_proposal_form = false;
                        self.selected_proposal = 0;
                    }
                    _ => {}
                }

                match (kind, &self.balance_result) {
                    (ActionKind::QueryBalance, Some(text)) => {
                        let text = text.clone();
                        self.notifications.info(text);
                    }
                    _ => {
                        self.notifications.success(kind.success_message());
                    }
                }

                kind.refetches()
                    .iter()
                    .map(|feed| NetworkCommand::Refetch(*feed))
                    .collect()
            }
            Err(message) => {
                if kind == ActionKind::QueryBalance {
                    self.balance_result = Some("Query failed".to_string());
                }
                self.notifications.error(message);
                Vec::new()
            }
        }
    }

    fn set_proposals(&mut self, proposals: Vec<crate::models::Proposal>) {
        self.proposals = proposals;
        if self.selected_proposal >= self.proposals.len() {
            self.selected_proposal = self.proposals.len().saturating_sub(1);
        }
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        match response {
            NetworkResponse::Stats(event) => {
                if let PollOutcome::Failed { newly_failed: true, .. } = self.stats.apply(event) {
                    self.notifications
                        .error(format!("Data load failed: {}", FETCH_FAILED_MESSAGE));
                }
            }
            NetworkResponse::Blocks(event) => match self.blocks.apply(event) {
                PollOutcome::Failed { error, newly_failed: true } => {
                    self.notifications.error(error.to_string());
                }
                PollOutcome::Updated => {
                    let len = self.blocks.data().len();
                    if self.selected_block >= len {
                        self.selected_block = len.saturating_sub(1);
                    }
                    if len == 0 {
                        self.show_block_detail = false;
                    }
                }
                _ => {}
            },
            NetworkResponse::Mining(event) => {
                self.mining.apply(event);
            }
            NetworkResponse::Proposals(list) => self.set_proposals(list),
            NetworkResponse::ActionFinished { id, result } => return self.finish_action(id, result),
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notification::NotificationKind;
    use crate::error::ApiError;
    use crate::models::{StatsSnapshot, Wallet};
    use crate::network::poller::PollEvent;
    use tokio::sync::mpsc;

    fn state() -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        AppState::new("http://localhost:3000", tx)
    }

    fn fill_transfer(state: &mut AppState, amount: &str) {
        state.transfer_form.set_value(TRANSFER_FROM, "wtf1sender00001");
        state.transfer_form.set_value(TRANSFER_TO, "wtf1receiver0001");
        state.transfer_form.set_value(TRANSFER_AMOUNT, amount);
        state.transfer_form.set_value(TRANSFER_KEY, "secret");
    }

    fn notification(state: &AppState) -> (String, NotificationKind) {
        let n = state.notifications.current().expect("notification");
        (n.message.clone(), n.kind)
    }

    #[tokio::test]
    async fn test_transfer_validation_blocks_dispatch() {
        let mut s = state();
        assert!(s.submit_transfer().is_none());
        assert_eq!(notification(&s), ("Please fill in all fields".into(), NotificationKind::Error));

        fill_transfer(&mut s, "0");
        assert!(s.submit_transfer().is_none());
        assert_eq!(notification(&s).0, "Please enter a valid amount");

        s.transfer_form.set_value(TRANSFER_TO, "cosmos1abcdef");
        assert!(s.submit_transfer().is_none());
        assert_eq!(notification(&s).0, "Please enter a valid address");

        assert!(!s.busy.transfer);
        assert!(s.pending.is_empty());
    }

    #[tokio::test]
    async fn test_transfer_dispatch_sets_busy_and_refuses_overlap() {
        let mut s = state();
        fill_transfer(&mut s, "0.1");
        let cmd = s.submit_transfer();
        match cmd {
            Some(NetworkCommand::Dispatch { action: Action::Transfer(t), .. }) => {
                assert_eq!(t.amount, 0.1);
                assert_eq!(t.to_address, "wtf1receiver0001");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(s.busy.transfer);
        assert!(s.submit_transfer().is_none());
        assert_eq!(s.pending.len(), 1);
    }

    #[tokio::test]
    async fn test_transfer_success_clears_form_and_refetches_stats() {
        let mut s = state();
        fill_transfer(&mut s, "5");
        let id = match s.submit_transfer() {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };

        let follow_up = s.finish_action(id, Ok(ActionOutput::Done));
        assert!(matches!(follow_up.as_slice(), [NetworkCommand::Refetch(Feed::Stats)]));
        assert!(!s.busy.transfer);
        assert_eq!(s.transfer_form.value(TRANSFER_FROM), "");
        assert_eq!(notification(&s).1, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_action_failure_notifies_once_without_refetch() {
        let mut s = state();
        fill_transfer(&mut s, "5");
        let id = match s.submit_transfer() {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };

        let follow_up = s.finish_action(id, Err("Insufficient balance".into()));
        assert!(follow_up.is_empty());
        assert!(!s.busy.transfer);
        assert_eq!(notification(&s), ("Insufficient balance".into(), NotificationKind::Error));
        assert_eq!(s.transfer_form.value(TRANSFER_FROM), "wtf1sender00001");

        // A duplicate result is ignored
        assert!(s.finish_action(id, Ok(ActionOutput::Done)).is_empty());
        assert_eq!(notification(&s).0, "Insufficient balance");
    }

    #[tokio::test]
    async fn test_mining_toggle_refetches_stats_and_mining() {
        let mut s = state();
        assert!(s.start_mining().is_none());
        assert_eq!(notification(&s).0, "Please enter an address");

        s.fill_sample_address();
        assert_eq!(s.miner_form.value(0), SAMPLE_MINER_ADDRESSES[0]);
        let id = match s.start_mining() {
            Some(NetworkCommand::Dispatch { id, action: Action::StartMining { miner_address } }) => {
                assert_eq!(miner_address, SAMPLE_MINER_ADDRESSES[0]);
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        assert!(s.stop_mining().is_none());

        let follow_up = s.finish_action(id, Ok(ActionOutput::Done));
        assert_eq!(follow_up.len(), 2);
        assert!(matches!(follow_up[1], NetworkCommand::Refetch(Feed::Mining)));
    }

    #[tokio::test]
    async fn test_balance_query_outcomes() {
        let mut s = state();
        s.balance_form.set_value(0, "wtf1holder0001");
        let id = match s.query_balance() {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };
        s.finish_action(id, Ok(ActionOutput::Balance(1500.0)));
        assert_eq!(s.balance_result.as_deref(), Some("Balance: 1,500 WTF"));
        assert_eq!(notification(&s).1, NotificationKind::Info);

        let id = match s.query_balance() {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };
        s.finish_action(id, Err("HTTP error! status: 500".into()));
        assert_eq!(s.balance_result.as_deref(), Some("Query failed"));
    }

    #[tokio::test]
    async fn test_wallet_creation_opens_popup() {
        let mut s = state();
        let id = match s.create_wallet() {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };
        let wallet = Wallet {
            address: "wtf1new0000001".into(),
            private_key: "priv".into(),
            public_key: "pub".into(),
        };
        s.finish_action(id, Ok(ActionOutput::Wallet(wallet.clone())));
        assert_eq!(s.created_wallet, Some(wallet));
        assert!(s.to_render_state().key_context().detail_open);
        s.close_popup();
        assert!(s.created_wallet.is_none());
    }

    #[tokio::test]
    async fn test_proposal_validation_and_vote() {
        let mut s = state();
        s.active_tab = AppTab::Governance;
        s.open_proposal_form();
        assert!(s.submit().is_none());
        assert_eq!(notification(&s).0, "Please fill in all fields");

        s.proposal_form.set_value(PROPOSAL_TITLE, "Lower fees");
        s.proposal_form.set_value(PROPOSAL_DESCRIPTION, "Halve them");
        s.proposal_form.set_value(PROPOSAL_DEPOSIT, "100");
        s.proposal_form.set_value(PROPOSAL_PROPOSER, "wtf1proposer000");
        assert!(matches!(
            s.submit(),
            Some(NetworkCommand::Dispatch { action: Action::CreateProposal(_), .. })
        ));
        assert!(s.busy.governance);

        // No proposals loaded yet: nothing to vote on
        let mut fresh = state();
        assert!(fresh.vote(VoteOption::Yes).is_none());
    }

    #[tokio::test]
    async fn test_stats_failure_keeps_snapshot_and_notifies_once() {
        let mut s = state();
        let good = StatsSnapshot { height: 100, pending_transactions: 5, total_supply: 1e6, mining_status: true };
        s.handle_response(NetworkResponse::Stats(PollEvent::Started { seq: 1 }));
        s.handle_response(NetworkResponse::Stats(PollEvent::Finished { seq: 1, result: Ok(good.clone()) }));
        assert!(s.notifications.current().is_none());

        s.handle_response(NetworkResponse::Stats(PollEvent::Started { seq: 2 }));
        s.handle_response(NetworkResponse::Stats(PollEvent::Finished {
            seq: 2,
            result: Err(ApiError::Transport("down".into())),
        }));
        let render = s.to_render_state();
        assert_eq!(render.stats, good);
        assert!(!render.stats_loading);
        assert_eq!(render.stats_error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        let first = s.notifications.current().unwrap().id;

        s.handle_response(NetworkResponse::Stats(PollEvent::Started { seq: 3 }));
        s.handle_response(NetworkResponse::Stats(PollEvent::Finished {
            seq: 3,
            result: Err(ApiError::Transport("down".into())),
        }));
        assert_eq!(s.notifications.current().unwrap().id, first);
    }

    fn blocks(n: u64) -> Vec<crate::models::Block> {
        (1..=n)
            .map(|index| crate::models::Block { index, ..Default::default() })
            .collect()
    }

    fn finish_blocks(s: &mut AppState, seq: u64, result: Result<Vec<crate::models::Block>, ApiError>) {
        s.handle_response(NetworkResponse::Blocks(PollEvent::Started { seq }));
        s.handle_response(NetworkResponse::Blocks(PollEvent::Finished { seq, result }));
    }

    #[tokio::test]
    async fn test_blocks_failure_notifies_with_message_once() {
        let mut s = state();
        finish_blocks(&mut s, 1, Ok(blocks(3)));
        assert!(s.notifications.current().is_none());

        let boom = ApiError::Http { status: 500, message: "Node unavailable".into() };
        finish_blocks(&mut s, 2, Err(boom.clone()));
        assert_eq!(notification(&s), ("Node unavailable".into(), NotificationKind::Error));
        assert_eq!(s.blocks.data().len(), 3);
        let first = s.notifications.current().unwrap().id;

        finish_blocks(&mut s, 3, Err(boom.clone()));
        assert_eq!(s.notifications.current().unwrap().id, first);

        // Recovery then a fresh failure notifies again
        finish_blocks(&mut s, 4, Ok(blocks(3)));
        finish_blocks(&mut s, 5, Err(boom));
        assert_ne!(s.notifications.current().unwrap().id, first);
    }

    #[tokio::test]
    async fn test_blocks_update_clamps_selection_and_closes_detail() {
        let mut s = state();
        finish_blocks(&mut s, 1, Ok(blocks(3)));
        s.select_prev();
        assert_eq!(s.selected_block, 2);
        s.show_detail();
        assert!(s.show_block_detail);

        finish_blocks(&mut s, 2, Ok(blocks(2)));
        assert_eq!(s.selected_block, 1);
        assert!(s.show_block_detail);

        finish_blocks(&mut s, 3, Ok(Vec::new()));
        assert_eq!(s.selected_block, 0);
        assert!(!s.show_block_detail);
    }

    #[tokio::test]
    async fn test_initialize_chain_refetches_stats() {
        let mut s = state();
        let id = match s.initialize_chain() {
            Some(NetworkCommand::Dispatch { id, action: Action::InitializeChain }) => id,
            other => panic!("unexpected {:?}", other),
        };
        assert!(s.busy.chain);
        assert!(s.initialize_chain().is_none());

        let follow_up = s.finish_action(id, Ok(ActionOutput::Done));
        assert!(matches!(follow_up.as_slice(), [NetworkCommand::Refetch(Feed::Stats)]));
        assert!(!s.busy.chain);
        assert_eq!(notification(&s), ("Blockchain initialized".into(), NotificationKind::Success));
    }

    #[tokio::test]
    async fn test_refresh_targets_active_tab() {
        let mut s = state();
        assert_eq!(s.refresh().len(), 2);
        s.switch_tab(AppTab::Governance);
        assert!(matches!(s.refresh().as_slice(), [NetworkCommand::Refetch(Feed::Stats)]));
    }

    #[tokio::test]
    async fn test_wallet_tab_focus_wraps_between_forms() {
        let mut s = state();
        s.switch_tab(AppTab::Wallet);
        for _ in 0..4 {
            s.next_field();
        }
        assert_eq!(s.wallet_focus, WalletFocus::Balance);
        s.start_editing();
        s.enter_char('w');
        assert_eq!(s.balance_form.value(0), "w");
        s.next_field();
        assert_eq!(s.wallet_focus, WalletFocus::Transfer);
        assert_eq!(s.transfer_form.selected, 0);
    }
}
