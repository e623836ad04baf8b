//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::app::form::Form;
use crate::app::notification::NotificationSlot;
use crate::messages::network::ActionKind;
use crate::messages::ui_events::{AppTab, InputMode};
use crate::messages::RenderState;
use crate::models::{Block, MiningStatus, Proposal, StatsSnapshot, Wallet};
use crate::network::poller::PollState;

/// Panels that can have one action in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusyPanel {
    Transfer,
    Wallet,
    Mining,
    Governance,
    Chain,
}

/// Local busy flags, one per panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub transfer: bool,
    pub wallet: bool,
    pub mining: bool,
    pub governance: bool,
    pub chain: bool,
}

impl BusyFlags {
    pub fn get(&self, panel: BusyPanel) -> bool {
        match panel {
            BusyPanel::Transfer => self.transfer,
            BusyPanel::Wallet => self.wallet,
            BusyPanel::Mining => self.mining,
            BusyPanel::Governance => self.governance,
            BusyPanel::Chain => self.chain,
        }
    }

    pub fn set(&mut self, panel: BusyPanel, busy: bool) {
        let flag = match panel {
            BusyPanel::Transfer => &mut self.transfer,
            BusyPanel::Wallet => &mut self.wallet,
            BusyPanel::Mining => &mut self.mining,
            BusyPanel::Governance => &mut self.governance,
            BusyPanel::Chain => &mut self.chain,
        };
        *flag = busy;
    }
}

/// Which form on the wallet tab has focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalletFocus {
    #[default]
    Transfer,
    Balance,
}

// Field indices
pub const TRANSFER_FROM: usize = 0;
pub const TRANSFER_TO: usize = 1;
pub const TRANSFER_AMOUNT: usize = 2;
pub const TRANSFER_KEY: usize = 3;

pub const PROPOSAL_TITLE: usize = 0;
pub const PROPOSAL_DESCRIPTION: usize = 1;
pub const PROPOSAL_DEPOSIT: usize = 2;
pub const PROPOSAL_PROPOSER: usize = 3;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub active_tab: AppTab,
    pub input_mode: InputMode,
    pub api_base: String,

    // Polled feeds
    pub stats: PollState<StatsSnapshot>,
    pub blocks: PollState<Vec<Block>>,
    pub mining: PollState<MiningStatus>,

    // Explorer
    pub selected_block: usize,
    pub show_block_detail: bool,

    // Forms
    pub transfer_form: Form,
    pub balance_form: Form,
    pub wallet_focus: WalletFocus,
    pub miner_form: Form,
    pub proposal_form: Form,
    pub show_proposal_form: bool,
    pub sample_index: usize,

    // Action results
    pub balance_result: Option<String>,
    pub created_wallet: Option<Wallet>,
    pub proposals: Vec<Proposal>,
    pub selected_proposal: usize,

    // Dispatcher bookkeeping
    pub busy: BusyFlags,
    pub pending: HashMap<u64, ActionKind>,
    next_action_id: u64,

    pub notifications: NotificationSlot,
    pub show_help: bool,
}

impl AppState {
    /// `expired_tx` receives notification ids when their timers run out
    pub fn new(api_base: impl Into<String>, expired_tx: mpsc::UnboundedSender<u64>) -> Self {
        AppState {
            active_tab: AppTab::Dashboard,
            input_mode: InputMode::Normal,
            api_base: api_base.into(),
            stats: PollState::new(StatsSnapshot::default()),
            blocks: PollState::new(Vec::new()),
            mining: PollState::new(MiningStatus::default()),
            selected_block: 0,
            show_block_detail: false,
            transfer_form: Form::new(&[
                ("From address", false),
                ("To address", false),
                ("Amount", false),
                ("Private key", true),
            ]),
            balance_form: Form::new(&[("Address", false)]),
            wallet_focus: WalletFocus::Transfer,
            miner_form: Form::new(&[("Miner address", false)]),
            proposal_form: Form::new(&[
                ("Title", false),
                ("Description", false),
                ("Deposit", false),
                ("Proposer", false),
                ("Private key", true),
            ]),
            show_proposal_form: false,
            sample_index: 0,
            balance_result: None,
            created_wallet: None,
            proposals: Vec::new(),
            selected_proposal: 0,
            busy: BusyFlags::default(),
            pending: HashMap::new(),
            next_action_id: 0,
            notifications: NotificationSlot::new(expired_tx),
            show_help: false,
        }
    }

    pub fn next_action_id(&mut self) -> u64 {
        self.next_action_id += 1;
        self.next_action_id
    }

    /// The form receiving keystrokes on the current tab, if any
    pub fn active_form(&self) -> Option<&Form> {
        if self.show_proposal_form {
            return Some(&self.proposal_form);
        }
        match self.active_tab {
            AppTab::Wallet => Some(match self.wallet_focus {
                WalletFocus::Transfer => &self.transfer_form,
                WalletFocus::Balance => &self.balance_form,
            }),
            AppTab::Mining => Some(&self.miner_form),
            AppTab::Dashboard | AppTab::Governance => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        if self.show_proposal_form {
            return Some(&mut self.proposal_form);
        }
        match self.active_tab {
            AppTab::Wallet => Some(match self.wallet_focus {
                WalletFocus::Transfer => &mut self.transfer_form,
                WalletFocus::Balance => &mut self.balance_form,
            }),
            AppTab::Mining => Some(&mut self.miner_form),
            AppTab::Dashboard | AppTab::Governance => None,
        }
    }

    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            input_mode: self.input_mode,
            api_base: self.api_base.clone(),
            stats: self.stats.data().clone(),
            stats_loading: self.stats.loading(),
            stats_error: self.stats.error().map(str::to_string),
            blocks: self.blocks.data().clone(),
            blocks_loading: self.blocks.loading(),
            selected_block: self.selected_block,
            show_block_detail: self.show_block_detail,
            mining: self.mining.data().clone(),
            mining_loading: self.mining.loading(),
            miner_form: self.miner_form.clone(),
            transfer_form: self.transfer_form.clone(),
            balance_form: self.balance_form.clone(),
            wallet_focus: self.wallet_focus,
            balance_result: self.balance_result.clone(),
            created_wallet: self.created_wallet.clone(),
            proposals: self.proposals.clone(),
            selected_proposal: self.selected_proposal,
            proposal_form: self.proposal_form.clone(),
            show_proposal_form: self.show_proposal_form,
            busy: self.busy,
            notification: self.notifications.current().cloned(),
            show_help: self.show_help,
        }
    }
}
