//! Render state - data structure sent from App layer to UI for rendering

use crate::app::form::Form;
use crate::app::notification::Notification;
use crate::app::state::{BusyFlags, WalletFocus};
use crate::messages::ui_events::{AppTab, InputMode, KeyContext};
use crate::models::{Block, MiningStatus, Proposal, StatsSnapshot, Wallet};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_tab: AppTab,
    pub input_mode: InputMode,
    pub api_base: String,

    // Chain stats feed
    pub stats: StatsSnapshot,
    pub stats_loading: bool,
    pub stats_error: Option<String>,

    // Explorer feed
    pub blocks: Vec<Block>,
    pub blocks_loading: bool,
    pub selected_block: usize,
    pub show_block_detail: bool,

    // Mining feed
    pub mining: MiningStatus,
    pub mining_loading: bool,
    pub miner_form: Form,

    // Wallet tab
    pub transfer_form: Form,
    pub balance_form: Form,
    pub wallet_focus: WalletFocus,
    pub balance_result: Option<String>,
    pub created_wallet: Option<Wallet>,

    // Governance
    pub proposals: Vec<Proposal>,
    pub selected_proposal: usize,
    pub proposal_form: Form,
    pub show_proposal_form: bool,

    pub busy: BusyFlags,
    pub notification: Option<Notification>,
    pub show_help: bool,
}

impl RenderState {
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            tab: self.active_tab,
            input_mode: self.input_mode,
            show_help: self.show_help,
            detail_open: self.show_block_detail || self.created_wallet.is_some(),
            proposal_form_open: self.show_proposal_form,
        }
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.blocks.get(self.selected_block)
    }
}
