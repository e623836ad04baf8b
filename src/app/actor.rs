//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    expired_rx: mpsc::UnboundedReceiver<u64>,
}

impl AppActor {
    pub fn new(
        api_base: impl Into<String>,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        AppActor {
            state: AppState::new(api_base, expired_tx),
            network_tx,
            render_tx,
            expired_rx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    // A closed UI channel means the UI loop is gone
                    let quit = match event {
                        Some(event) => self.handle_ui_event(event),
                        None => true,
                    };
                    if quit {
                        tracing::info!("Quit requested");
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                }
                Some(response) = net_rx.recv() => {
                    for cmd in self.state.handle_response(response) {
                        self.send(cmd);
                    }
                }
                Some(id) = self.expired_rx.recv() => {
                    self.state.expire_notification(id);
                }
            }
            if self.render_tx.send(self.state.to_render_state()).is_err() {
                // UI is gone
                let _ = self.network_tx.send(NetworkCommand::Shutdown);
                break;
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::warn!("Network actor stopped, command dropped");
        }
    }

    fn send_opt(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            self.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Actions
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.send_opt(cmd);
            }
            UiEvent::CreateWallet => {
                let cmd = self.state.create_wallet();
                self.send_opt(cmd);
            }
            UiEvent::StartMining => {
                let cmd = self.state.start_mining();
                self.send_opt(cmd);
            }
            UiEvent::StopMining => {
                let cmd = self.state.stop_mining();
                self.send_opt(cmd);
            }
            UiEvent::FillSampleAddress => self.state.fill_sample_address(),
            UiEvent::InitializeChain => {
                let cmd = self.state.initialize_chain();
                self.send_opt(cmd);
            }
            UiEvent::Refresh => {
                for cmd in self.state.refresh() {
                    self.send(cmd);
                }
            }
            UiEvent::Vote(option) => {
                let cmd = self.state.vote(option);
                self.send_opt(cmd);
            }

            // Popups
            UiEvent::ShowDetail => self.state.show_detail(),
            UiEvent::OpenProposalForm => self.state.open_proposal_form(),
            UiEvent::ClosePopup => self.state.close_popup(),
            UiEvent::DismissNotification => self.state.dismiss_notification(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
