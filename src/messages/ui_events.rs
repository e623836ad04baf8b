//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::VoteOption;

/// Application tabs
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppTab {
    #[default]
    Dashboard,
    Wallet,
    Mining,
    Governance,
}

impl AppTab {
    pub const ALL: [AppTab; 4] = [
        AppTab::Dashboard,
        AppTab::Wallet,
        AppTab::Mining,
        AppTab::Governance,
    ];

    pub fn title(&self) -> &str {
        match self {
            AppTab::Dashboard => "Dashboard",
            AppTab::Wallet => "Wallet",
            AppTab::Mining => "Mining",
            AppTab::Governance => "Governance",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    SwitchTab(AppTab),
    NextField,
    PrevField,
    SelectNext,
    SelectPrev,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Actions
    Submit,
    CreateWallet,
    StartMining,
    StopMining,
    FillSampleAddress,
    InitializeChain,
    Refresh,
    Vote(VoteOption),

    // Popups
    ShowDetail,
    OpenProposalForm,
    ClosePopup,
    DismissNotification,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the UI is showing, as needed to interpret a key
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyContext {
    pub tab: AppTab,
    pub input_mode: InputMode,
    pub show_help: bool,
    /// Wallet or block detail popup
    pub detail_open: bool,
    pub proposal_form_open: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    if ctx.detail_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(UiEvent::ClosePopup),
            _ => None,
        };
    }

    if ctx.input_mode == InputMode::Editing {
        return handle_editing_keys(key);
    }

    if ctx.proposal_form_open {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::ClosePopup),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            _ => None,
        };
    }

    // Keys shared by every tab
    match key.code {
        KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Dashboard)),
        KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::Wallet)),
        KeyCode::Char('3') => return Some(UiEvent::SwitchTab(AppTab::Mining)),
        KeyCode::Char('4') => return Some(UiEvent::SwitchTab(AppTab::Governance)),
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => return Some(UiEvent::Refresh),
        KeyCode::Char('i') => return Some(UiEvent::InitializeChain),
        KeyCode::Char('x') => return Some(UiEvent::DismissNotification),
        _ => {}
    }

    match ctx.tab {
        AppTab::Dashboard => match key.code {
            KeyCode::Up => Some(UiEvent::SelectPrev),
            KeyCode::Down => Some(UiEvent::SelectNext),
            KeyCode::Enter => Some(UiEvent::ShowDetail),
            _ => None,
        },
        AppTab::Wallet => match key.code {
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            KeyCode::Char('w') => Some(UiEvent::CreateWallet),
            _ => None,
        },
        AppTab::Mining => match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::StartMining),
            KeyCode::Char('t') => Some(UiEvent::StopMining),
            KeyCode::Char('g') => Some(UiEvent::FillSampleAddress),
            _ => None,
        },
        AppTab::Governance => match key.code {
            KeyCode::Up => Some(UiEvent::SelectPrev),
            KeyCode::Down => Some(UiEvent::SelectNext),
            KeyCode::Char('p') => Some(UiEvent::OpenProposalForm),
            KeyCode::Char('y') => Some(UiEvent::Vote(VoteOption::Yes)),
            KeyCode::Char('n') => Some(UiEvent::Vote(VoteOption::No)),
            KeyCode::Char('a') => Some(UiEvent::Vote(VoteOption::Abstain)),
            KeyCode::Char('v') => Some(UiEvent::Vote(VoteOption::NoWithVeto)),
            _ => None,
        },
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_editing_captures_characters() {
        let ctx = KeyContext {
            tab: AppTab::Wallet,
            input_mode: InputMode::Editing,
            ..KeyContext::default()
        };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('q')), ctx), Some(UiEvent::CharInput('q')));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('1')), ctx), Some(UiEvent::CharInput('1')));
        assert_eq!(key_to_ui_event(press(KeyCode::Esc), ctx), Some(UiEvent::StopEditing));
    }

    #[test]
    fn test_tab_specific_keys() {
        let mining = KeyContext { tab: AppTab::Mining, ..KeyContext::default() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('s')), mining), Some(UiEvent::StartMining));

        let wallet = KeyContext { tab: AppTab::Wallet, ..KeyContext::default() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('s')), wallet), Some(UiEvent::Submit));

        let gov = KeyContext { tab: AppTab::Governance, ..KeyContext::default() };
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('v')), gov),
            Some(UiEvent::Vote(VoteOption::NoWithVeto))
        );
    }

    #[test]
    fn test_popups_take_precedence() {
        let ctx = KeyContext { show_help: true, ..KeyContext::default() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('q')), ctx), Some(UiEvent::CloseHelp));

        let ctx = KeyContext { detail_open: true, ..KeyContext::default() };
        assert_eq!(key_to_ui_event(press(KeyCode::Char('2')), ctx), None);
        assert_eq!(key_to_ui_event(press(KeyCode::Esc), ctx), Some(UiEvent::ClosePopup));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctx = KeyContext { input_mode: InputMode::Editing, ..KeyContext::default() };
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, ctx), Some(UiEvent::Quit));
    }
}
