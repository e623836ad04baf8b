//! WTF Cosmos TUI - Actor-based dashboard for the toy chain
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - polling feeds and action execution

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use wtf_cosmos_tui::app::state::{BusyFlags, WalletFocus};
use wtf_cosmos_tui::config::Config;
use wtf_cosmos_tui::constants::{APP_NAME, APP_VERSION, BLOCK_REWARD};
use wtf_cosmos_tui::format::{
    block_age, format_currency, format_duration, format_hash_rate, format_number,
    format_timestamp, now_millis, truncate_hash,
};
use wtf_cosmos_tui::messages::ui_events::{key_to_ui_event, AppTab, InputMode};
use wtf_cosmos_tui::models::{ProposalStatus, VoteOption};
use wtf_cosmos_tui::ui::{
    centered_rect, fill_color, notification_color, proposal_status_color, render_form,
    render_tabs, stat_card, toast_rect,
};
use wtf_cosmos_tui::{AppActor, NetworkActor, NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!(api_base = %config.api_base, "Starting {} {}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let api_base = config.api_base.clone();
    let network_actor = NetworkActor::new(config, net_resp_tx);
    let network = tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(api_base, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    // Give the network actor a moment to cancel pollers and in-flight actions
    let _ = tokio::time::timeout(Duration::from_secs(1), network).await;
    tracing::info!("Shut down");

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.key_context()) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    // Main layout with tab bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.active_tab {
        AppTab::Dashboard => draw_dashboard_tab(f, state, main_chunks[1]),
        AppTab::Wallet => draw_wallet_tab(f, state, main_chunks[1]),
        AppTab::Mining => draw_mining_tab(f, state, main_chunks[1]),
        AppTab::Governance => draw_governance_tab(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_block_detail {
        draw_block_detail_popup(f, state, area);
    }
    if state.show_proposal_form {
        draw_proposal_form_popup(f, state, area);
    }
    if state.created_wallet.is_some() {
        draw_wallet_popup(f, state, area);
    }
    if state.busy.chain {
        draw_loading_overlay(f, area, "Initializing blockchain...");
    }
    if state.show_help {
        draw_help_popup(f, area);
    }

    draw_notification(f, state, area);
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let titles: Vec<String> = AppTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!(" {}:{} ", i + 1, tab.title()))
        .collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let selected = AppTab::ALL
        .iter()
        .position(|t| *t == state.active_tab)
        .unwrap_or(0);
    f.render_widget(render_tabs(&titles, selected), chunks[0]);

    let (label, color) = if state.stats.mining_status {
        ("[*] mining", Color::Green)
    } else {
        ("[-] idle", Color::DarkGray)
    };
    let right = Paragraph::new(Line::from(vec![
        Span::styled(format!("#{} ", state.stats.height), Style::default().fg(Color::Cyan)),
        Span::styled(label, Style::default().fg(color)),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

fn border_for(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn busy_suffix(busy: bool, text: &str) -> String {
    if busy {
        format!(" [{}]", text)
    } else {
        String::new()
    }
}

// ----------------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------------

fn draw_dashboard_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats cards
            Constraint::Length(1), // Feed error
            Constraint::Min(5),    // Blocks
        ])
        .split(area);

    draw_stats_cards(f, state, chunks[0]);

    if let Some(error) = &state.stats_error {
        let line = Paragraph::new(Span::styled(
            format!(" {} (showing last known values) ", error),
            Style::default().fg(Color::Red),
        ));
        f.render_widget(line, chunks[1]);
    }

    draw_blocks_list(f, state, chunks[2]);
}

fn draw_stats_cards(f: &mut Frame, state: &RenderState, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let loading = state.stats_loading;
    let stats = &state.stats;
    f.render_widget(stat_card("Block height", format_number(stats.height as f64), loading), cards[0]);
    f.render_widget(
        stat_card("Pending txs", format_number(stats.pending_transactions as f64), loading),
        cards[1],
    );
    f.render_widget(stat_card("Total supply", format_currency(stats.total_supply), loading), cards[2]);
    let mining = if stats.mining_status { "Active" } else { "Stopped" };
    f.render_widget(stat_card("Mining", mining.to_string(), loading), cards[3]);
}

fn draw_blocks_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = if state.blocks_loading { " [...]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Latest blocks{} (Up/Down select, Enter detail) ", loading));

    if state.blocks.is_empty() {
        let text = if state.blocks_loading { "Loading blocks..." } else { "No blocks yet" };
        let empty = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))).block(block);
        f.render_widget(empty, area);
        return;
    }

    let now = now_millis();
    let items: Vec<ListItem> = state
        .blocks
        .iter()
        .map(|b| {
            let fill = b.fill_percent();
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<8}", b.index), Style::default().fg(Color::Cyan).bold()),
                Span::raw(format!("{:<22}", truncate_hash(&b.hash, 10, 8))),
                Span::raw(format!("{:>4} txs  ", b.transactions.len())),
                Span::styled(format!("{:>4}%  ", fill), Style::default().fg(fill_color(fill))),
                Span::styled(block_age(b.timestamp, now), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_block));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_block_detail_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(b) = state.selected_block() else {
        return;
    };
    let popup_area = centered_rect(70, 70, area);

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![Span::styled("Hash:      ", label), Span::raw(b.hash.clone())]),
        Line::from(vec![Span::styled("Previous:  ", label), Span::raw(b.previous_hash.clone())]),
        Line::from(vec![Span::styled("Time:      ", label), Span::raw(format_timestamp(b.timestamp))]),
        Line::from(vec![Span::styled("Nonce:     ", label), Span::raw(b.nonce.to_string())]),
        Line::from(vec![
            Span::styled("Size:      ", label),
            Span::raw(format!("~{} bytes ({}% full)", format_number(b.approx_size() as f64), b.fill_percent())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Transactions ({})", b.transactions.len()),
            Style::default().bold(),
        )),
    ];
    for tx in &b.transactions {
        let from = tx
            .from_address
            .as_deref()
            .map(|a| truncate_hash(a, 10, 6))
            .unwrap_or_else(|| "Coinbase".to_string());
        lines.push(Line::from(vec![
            Span::raw(format!("  {} -> {}  ", from, truncate_hash(&tx.to_address, 10, 6))),
            Span::styled(format_currency(tx.amount), Style::default().fg(Color::Green)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Block #{} (Esc to close) ", b.index))
        .style(Style::default().bg(Color::Black));
    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(detail, popup_area);
}

// ----------------------------------------------------------------------------
// Wallet
// ----------------------------------------------------------------------------

fn draw_wallet_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    let busy = &state.busy;

    // Transfer
    let transfer_focused = state.wallet_focus == WalletFocus::Transfer;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_for(transfer_focused))
        .title(format!(" Transfer{} (s:send) ", busy_suffix(busy.transfer, "Sending...")));
    let inner = block.inner(columns[0]);
    f.render_widget(block, columns[0]);
    if let Some(pos) = render_form(f, &state.transfer_form, inner, transfer_focused, editing) {
        f.set_cursor_position(pos);
    }

    // Balance + wallet creation
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(columns[1]);

    let balance_focused = state.wallet_focus == WalletFocus::Balance;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_for(balance_focused))
        .title(format!(" Balance{} (s:query) ", busy_suffix(busy.wallet, "Working...")));
    let inner = block.inner(right[0]);
    f.render_widget(block, right[0]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);
    if let Some(pos) = render_form(f, &state.balance_form, rows[0], balance_focused, editing) {
        f.set_cursor_position(pos);
    }
    if let Some(result) = &state.balance_result {
        let color = if result.starts_with("Balance") { Color::Green } else { Color::Red };
        f.render_widget(Paragraph::new(Span::styled(result.clone(), Style::default().fg(color))), rows[1]);
    }

    let help = Paragraph::new(vec![
        Line::from("w          create a new wallet"),
        Line::from("Tab/Down   next field"),
        Line::from("e/Enter    edit field"),
        Line::from("s          submit focused form"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL).title(" Keys "));
    f.render_widget(help, right[1]);
}

fn draw_wallet_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(wallet) = &state.created_wallet else {
        return;
    };
    let popup_area = centered_rect(70, 40, area);
    let label = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(vec![Span::styled("Address:     ", label), Span::raw(wallet.address.clone())]),
        Line::from(vec![Span::styled("Public key:  ", label), Span::raw(wallet.public_key.clone())]),
        Line::from(vec![Span::styled("Private key: ", label), Span::raw(wallet.private_key.clone())]),
        Line::from(""),
        Line::from(Span::styled(
            "Store the private key safely. It will not be shown again.",
            Style::default().fg(Color::Yellow).bold(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New wallet (Esc to close) ")
        .style(Style::default().bg(Color::Black));
    let popup = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

// ----------------------------------------------------------------------------
// Mining
// ----------------------------------------------------------------------------

fn draw_mining_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Controls
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_for(true))
        .title(format!(" Miner{} ", busy_suffix(state.busy.mining, "Working...")));
    let inner = block.inner(columns[0]);
    f.render_widget(block, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);
    let editing = state.input_mode == InputMode::Editing;
    if let Some(pos) = render_form(f, &state.miner_form, rows[0], true, editing) {
        f.set_cursor_position(pos);
    }
    let keys = Paragraph::new(vec![
        Line::from("e/Enter  edit address"),
        Line::from("g        fill a sample address"),
        Line::from("s        start mining"),
        Line::from("t        stop mining"),
    ])
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(keys, rows[1]);

    // Status
    let m = &state.mining;
    let loading = if state.mining_loading { " [...]" } else { "" };
    let (status, color) = if m.is_mining {
        ("Mining", Color::Green)
    } else {
        ("Stopped", Color::Red)
    };
    let label = Style::default().fg(Color::DarkGray);
    let last_block = m
        .last_block_time
        .map(|t| block_age(t, now_millis()))
        .unwrap_or_else(|| "-".to_string());
    let uptime = m
        .last_block_time
        .filter(|_| m.is_mining)
        .map(|t| format_duration(((now_millis() - t).max(0) / 1000) as u64))
        .unwrap_or_else(|| "-".to_string());
    let miner = if m.miner_address.is_empty() {
        "-".to_string()
    } else {
        truncate_hash(&m.miner_address, 12, 6)
    };

    let lines = vec![
        Line::from(vec![Span::styled("Status:       ", label), Span::styled(status, Style::default().fg(color).bold())]),
        Line::from(vec![Span::styled("Miner:        ", label), Span::raw(miner)]),
        Line::from(vec![Span::styled("Hash rate:    ", label), Span::raw(format_hash_rate(m.hash_rate))]),
        Line::from(vec![Span::styled("Difficulty:   ", label), Span::raw(m.difficulty.to_string())]),
        Line::from(vec![Span::styled("Blocks found: ", label), Span::raw(format_number(m.blocks_found as f64))]),
        Line::from(vec![Span::styled("Last block:   ", label), Span::raw(last_block)]),
        Line::from(vec![Span::styled("Since block:  ", label), Span::raw(uptime)]),
        Line::from(vec![
            Span::styled("Reward:       ", label),
            Span::raw(format_currency(BLOCK_REWARD as f64)),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Mining status{} ", loading));
    f.render_widget(Paragraph::new(lines).block(block), columns[1]);
}

// ----------------------------------------------------------------------------
// Governance
// ----------------------------------------------------------------------------

fn draw_governance_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = state
        .proposals
        .iter()
        .map(|p| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<3}", p.id), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:<9}", p.status.as_str()),
                    Style::default().fg(proposal_status_color(p.status)),
                ),
                Span::raw(p.title.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_for(true))
                .title(format!(
                    " Proposals{} (p:new) ",
                    busy_suffix(state.busy.governance, "Working...")
                )),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !state.proposals.is_empty() {
        list_state.select(Some(state.selected_proposal));
    }
    f.render_stateful_widget(list, columns[0], &mut list_state);

    draw_proposal_detail(f, state, columns[1]);
}

fn vote_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

fn draw_proposal_detail(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Detail (y/n/a/v vote) ");

    let Some(p) = state.proposals.get(state.selected_proposal) else {
        let empty = Paragraph::new(Span::styled("No proposals", Style::default().fg(Color::DarkGray)))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let ends = if p.status == ProposalStatus::Voting {
        format!("Voting ends {}", format_timestamp(p.voting_end_time))
    } else {
        format!("Voting ended {}", format_timestamp(p.voting_end_time))
    };
    let mut lines = vec![
        Line::from(Span::styled(p.title.clone(), Style::default().bold())),
        Line::from(p.description.clone()),
        Line::from(""),
        Line::from(vec![Span::styled("Proposer: ", label), Span::raw(truncate_hash(&p.proposer, 12, 6))]),
        Line::from(vec![
            Span::styled("Status:   ", label),
            Span::styled(p.status.as_str(), Style::default().fg(proposal_status_color(p.status))),
        ]),
        Line::from(vec![Span::styled("Deposit:  ", label), Span::raw(format_currency(p.total_deposit))]),
        Line::from(Span::styled(ends, label)),
        Line::from(""),
    ];

    for option in VoteOption::ALL {
        let pct = p.votes.percentage(option);
        lines.push(Line::from(vec![
            Span::raw(format!("{:<13}", option.as_str())),
            Span::styled(vote_bar(pct, 20), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {:>5.1}%  {}", pct, format_number(p.votes.get(option) as f64))),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("Total votes: {}", format_number(p.votes.total() as f64)),
        label,
    )));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_proposal_form_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 80, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " New proposal{} (s:submit Esc:cancel) ",
            busy_suffix(state.busy.governance, "Submitting...")
        ))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);
    let editing = state.input_mode == InputMode::Editing;
    if let Some(pos) = render_form(f, &state.proposal_form, inner, true, editing) {
        f.set_cursor_position(pos);
    }
}

// ----------------------------------------------------------------------------
// Overlays
// ----------------------------------------------------------------------------

fn draw_notification(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(n) = &state.notification else {
        return;
    };
    let width = (n.message.chars().count() as u16 + 4).clamp(20, 60);
    let toast_area = toast_rect(width, 3, area);
    let color = notification_color(n.kind);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} (x) ", n.kind.as_str()))
        .style(Style::default().bg(Color::Black));
    let toast = Paragraph::new(Span::styled(n.message.clone(), Style::default().fg(color)))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, toast_area);
    f.render_widget(toast, toast_area);
}

fn draw_loading_overlay(f: &mut Frame, area: Rect, text: &str) {
    let popup_area = centered_rect(40, 15, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let overlay = Paragraph::new(text).alignment(Alignment::Center).block(block);

    f.render_widget(Clear, popup_area);
    f.render_widget(overlay, popup_area);
}

fn busy_label(busy: &BusyFlags) -> Option<&'static str> {
    if busy.chain {
        Some(" Initializing blockchain... ")
    } else if busy.transfer {
        Some(" Submitting transfer... ")
    } else if busy.mining {
        Some(" Updating miner... ")
    } else if busy.wallet {
        Some(" Wallet request... ")
    } else if busy.governance {
        Some(" Governance request... ")
    } else {
        None
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Tab:next field "
    } else {
        " 1-4:tab | r:refresh | i:init chain | x:dismiss | ?:help | q:quit "
    };
    let status = match busy_label(&state.busy) {
        Some(busy) => format!("{}|{}", busy, hints),
        None => format!(" {} |{}", state.api_base, hints),
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = r#"
 WTF COSMOS - Keyboard Shortcuts

 GENERAL
   1-4                Switch tab
   r                  Refresh now
   i                  Initialize blockchain
   x                  Dismiss notification
   ?                  Toggle this help
   q / Ctrl+C         Quit

 DASHBOARD
   Up / Down          Select block
   Enter              Block detail

 WALLET
   Tab / Shift+Tab    Next / previous field
   e / Enter          Edit field
   s                  Send transfer / query balance
   w                  Create wallet

 MINING
   e / Enter          Edit miner address
   g                  Fill sample address
   s / t              Start / stop mining

 GOVERNANCE
   Up / Down          Select proposal
   p                  New proposal
   y / n / a / v      Vote yes / no / abstain / veto

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
