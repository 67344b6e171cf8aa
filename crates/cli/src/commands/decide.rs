// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gt decide`: the interactive decision TUI (component H, §4.8). A
//! ratatui/crossterm raw-mode loop over the decision engine and its
//! anti-hijack lock (`gt_engine::decision::lock`), grounded in the wider
//! pack's TUI reference code rather than the teacher, which has no TUI
//! crate of its own (SPEC_FULL.md §C item 1).

use std::collections::HashSet;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use gt_adapters::{BdWorkItemClient, DesktopNotifyAdapter, NotifyAdapter, TmuxAdapter, WorkItemClient};
use gt_core::{Decision, DecisionId, SystemClock, Urgency, WorkItemFilter};
use gt_engine::decision::{lock::InputMode, parse, peek_target, DecisionListState};
use gt_engine::{env, DecisionEngine};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

/// Urgency's display color, hand-written rather than `strum`-derived: the
/// workspace's aligned dependency table carries no `strum` crate.
fn urgency_color(u: Urgency) -> Color {
    match u {
        Urgency::High => Color::Red,
        Urgency::Medium => Color::Yellow,
        Urgency::Low => Color::Green,
    }
}

fn urgency_label(u: Urgency) -> &'static str {
    match u {
        Urgency::High => "high",
        Urgency::Medium => "medium",
        Urgency::Low => "low",
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Filter {
    All,
    HighOnly,
}

struct Peek {
    target: String,
    lines: Vec<String>,
    scroll: u16,
}

pub async fn run() -> Result<()> {
    let store = BdWorkItemClient::new();
    let sessions = TmuxAdapter::new();
    let notify = DesktopNotifyAdapter::new();
    let engine = DecisionEngine::new(store.clone(), SystemClock);

    let mut guard = TerminalGuard::new()?;

    let mut decisions = fetch_decisions(&store).await?;
    let mut known: HashSet<DecisionId> = decisions.iter().map(|d| d.id.clone()).collect();
    let mut filter = Filter::All;
    let mut list_state = DecisionListState::new(visible_ids(&decisions, filter));
    let mut last_poll = Instant::now();
    let mut peek: Option<Peek> = None;
    let mut status = String::new();

    loop {
        guard
            .terminal
            .draw(|f| render(f, &decisions, &list_state, filter, &peek, &status))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(p) = &mut peek {
                    match key.code {
                        KeyCode::Up => p.scroll = p.scroll.saturating_sub(1),
                        KeyCode::Down => p.scroll = p.scroll.saturating_add(1),
                        KeyCode::PageUp => p.scroll = p.scroll.saturating_sub(10),
                        KeyCode::PageDown => p.scroll = p.scroll.saturating_add(10),
                        _ => peek = None,
                    }
                    continue;
                }

                match list_state.input_mode() {
                    InputMode::Rationale => match key.code {
                        KeyCode::Char(c) => list_state.type_rationale_char(c),
                        KeyCode::Backspace => list_state.backspace_rationale(),
                        KeyCode::Enter => {
                            // Capture the locked id before `confirm()`, which clears the
                            // lock whether it succeeds or refuses.
                            let locked = list_state.locked_id().cloned();
                            if let Some((choice, rationale)) = list_state.confirm() {
                                let target = locked.and_then(|id| decisions.iter().find(|d| d.id == id));
                                status = match target {
                                    Some(decision) => respond_to(&engine, decision, choice, rationale).await,
                                    None => "locked decision vanished before it could be resolved".to_string(),
                                };
                                decisions = fetch_decisions(&store).await?;
                                list_state.refresh(visible_ids(&decisions, filter));
                            } else {
                                status = "selection no longer matches; lock cleared".to_string();
                            }
                        }
                        KeyCode::Esc => {
                            list_state.refresh(visible_ids(&decisions, filter));
                        }
                        _ => {}
                    },
                    InputMode::Normal | InputMode::FreeTextDisabled => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Up | KeyCode::Char('k') => list_state.navigate(-1),
                        KeyCode::Down | KeyCode::Char('j') => list_state.navigate(1),
                        KeyCode::Char('!') => {
                            filter = Filter::HighOnly;
                            list_state.refresh(visible_ids(&decisions, filter));
                        }
                        KeyCode::Char('a') => {
                            filter = Filter::All;
                            list_state.refresh(visible_ids(&decisions, filter));
                        }
                        KeyCode::Char('R') => {
                            decisions = fetch_decisions(&store).await?;
                            notify_new(&notify, &decisions, &mut known).await;
                            list_state.refresh(visible_ids(&decisions, filter));
                            last_poll = Instant::now();
                        }
                        KeyCode::Char('p') => {
                            if let Some(id) = list_state.highlighted() {
                                if let Some(decision) = decisions.iter().find(|d| &d.id == id) {
                                    peek = build_peek(&sessions, decision).await;
                                }
                            }
                        }
                        KeyCode::Char(c @ '1'..='9') => {
                            let choice = c.to_digit(10).unwrap_or(0) as usize;
                            if let Some(decision) = list_state.highlighted().and_then(|id| decisions.iter().find(|d| &d.id == id)) {
                                if choice <= decision.options.len() {
                                    list_state.select_option(choice);
                                }
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        if last_poll.elapsed() >= env::decision_poll() {
            decisions = fetch_decisions(&store).await?;
            notify_new(&notify, &decisions, &mut known).await;
            list_state.refresh(visible_ids(&decisions, filter));
            last_poll = Instant::now();
        }
    }

    Ok(())
}

async fn respond_to(
    engine: &DecisionEngine<BdWorkItemClient, SystemClock>,
    decision: &Decision,
    choice: usize,
    rationale: Option<String>,
) -> String {
    match engine.respond(decision, choice, rationale, "operator").await {
        Ok(_) => format!("resolved {}", decision.id.as_str()),
        Err(err) => format!("failed to resolve {}: {err}", decision.id.as_str()),
    }
}

async fn build_peek<S: gt_adapters::SessionAdapter>(sessions: &S, decision: &Decision) -> Option<Peek> {
    let target = match peek_target(&decision.requested_by) {
        Ok(name) => name,
        Err(err) => {
            return Some(Peek {
                target: decision.requested_by.clone(),
                lines: vec![err.to_string()],
                scroll: 0,
            })
        }
    };
    let output = sessions.capture_output(&target, 100).await.unwrap_or_default();
    Some(Peek {
        target,
        lines: output.lines().map(str::to_string).collect(),
        scroll: 0,
    })
}

async fn notify_new(notify: &DesktopNotifyAdapter, decisions: &[Decision], known: &mut HashSet<DecisionId>) {
    for d in decisions.iter().filter(|d| d.is_pending() && !known.contains(&d.id)) {
        let _ = notify
            .notify("New Gas Town decision", &format!("{}: {}", urgency_label(d.urgency), d.prompt))
            .await;
        known.insert(d.id.clone());
    }
}

async fn fetch_decisions(store: &BdWorkItemClient) -> Result<Vec<Decision>> {
    let filter = WorkItemFilter {
        issue_type: Some(gt_core::IssueType::Decision),
        ..Default::default()
    };
    let items = store.list(&filter).await?;
    let mut decisions: Vec<Decision> = items
        .iter()
        .filter(|i| i.is_decision_work_item() && !i.status.is_terminal())
        .map(parse)
        .collect();
    // Sort by urgency (high < medium < low), then requested_at descending (§4.8).
    decisions.sort_by(|a, b| {
        urgency_rank(a.urgency)
            .cmp(&urgency_rank(b.urgency))
            .then(b.requested_at_unix.cmp(&a.requested_at_unix))
    });
    Ok(decisions)
}

fn urgency_rank(u: Urgency) -> u8 {
    match u {
        Urgency::High => 0,
        Urgency::Medium => 1,
        Urgency::Low => 2,
    }
}

fn visible_ids(decisions: &[Decision], filter: Filter) -> Vec<DecisionId> {
    decisions
        .iter()
        .filter(|d| matches!(filter, Filter::All) || d.urgency == Urgency::High)
        .map(|d| d.id.clone())
        .collect()
}

fn render(
    f: &mut Frame,
    decisions: &[Decision],
    list_state: &DecisionListState,
    filter: Filter,
    peek: &Option<Peek>,
    status: &str,
) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    if let Some(p) = peek {
        let title = format!("peek: {} (any key to dismiss, ↑/↓ to scroll)", p.target);
        let text = p.lines.join("\n");
        let para = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .scroll((p.scroll, 0))
            .wrap(Wrap { trim: false });
        f.render_widget(para, chunks[0]);
    } else {
        let filter_label = match filter {
            Filter::All => "all",
            Filter::HighOnly => "high-only (!)",
        };
        let visible = visible_ids(decisions, filter);
        let items: Vec<ListItem> = visible
            .iter()
            .filter_map(|id| decisions.iter().find(|d| &d.id == id))
            .map(|d| decision_item(d, list_state))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("decisions ({filter_label})")),
        );
        f.render_widget(list, chunks[0]);
    }

    let hint = match list_state.input_mode() {
        InputMode::Rationale => "type a rationale, Enter to confirm, Esc to cancel",
        InputMode::FreeTextDisabled => "free-text entry is disabled",
        InputMode::Normal => "↑/↓ move · 1-9 choose · p peek · ! high-only · a all · R refresh · q quit",
    };
    let footer = Paragraph::new(vec![Line::from(status), Line::from(hint)])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[1]);
}

fn decision_item<'a>(d: &'a Decision, list_state: &DecisionListState) -> ListItem<'a> {
    let highlighted = list_state.highlighted() == Some(&d.id);
    let locked = list_state.locked_id() == Some(&d.id);
    let mut spans = vec![
        Span::styled(format!("[{}] ", urgency_label(d.urgency)), Style::default().fg(urgency_color(d.urgency))),
        Span::raw(d.prompt.clone()),
    ];
    if locked {
        spans.push(Span::styled(" (locked)", Style::default().add_modifier(Modifier::BOLD)));
    }
    let style = if highlighted {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(style)
}

/// Owns raw-mode/alternate-screen terminal setup and restores it on drop,
/// so an early return or error never leaves the user's shell in raw mode.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}
