// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use yendor_app::{BrowserCommand, BrowserState, Catalog, Category};

const APP_TITLE: &str = " NetHack Reference Guide ";
const STATUS_TEXT: &str = "↑/↓: Navigate | Tab: Change Category | /: Search | q: Quit";
const SEARCH_HINT: &str = "Press '/' to search";

/// Raw mode active flag, checked by the panic hook so restoration happens
/// before the panic message is printed.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Scoped owner of the terminal's raw-mode/alternate-screen resource.
///
/// Acquisition enables raw mode, enters the alternate screen, and hides the
/// cursor; `Drop` restores all three on every exit path. A panic hook covers
/// unwinding so the terminal is never left in raw mode.
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        if let Err(error) = execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide
        ) {
            restore_terminal_best_effort();
            return Err(error).context("enter alternate screen");
        }

        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal_best_effort();
            previous(info);
        }));

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal_best_effort();
        let _ = panic::take_hook();
    }
}

/// Idempotent terminal restoration, shared by `Drop` and the panic hook.
fn restore_terminal_best_effort() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = execute!(
            io::stdout(),
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        let _ = disable_raw_mode();
    }
}

/// Drive the browser until the user quits. Single-threaded: measure the
/// viewport, draw, block for the next event, dispatch, repeat.
pub fn run_app(state: &mut BrowserState, catalog: &Catalog) -> Result<()> {
    let _guard = TerminalGuard::acquire()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    loop {
        // Re-measure every frame so a resize between events can never make
        // the renderer write past the list area.
        let size = terminal.size().context("query terminal size")?;
        let rows = list_viewport_rows(Rect::new(0, 0, size.width, size.height));
        state.dispatch(catalog, BrowserCommand::SetViewportRows(rows));

        terminal
            .draw(|frame| render(frame, state, catalog))
            .context("draw frame")?;

        match event::read().context("read event")? {
            Event::Key(key) => {
                if handle_key_event(state, catalog, key) {
                    break;
                }
            }
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    Ok(())
}

/// Map one key event onto browser commands. Returns `true` when the loop
/// should terminate. Unrecognized keys are silently dropped.
pub fn handle_key_event(state: &mut BrowserState, catalog: &Catalog, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.search_active {
        match key.code {
            KeyCode::Esc => {
                state.dispatch(catalog, BrowserCommand::ExitSearch { commit: false });
            }
            KeyCode::Enter => {
                state.dispatch(catalog, BrowserCommand::ExitSearch { commit: true });
            }
            KeyCode::Backspace => {
                state.dispatch(catalog, BrowserCommand::QueryPop);
            }
            KeyCode::Char(character)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && is_printable(character) =>
            {
                state.dispatch(catalog, BrowserCommand::QueryPush(character));
            }
            // Navigation keys are deliberately swallowed while searching so
            // typed letters always land in the query buffer.
            _ => {}
        }
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('/'), KeyModifiers::NONE) => {
            state.dispatch(catalog, BrowserCommand::EnterSearch);
        }
        (KeyCode::Tab, _) => {
            state.dispatch(catalog, BrowserCommand::NextCategory);
        }
        (KeyCode::BackTab, _) => {
            state.dispatch(catalog, BrowserCommand::PrevCategory);
        }
        (KeyCode::Up, _) => {
            state.dispatch(catalog, BrowserCommand::MoveSelection(-1));
        }
        (KeyCode::Down, _) => {
            state.dispatch(catalog, BrowserCommand::MoveSelection(1));
        }
        (KeyCode::PageUp, _) => {
            state.dispatch(catalog, BrowserCommand::PageUp);
        }
        (KeyCode::PageDown, _) => {
            state.dispatch(catalog, BrowserCommand::PageDown);
        }
        (KeyCode::Home, _) => {
            state.dispatch(catalog, BrowserCommand::JumpToStart);
        }
        (KeyCode::End, _) => {
            state.dispatch(catalog, BrowserCommand::JumpToEnd);
        }
        _ => {}
    }
    false
}

fn is_printable(character: char) -> bool {
    character == ' ' || character.is_ascii_graphic()
}

/// Vertical split shared by the renderer and the viewport measurement:
/// tabs, search line, list, detail, status.
fn layout_areas(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area)
}

/// List rows available inside the bordered list block for a frame of the
/// given size. Zero on degenerate terminals.
fn list_viewport_rows(area: Rect) -> usize {
    let layout = layout_areas(area);
    usize::from(layout[2].height.saturating_sub(2))
}

fn render(frame: &mut ratatui::Frame<'_>, state: &BrowserState, catalog: &Catalog) {
    let layout = layout_areas(frame.area());

    let selected = Category::ALL
        .iter()
        .position(|category| *category == state.category)
        .unwrap_or(0);
    let tabs = Tabs::new(
        Category::ALL
            .iter()
            .map(|category| category.label())
            .collect::<Vec<_>>(),
    )
    .block(Block::default().title(APP_TITLE).borders(Borders::ALL))
    .style(Style::default().fg(Color::White))
    .highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .select(selected);
    frame.render_widget(tabs, layout[0]);

    let search = Paragraph::new(search_line_text(state)).style(if state.search_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    });
    frame.render_widget(search, layout[1]);

    let lines = list_lines(state, catalog)
        .into_iter()
        .map(|(text, is_selected)| {
            if is_selected {
                Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Line::raw(text)
            }
        })
        .collect::<Vec<_>>();
    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, layout[2]);

    let detail_width = usize::from(layout[3].width.saturating_sub(2));
    let detail = Paragraph::new(detail_text(state, catalog, detail_width))
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(detail, layout[3]);

    let status = Paragraph::new(STATUS_TEXT).style(Style::default().fg(Color::White).bg(Color::Blue));
    frame.render_widget(status, layout[4]);
}

fn search_line_text(state: &BrowserState) -> String {
    if state.search_active {
        format!("Search: {}", state.query)
    } else if state.query.is_empty() {
        SEARCH_HINT.to_owned()
    } else {
        format!("Filter: {} ({} matches)", state.query, state.view().len())
    }
}

/// The rows inside the current scroll window, paired with a selected flag.
/// Never yields more rows than the viewport holds.
fn list_lines(state: &BrowserState, catalog: &Catalog) -> Vec<(String, bool)> {
    let records = catalog.records(state.category);
    state
        .visible_range()
        .filter_map(|position| {
            let record = records.get(*state.view().get(position)?)?;
            Some((record.list_line(), position == state.selected))
        })
        .collect()
}

fn detail_text(state: &BrowserState, catalog: &Catalog, width: usize) -> String {
    state
        .selected_record(catalog)
        .and_then(|record| record.description())
        .map(|description| truncate_with_ellipsis(description, width))
        .unwrap_or_default()
}

fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_owned();
    }
    if max_width < 4 {
        return text.chars().take(max_width).collect();
    }
    let mut truncated = text.chars().take(max_width - 3).collect::<String>();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        detail_text, handle_key_event, is_printable, list_lines, list_viewport_rows,
        search_line_text, truncate_with_ellipsis,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;
    use yendor_app::{BrowserCommand, BrowserState, Catalog, Category};

    fn state_with_viewport(catalog: &Catalog, category: Category, rows: usize) -> BrowserState {
        let mut state = BrowserState::new(catalog, category);
        state.dispatch(catalog, BrowserCommand::SetViewportRows(rows));
        state
    }

    fn run_key_script(state: &mut BrowserState, catalog: &Catalog, keys: &[KeyEvent]) -> bool {
        let mut quit = false;
        for key in keys {
            quit = handle_key_event(state, catalog, *key);
        }
        quit
    }

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chars(text: &str) -> Vec<KeyEvent> {
        text.chars()
            .map(|character| plain(KeyCode::Char(character)))
            .collect()
    }

    #[test]
    fn q_quits_in_navigation_mode() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);
        assert!(handle_key_event(
            &mut state,
            &catalog,
            plain(KeyCode::Char('q'))
        ));
    }

    #[test]
    fn ctrl_c_quits_even_while_searching() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);
        state.dispatch(&catalog, BrowserCommand::EnterSearch);
        assert!(handle_key_event(
            &mut state,
            &catalog,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn tab_and_backtab_cycle_categories() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Tab));
        assert_eq!(state.category, Category::Monsters);

        handle_key_event(&mut state, &catalog, plain(KeyCode::BackTab));
        assert_eq!(state.category, Category::Items);

        handle_key_event(&mut state, &catalog, plain(KeyCode::BackTab));
        assert_eq!(state.category, Category::Symbols);
    }

    #[test]
    fn arrow_and_jump_keys_move_the_selection() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 5);

        run_key_script(
            &mut state,
            &catalog,
            &[plain(KeyCode::Down), plain(KeyCode::Down), plain(KeyCode::Up)],
        );
        assert_eq!(state.selected, 1);

        handle_key_event(&mut state, &catalog, plain(KeyCode::End));
        assert_eq!(state.selected, 14);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Home));
        assert_eq!(state.selected, 0);
        assert_eq!(state.scroll, 0);

        handle_key_event(&mut state, &catalog, plain(KeyCode::PageDown));
        assert_eq!(state.selected, 5);
    }

    #[test]
    fn slash_enters_search_and_typing_filters_incrementally() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        assert!(state.search_active);
        assert_eq!(state.query, "");

        run_key_script(&mut state, &catalog, &chars("potion"));
        assert_eq!(state.query, "potion");
        assert_eq!(state.view().len(), 2);
    }

    #[test]
    fn escape_abandons_the_search_and_restores_the_full_listing() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        run_key_script(&mut state, &catalog, &chars("wand"));
        assert_eq!(state.view().len(), 1);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Esc));
        assert!(!state.search_active);
        assert_eq!(state.query, "");
        assert_eq!(state.view().len(), catalog.records(Category::Items).len());
    }

    #[test]
    fn enter_commits_the_filter_and_returns_to_navigation() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        run_key_script(&mut state, &catalog, &chars("potion"));
        handle_key_event(&mut state, &catalog, plain(KeyCode::Enter));

        assert!(!state.search_active);
        assert_eq!(state.query, "potion");
        assert_eq!(state.view().len(), 2);

        // Navigation works again after the commit.
        handle_key_event(&mut state, &catalog, plain(KeyCode::Down));
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn navigation_keys_are_swallowed_while_searching() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        run_key_script(
            &mut state,
            &catalog,
            &[
                plain(KeyCode::Down),
                plain(KeyCode::PageDown),
                plain(KeyCode::Home),
                plain(KeyCode::End),
                plain(KeyCode::Tab),
            ],
        );
        assert_eq!(state.selected, 0);
        assert_eq!(state.category, Category::Items);

        // 'q' is query text while searching, not quit.
        let quit = handle_key_event(&mut state, &catalog, plain(KeyCode::Char('q')));
        assert!(!quit);
        assert_eq!(state.query, "q");
    }

    #[test]
    fn backspace_edits_the_query_and_refilters() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        run_key_script(&mut state, &catalog, &chars("potionx"));
        assert!(state.view().is_empty());

        handle_key_event(&mut state, &catalog, plain(KeyCode::Backspace));
        assert_eq!(state.query, "potion");
        assert_eq!(state.view().len(), 2);
    }

    #[test]
    fn unrecognized_keys_are_ignored_in_both_modes() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);
        let before = state.clone();

        assert!(!handle_key_event(&mut state, &catalog, plain(KeyCode::F(5))));
        assert!(!handle_key_event(
            &mut state,
            &catalog,
            plain(KeyCode::Char('x'))
        ));
        assert_eq!(state, before);

        state.dispatch(&catalog, BrowserCommand::EnterSearch);
        assert!(!handle_key_event(&mut state, &catalog, plain(KeyCode::F(5))));
        assert_eq!(state.query, "");
    }

    #[test]
    fn no_match_search_renders_zero_rows_without_crashing() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        run_key_script(&mut state, &catalog, &chars("xz"));

        assert!(state.view().is_empty());
        assert_eq!(state.selected, 0);
        assert!(list_lines(&state, &catalog).is_empty());
        assert_eq!(detail_text(&state, &catalog, 40), "");
    }

    #[test]
    fn list_lines_cap_at_the_viewport_and_mark_the_selection() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Symbols, 5);
        run_key_script(
            &mut state,
            &catalog,
            &[plain(KeyCode::Down), plain(KeyCode::Down)],
        );

        let lines = list_lines(&state, &catalog);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].0, "@ - Player or human monster");
        assert!(lines[2].1, "third visible row should be selected");
        assert_eq!(lines.iter().filter(|(_, selected)| *selected).count(), 1);
    }

    #[test]
    fn zero_height_viewport_renders_no_rows() {
        let catalog = Catalog::new();
        let state = state_with_viewport(&catalog, Category::Items, 0);
        assert!(list_lines(&state, &catalog).is_empty());
    }

    #[test]
    fn scrolled_window_starts_at_the_scroll_offset() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Commands, 10);
        handle_key_event(&mut state, &catalog, plain(KeyCode::End));

        let lines = list_lines(&state, &catalog);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[9].0, "S - Save and exit the game");
        assert!(lines[9].1);
    }

    #[test]
    fn search_line_reflects_the_three_query_states() {
        let catalog = Catalog::new();
        let mut state = state_with_viewport(&catalog, Category::Items, 10);
        assert_eq!(search_line_text(&state), "Press '/' to search");

        handle_key_event(&mut state, &catalog, plain(KeyCode::Char('/')));
        run_key_script(&mut state, &catalog, &chars("potion"));
        assert_eq!(search_line_text(&state), "Search: potion");

        handle_key_event(&mut state, &catalog, plain(KeyCode::Enter));
        assert_eq!(search_line_text(&state), "Filter: potion (2 matches)");
    }

    #[test]
    fn detail_text_shows_the_description_truncated_to_width() {
        let catalog = Catalog::new();
        let state = state_with_viewport(&catalog, Category::Items, 10);
        assert_eq!(
            detail_text(&state, &catalog, 30),
            "The main objective of the g..."
        );
        assert_eq!(
            detail_text(&state, &catalog, 200),
            "The main objective of the game. Retrieve this from the Wizard of Yendor."
        );
    }

    #[test]
    fn command_records_render_an_empty_detail_pane() {
        let catalog = Catalog::new();
        let state = state_with_viewport(&catalog, Category::Commands, 10);
        assert_eq!(detail_text(&state, &catalog, 40), "");
    }

    #[test]
    fn truncation_appends_ellipsis_only_when_needed() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_with_ellipsis("a longer sentence", 10), "a longe...");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn viewport_rows_shrink_with_the_terminal_and_never_underflow() {
        assert_eq!(list_viewport_rows(Rect::new(0, 0, 80, 24)), 14);
        assert_eq!(list_viewport_rows(Rect::new(0, 0, 80, 10)), 0);
        assert_eq!(list_viewport_rows(Rect::new(0, 0, 80, 0)), 0);
    }

    #[test]
    fn printable_filter_accepts_space_and_rejects_controls() {
        assert!(is_printable(' '));
        assert!(is_printable('~'));
        assert!(is_printable('@'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\t'));
    }
}
