// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::time::Duration;
use stockgrid_app::{
    AppCommand, AppMode, AppState, ProductField, RecordSource, Selection, TableViewModel,
};
use tracing::warn;

const ACTIONS_HEADER: &str = "Actions";
const ACTION_LABEL: &str = "[Submit]";
const EDIT_CURSOR: &str = "▏";

/// What the shell needs from its host: a source of demo rows and somewhere
/// to send confirmed row actions.
pub trait AppRuntime {
    fn record_source(&mut self) -> &mut dyn RecordSource;
    fn row_count(&self) -> usize;
    fn confirm_row(&mut self, selection: &Selection) -> Result<()>;
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    table: &mut TableViewModel,
    runtime: &mut R,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    clamp_cursor(state, table);

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, state, table)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, table, runtime, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Applies one key press. Returns `true` when the shell should exit.
fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    table: &mut TableViewModel,
    runtime: &mut R,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        return true;
    }

    match state.mode {
        AppMode::Nav => return handle_nav_key(state, table, runtime, key),
        AppMode::Filter => handle_filter_key(state, table, key),
        AppMode::Edit => handle_edit_key(state, table, key),
        AppMode::Confirm => handle_confirm_key(state, table, runtime, key),
    }
    false
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    table: &mut TableViewModel,
    runtime: &mut R,
    key: KeyEvent,
) -> bool {
    let visible = table.visible_len();
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            state.dispatch(AppCommand::MoveRow { delta: 1, visible });
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            state.dispatch(AppCommand::MoveRow { delta: -1, visible });
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
            state.dispatch(AppCommand::JumpFirstRow);
        }
        (KeyCode::Char('G'), KeyModifiers::NONE | KeyModifiers::SHIFT) | (KeyCode::End, _) => {
            state.dispatch(AppCommand::JumpLastRow { visible });
        }
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
            state.dispatch(AppCommand::PrevColumn);
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
            state.dispatch(AppCommand::NextColumn);
        }
        (KeyCode::Char('/'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::FocusFilter);
        }
        (KeyCode::Char('i'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            begin_cell_edit(state, table);
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => open_confirm(state, table),
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            let count = runtime.row_count();
            table.generate(count, runtime.record_source());
            state.dispatch(AppCommand::JumpFirstRow);
            state.dispatch(AppCommand::SetStatus(format!("generated {count} rows")));
        }
        (KeyCode::Esc, _) => {
            if !table.filter().is_empty() {
                table.clear_filter();
                clamp_cursor(state, table);
                state.dispatch(AppCommand::SetStatus("filter cleared".to_owned()));
            } else {
                state.dispatch(AppCommand::ClearStatus);
            }
        }
        _ => {}
    }
    false
}

fn handle_filter_key(state: &mut AppState, table: &mut TableViewModel, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Enter | KeyCode::Esc, _) => {
            state.dispatch(AppCommand::ExitToNav);
        }
        (KeyCode::Backspace, _) => {
            let mut text = table.filter().to_owned();
            text.pop();
            table.set_filter(text);
            clamp_cursor(state, table);
        }
        (KeyCode::Char(ch), modifiers)
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
        {
            let mut text = table.filter().to_owned();
            text.push(ch);
            table.set_filter(text);
            clamp_cursor(state, table);
        }
        _ => {}
    }
}

fn handle_edit_key(state: &mut AppState, table: &mut TableViewModel, key: KeyEvent) {
    match (key.code, key.modifiers) {
        // Tab moves focus off the cell, which commits like blur does.
        (KeyCode::Enter | KeyCode::Tab, _) => {
            match table.commit_edit() {
                Ok(Some(edit)) => {
                    state.dispatch(AppCommand::SetStatus(format!(
                        "row {} {} saved",
                        edit.index + 1,
                        edit.field.as_str()
                    )));
                }
                Ok(None) => {}
                Err(error) => {
                    table.discard_edit();
                    state.dispatch(AppCommand::SetStatus(format!("edit failed: {error}")));
                }
            }
            state.dispatch(AppCommand::ExitToNav);
            clamp_cursor(state, table);
        }
        (KeyCode::Esc, _) => {
            table.discard_edit();
            state.dispatch(AppCommand::ExitToNav);
            state.dispatch(AppCommand::SetStatus("edit discarded".to_owned()));
        }
        (KeyCode::Backspace, _) => {
            if let Some(mut value) = table.draft().map(|draft| draft.value.clone()) {
                value.pop();
                table.update_draft(value);
            }
        }
        (KeyCode::Char(ch), modifiers)
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
        {
            if let Some(mut value) = table.draft().map(|draft| draft.value.clone()) {
                value.push(ch);
                table.update_draft(value);
            }
        }
        _ => {}
    }
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    table: &mut TableViewModel,
    runtime: &mut R,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('y'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            if let Some(selection) = table.confirm() {
                let status = match runtime.confirm_row(&selection) {
                    Ok(()) => format!("confirmed {}", selection.product.name),
                    Err(error) => {
                        warn!(index = selection.index, "confirm hook failed: {error:#}");
                        format!("confirm failed: {error}")
                    }
                };
                state.dispatch(AppCommand::SetStatus(status));
            }
            state.dispatch(AppCommand::ExitToNav);
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
            table.cancel();
            state.dispatch(AppCommand::ExitToNav);
            state.dispatch(AppCommand::SetStatus("cancelled".to_owned()));
        }
        _ => {}
    }
}

fn begin_cell_edit(state: &mut AppState, table: &mut TableViewModel) {
    let Some(index) = selected_record_index(state, table) else {
        state.dispatch(AppCommand::SetStatus("no row to edit".to_owned()));
        return;
    };
    match table.begin_edit(index, state.selected_col) {
        Ok(_) => {
            state.dispatch(AppCommand::BeginEdit);
        }
        Err(error) => {
            state.dispatch(AppCommand::SetStatus(format!("edit failed: {error}")));
        }
    }
}

fn open_confirm(state: &mut AppState, table: &mut TableViewModel) {
    let Some(index) = selected_record_index(state, table) else {
        state.dispatch(AppCommand::SetStatus("no row selected".to_owned()));
        return;
    };
    match table.select(index) {
        Ok(()) => {
            state.dispatch(AppCommand::OpenConfirm);
        }
        Err(error) => {
            state.dispatch(AppCommand::SetStatus(format!("select failed: {error}")));
        }
    }
}

/// Record index behind the cursor, which counts visible rows.
fn selected_record_index(state: &AppState, table: &TableViewModel) -> Option<usize> {
    table
        .visible_rows()
        .nth(state.selected_row)
        .map(|(index, _)| index)
}

fn clamp_cursor(state: &mut AppState, table: &TableViewModel) {
    let visible = table.visible_len();
    state.dispatch(AppCommand::ClampRow { visible });
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, table: &TableViewModel) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let filter_style = if state.mode == AppMode::Filter {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let filter = Paragraph::new(filter_bar_text(state, table))
        .style(filter_style)
        .block(Block::default().title("Search").borders(Borders::ALL));
    frame.render_widget(filter, layout[0]);

    render_table(frame, layout[1], state, table);

    let status = Paragraph::new(status_text(state, table))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, layout[2]);

    if let Some(selection) = table.selection() {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(confirm_overlay_text(selection)).block(
            Block::default()
                .title("confirm")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(dialog, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    table: &TableViewModel,
) {
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        ProductField::ALL
            .iter()
            .map(|field| field.header())
            .chain(std::iter::once(ACTIONS_HEADER))
            .map(|label| Cell::from(label).style(header_style)),
    );

    let rows = table
        .visible_rows()
        .enumerate()
        .map(|(position, (index, product))| {
            let selected_row = position == state.selected_row;
            let mut cells = ProductField::ALL
                .iter()
                .map(|field| {
                    let text = cell_text(table, index, *field, product.field(*field));
                    let mut style = Style::default();
                    if selected_row {
                        style = style.bg(Color::DarkGray);
                    }
                    if selected_row && *field == state.selected_col {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                    }
                    Cell::from(text).style(style)
                })
                .collect::<Vec<_>>();
            cells.push(Cell::from(ACTION_LABEL));
            Row::new(cells)
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(table))
                .borders(Borders::ALL),
        );
    frame.render_widget(widget, area);
}

/// Shows the draft, not the stored value, for the cell being edited.
fn cell_text(table: &TableViewModel, index: usize, field: ProductField, stored: &str) -> String {
    match table.draft() {
        Some(draft) if draft.index == index && draft.field == field => {
            format!("{}{EDIT_CURSOR}", draft.value)
        }
        _ => stored.to_owned(),
    }
}

fn table_title(table: &TableViewModel) -> String {
    if table.filter().is_empty() {
        format!("products ({})", table.len())
    } else {
        format!("products ({} of {})", table.visible_len(), table.len())
    }
}

fn filter_bar_text(state: &AppState, table: &TableViewModel) -> String {
    if state.mode == AppMode::Filter {
        format!("{}{EDIT_CURSOR}", table.filter())
    } else {
        table.filter().to_owned()
    }
}

fn confirm_overlay_text(selection: &Selection) -> String {
    let product = &selection.product;
    let mut lines = vec![format!("Submit row {}?", selection.index + 1), String::new()];
    for field in ProductField::ALL {
        lines.push(format!("{:<20} {}", field.header(), product.field(field)));
    }
    lines.push(String::new());
    lines.push("y/enter confirm | n/esc cancel".to_owned());
    lines.join("\n")
}

fn status_text(state: &AppState, table: &TableViewModel) -> String {
    let hints = match state.mode {
        AppMode::Nav => {
            "j/k/h/l move | / search | i edit | s submit | r regen | esc clear | q quit"
        }
        AppMode::Filter => "type to filter | enter/esc done",
        AppMode::Edit => "type to edit | enter/tab save | esc discard",
        AppMode::Confirm => "y confirm | n cancel",
    };
    let badge = state.mode.badge();
    let column = state.selected_col.as_str();
    let position = if table.visible_len() == 0 {
        "0/0".to_owned()
    } else {
        format!("{}/{}", state.selected_row + 1, table.visible_len())
    };
    match &state.status_line {
        Some(status) => format!("{badge} | {status} | {position} {column} | {hints}"),
        None => format!("{badge} | {position} {column} | {hints}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, confirm_overlay_text, handle_key_event, render, selected_record_index,
        status_text, table_title,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use stockgrid_app::{AppMode, AppState, ProductField, RecordSource, Selection, TableViewModel};
    use stockgrid_testkit::{ProductFaker, fixture_products};

    struct TestRuntime {
        faker: ProductFaker,
        rows: usize,
        confirmed: Vec<Selection>,
        fail_confirm: bool,
    }

    impl Default for TestRuntime {
        fn default() -> Self {
            Self {
                faker: ProductFaker::new(1),
                rows: 4,
                confirmed: Vec::new(),
                fail_confirm: false,
            }
        }
    }

    impl AppRuntime for TestRuntime {
        fn record_source(&mut self) -> &mut dyn RecordSource {
            &mut self.faker
        }

        fn row_count(&self) -> usize {
            self.rows
        }

        fn confirm_row(&mut self, selection: &Selection) -> anyhow::Result<()> {
            if self.fail_confirm {
                return Err(anyhow::anyhow!("hook unavailable"));
            }
            self.confirmed.push(selection.clone());
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(
        state: &mut AppState,
        table: &mut TableViewModel,
        runtime: &mut TestRuntime,
        codes: &[KeyCode],
    ) -> bool {
        let mut quit = false;
        for code in codes {
            quit = handle_key_event(state, table, runtime, key(*code));
        }
        quit
    }

    fn type_text(
        state: &mut AppState,
        table: &mut TableViewModel,
        runtime: &mut TestRuntime,
        text: &str,
    ) {
        for ch in text.chars() {
            handle_key_event(state, table, runtime, key(KeyCode::Char(ch)));
        }
    }

    fn fixture() -> (AppState, TableViewModel, TestRuntime) {
        (
            AppState::default(),
            TableViewModel::from_records(fixture_products()),
            TestRuntime::default(),
        )
    }

    fn rendered(state: &AppState, table: &TableViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 16)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, state, table))
            .expect("draw frame");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn quit_keys() {
        let (mut state, mut table, mut runtime) = fixture();
        assert!(press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('q')]));
        assert!(handle_key_event(
            &mut state,
            &mut table,
            &mut runtime,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        ));
    }

    #[test]
    fn typing_in_filter_mode_updates_filter_live() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('/')]);
        assert_eq!(state.mode, AppMode::Filter);

        type_text(&mut state, &mut table, &mut runtime, "deskq");
        assert_eq!(table.filter(), "deskq");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Backspace]);
        assert_eq!(table.filter(), "desk");
        assert_eq!(table.visible_len(), 1);

        press(&mut state, &mut table, &mut runtime, &[KeyCode::Enter]);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(selected_record_index(&state, &table), Some(1));
    }

    #[test]
    fn filter_clamps_cursor_to_visible_rows() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('j')]);
        assert_eq!(state.selected_row, 1);

        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('/')]);
        type_text(&mut state, &mut table, &mut runtime, "chair");
        assert_eq!(state.selected_row, 0);
        assert_eq!(selected_record_index(&state, &table), Some(0));
    }

    #[test]
    fn esc_in_nav_clears_filter() {
        let (mut state, mut table, mut runtime) = fixture();
        table.set_filter("desk");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Esc]);
        assert_eq!(table.filter(), "");
        assert_eq!(state.status_line.as_deref(), Some("filter cleared"));
    }

    #[test]
    fn inline_edit_commits_on_enter() {
        let (mut state, mut table, mut runtime) = fixture();
        press(
            &mut state,
            &mut table,
            &mut runtime,
            &[KeyCode::Char('l'), KeyCode::Char('l'), KeyCode::Char('i')],
        );
        assert_eq!(state.mode, AppMode::Edit);
        assert_eq!(state.selected_col, ProductField::Quantity);

        press(
            &mut state,
            &mut table,
            &mut runtime,
            &[KeyCode::Backspace, KeyCode::Backspace],
        );
        type_text(&mut state, &mut table, &mut runtime, "99");
        assert_eq!(table.records()[0].quantity, "010");

        press(&mut state, &mut table, &mut runtime, &[KeyCode::Enter]);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(table.records()[0].quantity, "099");
        assert_eq!(state.status_line.as_deref(), Some("row 1 quantity saved"));
    }

    #[test]
    fn inline_edit_commits_on_tab_focus_loss() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Enter]);
        type_text(&mut state, &mut table, &mut runtime, "!");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Tab]);
        assert_eq!(table.records()[0].name, "Chair!");
    }

    #[test]
    fn inline_edit_esc_discards_draft() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('i')]);
        type_text(&mut state, &mut table, &mut runtime, "xyz");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Esc]);

        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(table.records()[0].name, "Chair");
        assert!(table.draft().is_none());
    }

    #[test]
    fn modified_chars_are_not_typed_into_draft() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('i')]);
        for event in [
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
            KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT),
        ] {
            handle_key_event(&mut state, &mut table, &mut runtime, event);
        }
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Enter]);

        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(table.records()[0].name, "ChairS");
    }

    #[test]
    fn modified_chars_are_not_typed_into_filter() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('/')]);
        type_text(&mut state, &mut table, &mut runtime, "de");
        handle_key_event(
            &mut state,
            &mut table,
            &mut runtime,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        handle_key_event(
            &mut state,
            &mut table,
            &mut runtime,
            KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT),
        );
        assert_eq!(table.filter(), "de");
        assert_eq!(state.mode, AppMode::Filter);
    }

    #[test]
    fn modified_nav_letters_are_ignored() {
        let (mut state, mut table, mut runtime) = fixture();
        for code in ['s', 'j', 'i', '/'] {
            let quit = handle_key_event(
                &mut state,
                &mut table,
                &mut runtime,
                KeyEvent::new(KeyCode::Char(code), KeyModifiers::CONTROL),
            );
            assert!(!quit);
        }
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.selected_row, 0);
        assert!(table.selection().is_none());
        assert!(table.draft().is_none());
    }

    #[test]
    fn jump_keys_move_to_first_and_last_rows() {
        let (mut state, mut table, mut runtime) = fixture();
        runtime.rows = 6;
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('r')]);

        handle_key_event(
            &mut state,
            &mut table,
            &mut runtime,
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
        );
        assert_eq!(state.selected_row, 5);

        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('g')]);
        assert_eq!(state.selected_row, 0);

        press(&mut state, &mut table, &mut runtime, &[KeyCode::End]);
        assert_eq!(state.selected_row, 5);
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('r')]);
        assert_eq!(state.selected_row, 0);
    }

    #[test]
    fn edit_under_filter_targets_record_index() {
        let (mut state, mut table, mut runtime) = fixture();
        table.set_filter("desk");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('i')]);
        type_text(&mut state, &mut table, &mut runtime, "s");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Enter]);

        assert_eq!(table.records()[1].name, "Desks");
        assert_eq!(table.records()[0].name, "Chair");
    }

    #[test]
    fn edit_on_empty_view_reports_status() {
        let (mut state, mut table, mut runtime) = fixture();
        table.set_filter("nothing");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('i')]);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("no row to edit"));
    }

    #[test]
    fn confirm_forwards_snapshot_to_runtime() {
        let (mut state, mut table, mut runtime) = fixture();
        press(
            &mut state,
            &mut table,
            &mut runtime,
            &[KeyCode::Char('j'), KeyCode::Char('s')],
        );
        assert_eq!(state.mode, AppMode::Confirm);
        assert!(table.confirmation().is_pending());

        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('y')]);
        assert_eq!(state.mode, AppMode::Nav);
        assert!(!table.confirmation().is_pending());
        assert_eq!(runtime.confirmed.len(), 1);
        assert_eq!(runtime.confirmed[0].index, 1);
        assert_eq!(runtime.confirmed[0].product.name, "Desk");
        assert_eq!(table.records(), fixture_products().as_slice());
    }

    #[test]
    fn cancel_skips_runtime_hook() {
        let (mut state, mut table, mut runtime) = fixture();
        press(
            &mut state,
            &mut table,
            &mut runtime,
            &[KeyCode::Char('s'), KeyCode::Esc],
        );
        assert_eq!(state.mode, AppMode::Nav);
        assert!(runtime.confirmed.is_empty());
        assert!(table.selection().is_none());
    }

    #[test]
    fn failing_confirm_hook_is_reported() {
        let (mut state, mut table, mut runtime) = fixture();
        runtime.fail_confirm = true;
        press(
            &mut state,
            &mut table,
            &mut runtime,
            &[KeyCode::Char('s'), KeyCode::Enter],
        );
        assert_eq!(state.mode, AppMode::Nav);
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains("hook unavailable"), "status {status}");
    }

    #[test]
    fn regenerate_uses_runtime_row_count() {
        let (mut state, mut table, mut runtime) = fixture();
        runtime.rows = 7;
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('r')]);
        assert_eq!(table.len(), 7);
        assert_eq!(state.selected_row, 0);
        assert_eq!(state.status_line.as_deref(), Some("generated 7 rows"));
    }

    #[test]
    fn table_title_counts_filtered_rows() {
        let mut table = TableViewModel::from_records(fixture_products());
        assert_eq!(table_title(&table), "products (2)");
        table.set_filter("chair");
        assert_eq!(table_title(&table), "products (1 of 2)");
    }

    #[test]
    fn status_text_shows_mode_badge_and_position() {
        let (state, table, _) = fixture();
        let status = status_text(&state, &table);
        assert!(status.starts_with("NAV"));
        assert!(status.contains("1/2 name"));

        let edit = AppState {
            mode: AppMode::Edit,
            ..AppState::default()
        };
        assert!(status_text(&edit, &table).contains("enter/tab save"));
    }

    #[test]
    fn confirm_overlay_lists_snapshot_fields() {
        let selection = Selection {
            index: 0,
            product: fixture_products()[0].clone(),
        };
        let text = confirm_overlay_text(&selection);
        assert!(text.contains("Submit row 1?"));
        assert!(text.contains("Chair"));
        assert!(text.contains("0000000001"));
        assert!(text.contains("010"));
    }

    #[test]
    fn render_shows_headers_rows_and_actions() {
        let (state, table, _) = fixture();
        let screen = rendered(&state, &table);
        assert!(screen.contains("Nombre del Producto"));
        assert!(screen.contains("Cantidad"));
        assert!(screen.contains("Chair"));
        assert!(screen.contains("Desk"));
        assert!(screen.contains("[Submit]"));
    }

    #[test]
    fn render_hides_filtered_rows_and_shows_draft() {
        let (mut state, mut table, mut runtime) = fixture();
        table.set_filter("desk");
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('i')]);
        type_text(&mut state, &mut table, &mut runtime, "top");

        let screen = rendered(&state, &table);
        assert!(!screen.contains("Chair"));
        assert!(screen.contains("Desktop"));
    }

    #[test]
    fn render_shows_confirm_dialog() {
        let (mut state, mut table, mut runtime) = fixture();
        press(&mut state, &mut table, &mut runtime, &[KeyCode::Char('s')]);
        let screen = rendered(&state, &table);
        assert!(screen.contains("Submit row 1?"));
    }
}
