// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ProductField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Filter,
    Edit,
    Confirm,
}

impl AppMode {
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Nav => "NAV",
            Self::Filter => "SEARCH",
            Self::Edit => "EDIT",
            Self::Confirm => "CONFIRM",
        }
    }
}

/// Cursor and mode of the interactive shell. `selected_row` counts visible
/// rows, not record indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub selected_row: usize,
    pub selected_col: ProductField,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            selected_row: 0,
            selected_col: ProductField::Name,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextColumn,
    PrevColumn,
    MoveRow { delta: isize, visible: usize },
    ClampRow { visible: usize },
    JumpFirstRow,
    JumpLastRow { visible: usize },
    FocusFilter,
    BeginEdit,
    OpenConfirm,
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    RowChanged(usize),
    ColumnChanged(ProductField),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextColumn => self.rotate_column(1),
            AppCommand::PrevColumn => self.rotate_column(-1),
            AppCommand::MoveRow { delta, visible } => {
                let target = self.selected_row.saturating_add_signed(delta);
                self.set_row(target, visible)
            }
            AppCommand::ClampRow { visible } => self.set_row(self.selected_row, visible),
            AppCommand::JumpFirstRow => self.set_row(0, 1),
            AppCommand::JumpLastRow { visible } => self.set_row(usize::MAX, visible),
            AppCommand::FocusFilter => self.set_mode(AppMode::Filter),
            AppCommand::BeginEdit => self.set_mode(AppMode::Edit),
            AppCommand::OpenConfirm => self.set_mode(AppMode::Confirm),
            AppCommand::ExitToNav => self.set_mode(AppMode::Nav),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn set_row(&mut self, target: usize, visible: usize) -> Vec<AppEvent> {
        let clamped = target.min(visible.saturating_sub(1));
        if clamped == self.selected_row {
            return Vec::new();
        }
        self.selected_row = clamped;
        vec![AppEvent::RowChanged(clamped)]
    }

    fn rotate_column(&mut self, delta: isize) -> Vec<AppEvent> {
        let current = self.selected_col.column() as isize;
        let len = ProductField::ALL.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let Some(field) = ProductField::from_column(next) else {
            return Vec::new();
        };
        self.selected_col = field;
        vec![AppEvent::ColumnChanged(field)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
