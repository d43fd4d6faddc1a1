//! App actor - message loop processing UI events and store responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{RenderState, StoreCommand, StoreResponse, UiEvent};

/// App actor that processes UI events and store responses
pub struct AppActor {
    state: AppState,
    store_tx: mpsc::UnboundedSender<StoreCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        store_tx: mpsc::UnboundedSender<StoreCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            store_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut store_rx: mpsc::UnboundedReceiver<StoreResponse>,
    ) {
        // Load the roster once on startup, then send the initial render state
        let _ = self.store_tx.send(self.state.refresh_roster());
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.store_tx.send(StoreCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = store_rx.recv() => {
                    tracing::debug!(id = response.id(), "Applying store response");
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::NextField => self.state.next_field(),

            // Store operations
            UiEvent::Refresh => {
                let cmd = self.state.refresh_roster();
                let _ = self.store_tx.send(cmd);
            }
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.submit() {
                    let _ = self.store_tx.send(cmd);
                }
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissNotice => self.state.dismiss_notice(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
