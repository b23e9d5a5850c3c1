use crate::domain::models::{Capability, CommandLogEntry, HealthReport};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Quit,
    Resize(u16, u16),

    // --- Control Surface Intents ---
    // These trigger async requests
    ToggleListening, // POST /toggle-voice with the inverse of the displayed state
    ToggleWatching,  // POST /toggle-visual with the inverse of the displayed state
    EnterCommandMode,
    SubmitCommand, // POST /execute-command with the typed text

    // --- UI ---
    ScrollLogUp(u16),
    ScrollLogDown(u16),
    ScrollLogTop,
    ScrollLogBottom,
    ToggleHelp,
    CancelMode,                                // ESC key (close modal/mode, then dismiss error)
    DismissError,                              // Clear the error banner
    TextAreaInput(crossterm::event::KeyEvent), // Handle text area input

    // --- Async Results (The "Callback") ---
    // Dispatched by spawned requests back to the loop, in completion order
    ToggleResolved(Capability, Result<bool, String>), // Server's resulting state, or the failure
    HistoryLoaded(Vec<CommandLogEntry>),               // Fresh log snapshot
    HistoryFailed(String),                             // Poll tick failed; diagnostic only
    HealthLoaded(Result<HealthReport, String>),        // Initial sync
    AvailableCommandsLoaded(Vec<String>),
    CommandExecuted(Result<String, String>),
}
