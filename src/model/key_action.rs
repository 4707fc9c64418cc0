//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Some actions are context dependent: `MoveLeft`/`MoveRight` move the grid
/// selection when no card is open and step to the previous/next card while
/// the detail overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Directional movement
    /// Grid: selection up one card. Detail: scroll up. Default: k/↑
    MoveUp,
    /// Grid: selection down one card. Detail: scroll down. Default: j/↓
    MoveDown,
    /// Grid: selection one column left. Detail: previous card. Default: h/←
    MoveLeft,
    /// Grid: selection one column right. Detail: next card. Default: l/→
    MoveRight,
    /// Scroll the detail body up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll the detail body down by one page. Default: Ctrl+d/Page Down
    PageDown,

    // Card navigation
    /// Grid: open the selected card. Detail: activate the focused element. Default: Enter
    Activate,
    /// Return to the card visited before the last followed link. Default: Backspace/b
    Back,
    /// Focus the next link or image in the open card. Default: Tab
    FocusNextElement,
    /// Focus the previous link or image in the open card. Default: Shift+Tab
    FocusPrevElement,
    /// Close the topmost overlay (image, help, then detail). Default: Esc
    CloseOverlay,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}
