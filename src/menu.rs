use std::fmt;

use winit::event::{ModifiersState, VirtualKeyCode};

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: String,
    pub options: Vec<MenuOption>,
}

#[derive(Debug, Clone)]
pub struct MenuOption {
    pub label: String,
    pub action: MenuAction,
    pub shortcuts: Vec<Shortcut>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ClearGrid,
    SaveImage,
}

/// A key plus whether the command modifier (Ctrl, or Cmd on macOS) must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: VirtualKeyCode,
    pub command: bool,
}

impl Shortcut {
    pub const fn command(key: VirtualKeyCode) -> Self {
        Self { key, command: true }
    }

    pub const fn plain(key: VirtualKeyCode) -> Self {
        Self { key, command: false }
    }

    pub fn matches(&self, key: VirtualKeyCode, modifiers: ModifiersState) -> bool {
        let command_held = modifiers.ctrl() || modifiers.logo();
        self.key == key && self.command == command_held
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.command {
            write!(f, "Ctrl+")?;
        }
        write!(f, "{:?}", self.key)
    }
}

impl Menu {
    pub fn file_menu() -> Self {
        Self {
            title: "File".to_string(),
            options: vec![
                MenuOption {
                    label: "Clear Grid".to_string(),
                    action: MenuAction::ClearGrid,
                    shortcuts: vec![
                        Shortcut::command(VirtualKeyCode::N),
                        Shortcut::plain(VirtualKeyCode::Delete),
                    ],
                },
                MenuOption {
                    label: "Save Image".to_string(),
                    action: MenuAction::SaveImage,
                    shortcuts: vec![Shortcut::command(VirtualKeyCode::S)],
                },
            ],
        }
    }

    pub fn action_for(&self, key: VirtualKeyCode, modifiers: ModifiersState) -> Option<MenuAction> {
        self.options
            .iter()
            .find(|option| option.shortcuts.iter().any(|shortcut| shortcut.matches(key, modifiers)))
            .map(|option| option.action)
    }

    /// One line per option, e.g. `File > Save Image (Ctrl+S)`.
    pub fn describe(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|option| {
                let keys: Vec<String> = option.shortcuts.iter().map(|s| s.to_string()).collect();
                format!("{} > {} ({})", self.title, option.label, keys.join(", "))
            })
            .collect()
    }
}
