use winit::event::{ElementState, KeyboardInput, ModifiersState, MouseButton};

use crate::grid::{GridGeometry, GridState};
use crate::menu::{Menu, MenuAction};

/// Paint operation active while a pointer button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    Filling,
    Clearing,
}

impl DragMode {
    /// The value a cell takes under this mode, or `None` when idle.
    pub fn fill_value(self) -> Option<bool> {
        match self {
            DragMode::Idle => None,
            DragMode::Filling => Some(true),
            DragMode::Clearing => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// Resolves a frame-buffer pixel position to the cell under it.
pub fn map_pointer_to_cell(geometry: GridGeometry, px: i32, py: i32) -> Option<(u32, u32)> {
    if px < 0 || py < 0 || geometry.cell_size == 0 {
        return None;
    }

    let column = px as u32 / geometry.cell_size;
    let row = py as u32 / geometry.cell_size;

    if geometry.contains(column, row) {
        Some((column, row))
    } else {
        None
    }
}

pub struct InputHandler {
    drag_mode: DragMode,
    pointer: Option<(i32, i32)>,
    modifiers: ModifiersState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            drag_mode: DragMode::Idle,
            pointer: None,
            modifiers: ModifiersState::empty(),
        }
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Selects the drag mode for `button` and paints the cell under the pointer.
    /// Returns the cell that was painted, if any.
    pub fn on_pointer_down(&mut self, grid: &mut GridState, button: PointerButton, px: i32, py: i32) -> Option<(u32, u32)> {
        let mode = match button {
            PointerButton::Primary => Some(DragMode::Filling),
            PointerButton::Secondary => Some(DragMode::Clearing),
            PointerButton::Other => None,
        };

        if let Some(mode) = mode {
            if mode != self.drag_mode {
                log::debug!("Drag mode {:?} -> {:?}", self.drag_mode, mode);
            }
            self.drag_mode = mode;
        }

        self.apply_at(grid, px, py)
    }

    /// Any release ends the drag, whichever button it came from.
    pub fn on_pointer_up(&mut self) {
        if self.drag_mode != DragMode::Idle {
            log::debug!("Drag mode {:?} -> Idle", self.drag_mode);
        }
        self.drag_mode = DragMode::Idle;
    }

    pub fn on_pointer_move(&mut self, grid: &mut GridState, px: i32, py: i32) -> Option<(u32, u32)> {
        if self.drag_mode == DragMode::Idle {
            return None;
        }
        self.apply_at(grid, px, py)
    }

    fn apply_at(&self, grid: &mut GridState, px: i32, py: i32) -> Option<(u32, u32)> {
        let filled = self.drag_mode.fill_value()?;

        match map_pointer_to_cell(grid.geometry(), px, py) {
            Some((column, row)) => {
                grid.toggle_cell(column, row, filled);
                log::trace!("Cell ({}, {}) -> {}", column, row, filled);
                Some((column, row))
            }
            None => {
                log::trace!("Ignoring pointer outside grid at ({}, {})", px, py);
                None
            }
        }
    }

    pub fn handle_cursor_moved(&mut self, grid: &mut GridState, px: i32, py: i32) -> InputAction {
        self.pointer = Some((px, py));
        match self.on_pointer_move(grid, px, py) {
            Some((column, row)) => InputAction::CellChanged(column, row),
            None => InputAction::None,
        }
    }

    /// winit reports button changes without a position, so presses use the
    /// last position seen through `handle_cursor_moved`.
    pub fn handle_mouse_input(&mut self, grid: &mut GridState, state: ElementState, button: MouseButton) -> InputAction {
        match state {
            ElementState::Pressed => {
                let (px, py) = match self.pointer {
                    Some(position) => position,
                    None => {
                        // Still record the mode; there is just nothing to paint yet.
                        self.on_pointer_down(grid, button.into(), -1, -1);
                        return InputAction::None;
                    }
                };
                match self.on_pointer_down(grid, button.into(), px, py) {
                    Some((column, row)) => InputAction::CellChanged(column, row),
                    None => InputAction::None,
                }
            }
            ElementState::Released => {
                self.on_pointer_up();
                InputAction::None
            }
        }
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput, menu: &Menu) -> InputAction {
        if input.state != ElementState::Pressed {
            return InputAction::None;
        }

        input
            .virtual_keycode
            .and_then(|key_code| menu.action_for(key_code, self.modifiers))
            .map(InputAction::Command)
            .unwrap_or(InputAction::None)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    CellChanged(u32, u32),
    Command(MenuAction),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> GridGeometry {
        GridGeometry::REFERENCE
    }

    #[test]
    fn maps_pixels_by_integer_division() {
        assert_eq!(map_pointer_to_cell(reference(), 25, 5), Some((1, 0)));
        assert_eq!(map_pointer_to_cell(reference(), 0, 0), Some((0, 0)));
        assert_eq!(map_pointer_to_cell(reference(), 19, 19), Some((0, 0)));
        assert_eq!(map_pointer_to_cell(reference(), 20, 20), Some((1, 1)));
        assert_eq!(map_pointer_to_cell(reference(), 399, 399), Some((19, 19)));
    }

    #[test]
    fn rejects_pixels_outside_grid() {
        assert_eq!(map_pointer_to_cell(reference(), 400, 0), None);
        assert_eq!(map_pointer_to_cell(reference(), 0, 400), None);
        assert_eq!(map_pointer_to_cell(reference(), -1, 10), None);
        assert_eq!(map_pointer_to_cell(reference(), 10, -15), None);
    }

    #[test]
    fn drag_fills_until_release() {
        let mut grid = GridState::default();
        let mut input = InputHandler::new();

        assert_eq!(input.on_pointer_down(&mut grid, PointerButton::Primary, 0, 0), Some((0, 0)));
        assert!(grid.get_cell(0, 0));
        assert_eq!(input.drag_mode(), DragMode::Filling);

        assert_eq!(input.on_pointer_move(&mut grid, 20, 0), Some((1, 0)));
        assert!(grid.get_cell(1, 0));

        input.on_pointer_up();
        assert_eq!(input.drag_mode(), DragMode::Idle);
        assert_eq!(input.on_pointer_move(&mut grid, 40, 0), None);
        assert!(!grid.get_cell(2, 0));
    }

    #[test]
    fn secondary_button_clears() {
        let mut grid = GridState::default();
        grid.toggle_cell(5, 5, true);
        grid.toggle_cell(6, 5, true);
        let mut input = InputHandler::new();

        input.on_pointer_down(&mut grid, PointerButton::Secondary, 105, 105);
        assert_eq!(input.drag_mode(), DragMode::Clearing);
        assert!(!grid.get_cell(5, 5));

        input.on_pointer_move(&mut grid, 125, 110);
        assert!(!grid.get_cell(6, 5));
    }

    #[test]
    fn other_button_keeps_mode() {
        let mut grid = GridState::default();
        let mut input = InputHandler::new();

        assert_eq!(input.on_pointer_down(&mut grid, PointerButton::Other, 10, 10), None);
        assert_eq!(input.drag_mode(), DragMode::Idle);
        assert_eq!(grid.filled_count(), 0);

        input.on_pointer_down(&mut grid, PointerButton::Primary, 10, 10);
        input.on_pointer_down(&mut grid, PointerButton::Other, 30, 10);
        assert_eq!(input.drag_mode(), DragMode::Filling);
        assert!(grid.get_cell(1, 0));
    }

    #[test]
    fn last_press_wins_and_any_release_idles() {
        let mut grid = GridState::default();
        let mut input = InputHandler::new();

        input.on_pointer_down(&mut grid, PointerButton::Secondary, 0, 0);
        input.on_pointer_down(&mut grid, PointerButton::Primary, 0, 0);
        assert_eq!(input.drag_mode(), DragMode::Filling);
        assert!(grid.get_cell(0, 0));

        input.on_pointer_up();
        assert_eq!(input.drag_mode(), DragMode::Idle);
    }

    #[test]
    fn drag_outside_grid_is_ignored() {
        let mut grid = GridState::default();
        let mut input = InputHandler::new();

        input.on_pointer_down(&mut grid, PointerButton::Primary, 0, 0);
        assert_eq!(input.on_pointer_move(&mut grid, 450, 10), None);
        assert_eq!(input.on_pointer_move(&mut grid, -3, 10), None);
        assert_eq!(grid.filled_count(), 1);
        assert_eq!(input.drag_mode(), DragMode::Filling);
    }

    #[test]
    fn mouse_events_use_last_cursor_position() {
        let mut grid = GridState::default();
        let mut input = InputHandler::new();

        assert_eq!(input.handle_cursor_moved(&mut grid, 45, 65), InputAction::None);
        assert_eq!(
            input.handle_mouse_input(&mut grid, ElementState::Pressed, MouseButton::Left),
            InputAction::CellChanged(2, 3)
        );
        assert_eq!(input.handle_cursor_moved(&mut grid, 65, 65), InputAction::CellChanged(3, 3));
        assert_eq!(
            input.handle_mouse_input(&mut grid, ElementState::Released, MouseButton::Right),
            InputAction::None
        );
        assert_eq!(input.handle_cursor_moved(&mut grid, 85, 65), InputAction::None);
        assert!(grid.get_cell(2, 3));
        assert!(grid.get_cell(3, 3));
        assert!(!grid.get_cell(4, 3));
    }

    #[test]
    fn press_before_any_cursor_position_only_sets_mode() {
        let mut grid = GridState::default();
        let mut input = InputHandler::new();

        assert_eq!(
            input.handle_mouse_input(&mut grid, ElementState::Pressed, MouseButton::Right),
            InputAction::None
        );
        assert_eq!(input.drag_mode(), DragMode::Clearing);
        assert_eq!(grid.filled_count(), 0);
    }
}
