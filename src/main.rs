mod export;
mod graphics;
mod grid;
mod input;
mod menu;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::export::{RfdSaveDialog, SaveDialog};
use crate::graphics::{GraphicsRenderer, RedrawRegion};
use crate::grid::{GridGeometry, GridState};
use crate::input::{InputAction, InputHandler};
use crate::menu::{Menu, MenuAction};

const TITLE: &str = "Grid Toggler";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let geometry = GridGeometry::REFERENCE;
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(geometry.pixel_width(), geometry.pixel_height()))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut graphics = GraphicsRenderer::new(&window, geometry)?;
    let mut grid = GridState::new(geometry);
    let mut input_handler = InputHandler::new();
    let menu = Menu::file_menu();
    let dialog = RfdSaveDialog;

    log::info!(
        "{}: {}x{} cells of {}px",
        TITLE, geometry.width_cells, geometry.height_cells, geometry.cell_size
    );
    for line in menu.describe() {
        log::info!("{}", line);
    }

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => {
                let action = match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                        InputAction::None
                    }
                    WindowEvent::Resized(size) => {
                        graphics.resize(size.width, size.height);
                        InputAction::None
                    }
                    WindowEvent::ModifiersChanged(modifiers) => {
                        input_handler.set_modifiers(modifiers);
                        InputAction::None
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let (px, py) = graphics.window_pos_to_pixel(position);
                        input_handler.handle_cursor_moved(&mut grid, px, py)
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        input_handler.handle_mouse_input(&mut grid, state, button)
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        input_handler.handle_keyboard_input(&input, &menu)
                    }
                    _ => InputAction::None,
                };

                match action {
                    InputAction::CellChanged(column, row) => {
                        graphics.request_redraw(RedrawRegion::Cell(column, row));
                    }
                    InputAction::Command(command) => {
                        run_command(command, &mut grid, &mut graphics, &dialog);
                        if command == MenuAction::SaveImage {
                            // The modal dialog swallows any pending button release.
                            input_handler.on_pointer_up();
                        }
                    }
                    InputAction::None => {}
                }

                if graphics.needs_redraw() {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                graphics.render(&grid);

                if let Err(err) = graphics.present() {
                    log::error!("Render error: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

fn run_command(command: MenuAction, grid: &mut GridState, graphics: &mut GraphicsRenderer, dialog: &dyn SaveDialog) {
    match command {
        MenuAction::ClearGrid => {
            let filled = grid.filled_count();
            grid.clear_all();
            graphics.request_redraw(RedrawRegion::All);
            log::info!("Grid cleared ({} filled cells)", filled);
        }
        MenuAction::SaveImage => {
            // Failures are already logged and shown by `save_image`.
            let _ = export::save_image(dialog, grid);
        }
    }
}
