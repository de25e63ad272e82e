/// Translates terminal key and mouse events into camera input
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use sr3d_core::{MoveKey, MovementKeys};

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    /// Pointer-style orientation delta
    Look { dx: f32, dy: f32 },
    Resize { columns: u16, rows: u16 },
}

/// Held movement keys plus pointer tracking.
///
/// Terminals that cannot report key releases only send presses (and
/// auto-repeats), so in that mode a press holds the key until the end of the
/// next frame.
pub struct InputState {
    pub keys: MovementKeys,
    reports_release: bool,
    mouse_gain: f32,
    look_step: f32,
    last_pointer: Option<(u16, u16)>,
}

impl InputState {
    pub fn new(reports_release: bool, mouse_gain: f32, look_step: f32) -> Self {
        Self {
            keys: MovementKeys::new(),
            reports_release,
            mouse_gain,
            look_step,
            last_pointer: None,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => Action::Resize {
                columns: *columns,
                rows: *rows,
            },
            _ => Action::None,
        }
    }

    /// Called once the frame has consumed the held keys
    pub fn end_frame(&mut self) {
        if !self.reports_release {
            self.keys.release_all();
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) -> Action {
        let pressed = match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => true,
            KeyEventKind::Release => false,
        };

        if let Some(key) = movement_key(event.code) {
            self.keys.set(key, pressed);
            return Action::None;
        }
        if !pressed {
            return Action::None;
        }

        let step = self.look_step;
        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Left => Action::Look { dx: -step, dy: 0.0 },
            KeyCode::Right => Action::Look { dx: step, dy: 0.0 },
            KeyCode::Up => Action::Look { dx: 0.0, dy: -step },
            KeyCode::Down => Action::Look { dx: 0.0, dy: step },
            _ => Action::None,
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> Action {
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let position = (event.column, event.row);
                let action = match self.last_pointer {
                    Some((column, row)) => Action::Look {
                        dx: (position.0 as f32 - column as f32) * self.mouse_gain,
                        dy: (position.1 as f32 - row as f32) * self.mouse_gain,
                    },
                    None => Action::None,
                };
                self.last_pointer = Some(position);
                action
            }
            _ => Action::None,
        }
    }
}

fn movement_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(MoveKey::Forward),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(MoveKey::Left),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MoveKey::Back),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(MoveKey::Right),
        _ => None,
    }
}
