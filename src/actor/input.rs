//! Input Actor: Dedicated thread for polling terminal events.
//!
//! The view itself is single-threaded. This thread only turns crossterm
//! events into [`InputEvent`]s and hands them over a channel, so a slow
//! render never drops keystrokes.

use super::messages::{InputEvent, KeyCode, KeyModifiers, PointerAction, PointerEvent};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("gridtext-input".to_string())
            .spawn(move || run_loop(&sender, &flag, poll_timeout))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Signal shutdown and wait for the thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("input thread panicked");
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
    tracing::debug!("input thread started");
    while !shutdown.load(Ordering::Relaxed) {
        let event = match event::poll(poll_timeout) {
            Ok(false) => continue,
            Ok(true) => event::read(),
            Err(e) => Err(e),
        };
        let message = match event {
            Ok(event) => match translate(event) {
                Some(message) => message,
                None => continue,
            },
            Err(e) => {
                tracing::warn!(error = %e, "reading terminal events failed");
                InputEvent::Error(e.to_string())
            }
        };
        if sender.send(message).is_err() {
            // Receiver dropped.
            return;
        }
    }
    let _ = sender.send(InputEvent::Shutdown);
    tracing::debug!("input thread stopped");
}

/// Convert a crossterm event. Events the viewer has no use for map to `None`.
pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            // Releases and repeats arrive on some platforms; only presses move things.
            if key.kind != KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key {
                code: key_code(key.code)?,
                modifiers: modifiers(key.modifiers),
            })
        }
        Event::Mouse(mouse) => pointer(mouse),
        Event::Resize(cols, rows) => Some(InputEvent::Resize { cols, rows }),
        _ => None,
    }
}

fn key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    out.set(KeyModifiers::SHIFT, mods.contains(event::KeyModifiers::SHIFT));
    out.set(KeyModifiers::CONTROL, mods.contains(event::KeyModifiers::CONTROL));
    out.set(KeyModifiers::ALT, mods.contains(event::KeyModifiers::ALT));
    out
}

fn pointer(mouse: event::MouseEvent) -> Option<InputEvent> {
    use event::{MouseButton, MouseEventKind};

    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press,
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag,
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
        MouseEventKind::Moved => PointerAction::Move,
        MouseEventKind::ScrollUp => return Some(InputEvent::Wheel { delta: 1 }),
        MouseEventKind::ScrollDown => return Some(InputEvent::Wheel { delta: -1 }),
        _ => return None,
    };
    Some(InputEvent::Pointer(PointerEvent {
        action,
        row: mouse.row,
        col: mouse.column,
        modifiers: modifiers(mouse.modifiers),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

    fn mouse(kind: MouseEventKind, mods: event::KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: mods,
        })
    }

    #[test]
    fn test_translate_key_press() {
        let event = Event::Key(KeyEvent::new(event::KeyCode::Down, event::KeyModifiers::SHIFT));
        assert_eq!(
            translate(event),
            Some(InputEvent::Key {
                code: KeyCode::Down,
                modifiers: KeyModifiers::SHIFT,
            })
        );
    }

    #[test]
    fn test_translate_ignores_release_and_unknown_keys() {
        let mut release = KeyEvent::new(event::KeyCode::Up, event::KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);

        let f1 = KeyEvent::new(event::KeyCode::F(1), event::KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(f1)), None);
        assert_eq!(translate(Event::FocusGained), None);
    }

    #[test]
    fn test_translate_pointer() {
        let event = mouse(MouseEventKind::Down(MouseButton::Left), event::KeyModifiers::SHIFT);
        assert_eq!(
            translate(event),
            Some(InputEvent::Pointer(PointerEvent {
                action: PointerAction::Press,
                row: 3,
                col: 7,
                modifiers: KeyModifiers::SHIFT,
            }))
        );

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), event::KeyModifiers::NONE);
        assert!(matches!(
            translate(drag),
            Some(InputEvent::Pointer(PointerEvent { action: PointerAction::Drag, .. }))
        ));

        let right = mouse(MouseEventKind::Down(MouseButton::Right), event::KeyModifiers::NONE);
        assert_eq!(translate(right), None);
    }

    #[test]
    fn test_translate_wheel_and_resize() {
        let up = mouse(MouseEventKind::ScrollUp, event::KeyModifiers::NONE);
        assert_eq!(translate(up), Some(InputEvent::Wheel { delta: 1 }));
        let down = mouse(MouseEventKind::ScrollDown, event::KeyModifiers::NONE);
        assert_eq!(translate(down), Some(InputEvent::Wheel { delta: -1 }));

        assert_eq!(
            translate(Event::Resize(80, 24)),
            Some(InputEvent::Resize { cols: 80, rows: 24 })
        );
    }
}
