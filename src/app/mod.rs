mod renderer;
mod tile;

use std::{
    io::{Stdout, Write},
    time::Instant,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    terminal::{self, ClearType},
};

pub use renderer::Renderer;
pub use tile::Tile;

use crate::{
    config::{Config, MAX_POLL_TIMEOUT},
    controller::{RunController, Signal},
    solvers::Solver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserActionEvent {
    /// Forward a control signal to the run controller
    Control(Signal),
    /// Terminal resize, the next frame is drawn in full
    Resize,
    /// Leave the app
    Quit,
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Translate a key press into an action. Single stepping is only offered
/// while paused.
fn map_key(code: KeyCode, is_paused: bool) -> Option<UserActionEvent> {
    let action = match code {
        KeyCode::Esc | KeyCode::Char('q') => UserActionEvent::Quit,
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            UserActionEvent::Control(Signal::Select(Solver::ALL[idx]))
        }
        KeyCode::Char('g') => UserActionEvent::Control(Signal::Generate),
        KeyCode::Char('r') => UserActionEvent::Control(Signal::Reset),
        KeyCode::Char(' ') | KeyCode::Enter => UserActionEvent::Control(Signal::TogglePause),
        KeyCode::Right if is_paused => UserActionEvent::Control(Signal::Step),
        KeyCode::Up => UserActionEvent::Control(Signal::SpeedUp),
        KeyCode::Down => UserActionEvent::Control(Signal::SlowDown),
        _ => return None, // Ignore other keys
    };
    Some(action)
}

/// Read the pending terminal event, keeping only key presses and resizes.
fn read_user_action(is_paused: bool) -> std::io::Result<Option<UserActionEvent>> {
    let action = match event::read()? {
        event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
            map_key(key_event.code, is_paused)
        }
        event::Event::Resize(_, _) => Some(UserActionEvent::Resize),
        _ => None,
    };
    Ok(action)
}

/// Entry point of the visualizer: generate the first maze, then loop on
/// ticking the controller, drawing, and waiting for input until the next step
/// is due.
pub fn run(config: Config) -> std::io::Result<()> {
    let mut controller = match RunController::from_config(config) {
        Ok(controller) => controller,
        Err(err) => {
            tracing::error!("[app] Cannot start: {}", err);
            return Err(err.into());
        }
    };

    let mut stdout = std::io::stdout();
    setup_terminal(&mut stdout)?;
    let result = app_loop(&mut controller);
    restore_terminal(&mut stdout)?;
    result
}

fn app_loop(controller: &mut RunController) -> std::io::Result<()> {
    tracing::info!("[app] Started main app loop");
    let mut renderer = Renderer::new();
    loop {
        controller.tick(Instant::now());
        renderer.draw(&controller.view())?;

        let timeout = controller
            .next_step_in(Instant::now())
            .map_or(MAX_POLL_TIMEOUT, |due| due.min(MAX_POLL_TIMEOUT));
        if !event::poll(timeout)? {
            // No event available, tick again
            continue;
        }

        match read_user_action(controller.is_paused())? {
            None => {}
            Some(UserActionEvent::Quit) => {
                tracing::debug!("[app loop] Quit requested, exiting");
                break;
            }
            Some(UserActionEvent::Resize) => renderer.invalidate(),
            Some(UserActionEvent::Control(signal)) => {
                if let Err(err) = controller.apply(signal) {
                    tracing::error!("[app loop] {:?} failed: {}", signal, err);
                    return Err(err.into());
                }
            }
        }
    }
    tracing::info!("[app] Exiting main app loop");
    Ok(())
}
