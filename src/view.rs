use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{
    event::{Event, Key, MouseButton, MouseEvent},
    input::{MouseTerminal, TermRead},
    raw::IntoRawMode,
};
use tracing::{debug, warn};

use crate::{cell, Cell, LifeError, Result, SimHandle, Status};

pub use canvas::Canvas;
mod canvas;

pub struct View {
    thread: JoinHandle<Result<()>>,
}

impl View {
    pub fn spawn(handle: SimHandle) -> Result<Self> {
        let thread = thread::Builder::new()
            .name("view".into())
            .spawn(move || view_loop(handle))?;
        Ok(Self { thread })
    }

    pub fn join(self) -> Result<()> {
        self.thread.join().map_err(|_| LifeError::SimulationStopped)?
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    TogglePause,
    Step,
    Reset,
    Accelerate,
    Decelerate,
    /// A click at a 1-based terminal position.
    Click(u16, u16),
}

const PAN_STEP: i64 = 4;

pub fn map_event(event: Event) -> Option<InputCmd> {
    let command = match event {
        Event::Key(Key::Char('q')) | Event::Key(Key::Esc) => InputCmd::Exit,
        Event::Key(Key::Up) => InputCmd::Move(Dir::Up),
        Event::Key(Key::Down) => InputCmd::Move(Dir::Down),
        Event::Key(Key::Left) => InputCmd::Move(Dir::Left),
        Event::Key(Key::Right) => InputCmd::Move(Dir::Right),
        Event::Key(Key::Char(' ')) | Event::Key(Key::Char('\n')) => InputCmd::TogglePause,
        Event::Key(Key::Char('n')) => InputCmd::Step,
        Event::Key(Key::Char('r')) | Event::Key(Key::Backspace) => InputCmd::Reset,
        Event::Key(Key::Char('+')) => InputCmd::Accelerate,
        Event::Key(Key::Char('-')) => InputCmd::Decelerate,
        Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => InputCmd::Click(x, y),
        _ => return None,
    };
    Some(command)
}

/// The plane cell under a 1-based terminal position.
pub fn cell_at(view_origin: Cell, x: u16, y: u16) -> Cell {
    view_origin + cell!(i64::from(x) - 1, i64::from(y) - 1)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for event in stdin().events() {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "failed to read terminal input");
                break;
            }
        };
        if let Some(command) = map_event(event) {
            if sender.send(command).is_err() {
                break;
            }
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(50);

fn view_loop(handle: SimHandle) -> Result<()> {
    let mut stdout = MouseTerminal::from(stdout().into_raw_mode()?);
    write!(stdout, "{}", termion::cursor::Hide)?;

    let (sender, receiver) = mpsc::channel();
    let result = thread::Builder::new()
        .name("input".into())
        .spawn(move || input_loop(sender))
        .map_err(LifeError::from)
        .and_then(|_| run_view(&mut stdout, &receiver, &handle));
    if result.is_err() {
        handle.stop().ok();
    }

    let restored = restore_terminal(&mut stdout);
    result.and(restored)
}

fn run_view(
    out: &mut impl Write,
    receiver: &mpsc::Receiver<InputCmd>,
    handle: &SimHandle,
) -> Result<()> {
    let mut view_origin = cell!(0, 0);
    loop {
        let mut exit = false;
        while let Ok(cmd) = receiver.try_recv() {
            debug!(?cmd, "input");
            if !handle_input(cmd, handle, &mut view_origin)? {
                exit = true;
            }
        }
        if exit {
            return handle.stop();
        }

        let status = handle.snapshot()?;
        display_status(out, view_origin, &status)?;
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
}

fn restore_terminal(out: &mut impl Write) -> Result<()> {
    write!(
        out,
        "{}{}{}",
        termion::clear::All,
        termion::cursor::Goto(1, 1),
        termion::cursor::Show
    )?;
    out.flush()?;
    Ok(())
}

/// returns `false` when the user asked to leave.
fn handle_input(cmd: InputCmd, handle: &SimHandle, view_origin: &mut Cell) -> Result<bool> {
    match cmd {
        InputCmd::Exit => return Ok(false),
        InputCmd::Move(direction) => {
            *view_origin = *view_origin
                + match direction {
                    Dir::Up => cell!(0, -PAN_STEP),
                    Dir::Down => cell!(0, PAN_STEP),
                    Dir::Left => cell!(-PAN_STEP, 0),
                    Dir::Right => cell!(PAN_STEP, 0),
                }
        }
        InputCmd::TogglePause => handle.toggle_pause()?,
        InputCmd::Step => handle.step()?,
        InputCmd::Reset => handle.reset()?,
        InputCmd::Accelerate => handle.faster()?,
        InputCmd::Decelerate => handle.slower()?,
        InputCmd::Click(x, y) => handle.toggle_cell(cell_at(*view_origin, x, y))?,
    }
    Ok(true)
}

fn display_status(out: &mut impl Write, view_origin: Cell, status: &Status) -> Result<()> {
    let (width, height) = termion::terminal_size()?;
    let canvas = Canvas::from_live_set(
        &status.live,
        view_origin,
        width as usize,
        height.saturating_sub(1) as usize,
    );
    let state = if status.running { "running" } else { "paused" };
    let footer = format!(
        "gen {} | pop {} | {} | {}ms | origin ({}, {}) | space run/pause  n step  r reset  +/- speed  q quit",
        status.generation,
        status.live.len(),
        state,
        status.tick_interval.as_millis(),
        view_origin.x,
        view_origin.y,
    );
    let footer: String = footer.chars().take(width as usize).collect();
    canvas.display(out, &footer)?;
    Ok(())
}
