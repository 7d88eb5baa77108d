//! Terminal application: sets up the screen and runs the event loop.
//!
//! Two helper threads feed one channel: a stdin reader and a terminal event
//! poller. The calling thread owns the [`Driver`] and the terminal and
//! handles messages strictly in arrival order. The channel is bounded, so
//! the reader waits while a redraw is in progress.

use crate::config::PlotConfig;
use crate::driver::{read_lines, Driver, Message, Step, QUEUE_DEPTH};
use crate::error::{PlotError, Result};
use crate::input::{Action, InputHandler};
use crate::plotter::Plotter;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, stdout, Stdout};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

/// The realplot terminal application.
#[derive(Debug)]
pub struct App {
    driver: Driver,
    input: InputHandler,
}

impl App {
    /// Creates the application sized to the current terminal.
    pub fn new(config: PlotConfig) -> Result<Self> {
        let (width, _) = terminal::size()?;
        Ok(Self::with_plotter(Plotter::new(config, width)?))
    }

    /// Creates the application around an existing plotter.
    #[must_use]
    pub fn with_plotter(plotter: Plotter) -> Self {
        Self {
            driver: Driver::new(plotter),
            input: InputHandler::new(),
        }
    }

    /// Takes the screen, plots stdin until the user quits, then restores
    /// the terminal. The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let result = Terminal::new(CrosstermBackend::new(stdout()))
            .map_err(PlotError::from)
            .and_then(|mut terminal| {
                let result = self.main_loop(&mut terminal);
                finish_session(&mut terminal, result)
            });

        let restored = restore_terminal();
        result.and(restored)
    }

    /// Takes every queued runtime error, oldest first.
    pub fn drain_errors(&mut self) -> Vec<PlotError> {
        self.driver.drain_errors()
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        spawn_reader(tx.clone());
        spawn_events(self.input, tx);

        let size = terminal.size()?;
        self.driver.plotter_mut().resize(size.width, size.height);
        self.driver.start_reading();

        self.event_loop(terminal, &rx)
    }

    /// Handles messages until quit, redrawing after each visible change.
    pub fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        rx: &Receiver<Message>,
    ) -> Result<()> {
        self.draw(terminal)?;

        while let Ok(message) = rx.recv() {
            match self.driver.handle(message) {
                Step::Redraw => self.draw(terminal)?,
                Step::Continue => {}
                Step::Quit => return Ok(()),
                Step::Fail(err) => return Err(err),
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let plotter = self.driver.plotter();
        terminal.draw(|frame| plotter.render(frame.buffer_mut()))?;
        Ok(())
    }
}

/// Shows the cursor again; a loop failure takes precedence over a cursor
/// failure.
fn finish_session<B: Backend>(terminal: &mut Terminal<B>, result: Result<()>) -> Result<()> {
    let shown = terminal.show_cursor().map_err(PlotError::from);
    if let Err(err) = &shown {
        tracing::warn!(%err, "failed to show cursor");
    }
    result.and(shown)
}

fn restore_terminal() -> Result<()> {
    teardown(disable_raw_mode, || {
        stdout().execute(LeaveAlternateScreen).map(|_| ())
    })
}

/// Runs both steps even if the first fails, reporting the first failure.
fn teardown(
    raw_mode: impl FnOnce() -> io::Result<()>,
    screen: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let raw = raw_mode();
    let screen = screen();
    raw.and(screen).map_err(PlotError::from)
}

fn spawn_reader(tx: SyncSender<Message>) {
    thread::spawn(move || read_lines(io::stdin().lock(), &tx));
}

fn spawn_events(input: InputHandler, tx: SyncSender<Message>) {
    thread::spawn(move || loop {
        let message = match event::read() {
            Ok(Event::Resize(width, height)) => Message::Resize { width, height },
            Ok(Event::Key(key)) => match input.handle_key(key) {
                Action::Quit => Message::Quit,
                Action::None => continue,
            },
            Ok(_) => continue,
            Err(err) => Message::EventFailed(err),
        };
        let done = matches!(message, Message::Quit | Message::EventFailed(_));
        if tx.send(message).is_err() || done {
            return;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Bounds;
    use ratatui::backend::TestBackend;

    fn app(width: u16) -> App {
        let config = PlotConfig::new(Bounds::new(0, 10).unwrap()).border(false);
        App::with_plotter(Plotter::new(config, width).unwrap())
    }

    fn first_symbol(terminal: &Terminal<TestBackend>, x: u16, y: u16) -> char {
        terminal.backend().buffer()[(x, y)]
            .symbol()
            .chars()
            .next()
            .unwrap_or(' ')
    }

    #[test]
    fn test_event_loop_draws_until_quit() {
        let mut app = app(4);
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        let (tx, rx) = mpsc::channel();

        tx.send(Message::Line("10".into())).unwrap();
        tx.send(Message::Line("oops".into())).unwrap();
        tx.send(Message::Quit).unwrap();
        tx.send(Message::Line("0".into())).unwrap();

        app.event_loop(&mut terminal, &rx).unwrap();

        // rightmost dot column lit full height, later lines never handled
        assert_eq!(first_symbol(&terminal, 3, 0), '\u{28B8}');
        assert_eq!(first_symbol(&terminal, 3, 1), '\u{28B8}');
        assert_eq!(app.driver.plotter().window().len(), 1);
        assert_eq!(app.drain_errors().len(), 1);
    }

    #[test]
    fn test_event_loop_returns_on_disconnect() {
        let mut app = app(4);
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        let (tx, rx) = mpsc::channel();

        tx.send(Message::EndOfInput).unwrap();
        drop(tx);

        assert!(app.event_loop(&mut terminal, &rx).is_ok());
    }

    #[test]
    fn test_event_loop_propagates_terminal_failure() {
        let mut app = app(4);
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        let (tx, rx) = mpsc::channel();

        tx.send(Message::EventFailed(io::Error::new(io::ErrorKind::Other, "tty")))
            .unwrap();

        let err = app.event_loop(&mut terminal, &rx).unwrap_err();
        assert!(matches!(err, PlotError::Terminal(_)));
    }

    #[test]
    fn test_finish_session_keeps_loop_error() {
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();

        assert!(finish_session(&mut terminal, Ok(())).is_ok());
        let err = finish_session(&mut terminal, Err(PlotError::Config("boom".into()))).unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }

    #[test]
    fn test_teardown_leaves_screen_when_raw_mode_fails() {
        let mut left_screen = false;

        let result = teardown(
            || Err(io::Error::new(io::ErrorKind::Other, "raw mode")),
            || {
                left_screen = true;
                Ok(())
            },
        );

        assert!(left_screen);
        assert!(matches!(result, Err(PlotError::Terminal(_))));
    }

    #[test]
    fn test_teardown_reports_screen_failure() {
        let result = teardown(|| Ok(()), || Err(io::Error::new(io::ErrorKind::Other, "screen")));
        assert!(matches!(result, Err(PlotError::Terminal(_))));
    }
}
