//! Message-driven plotting session.
//!
//! Input lines and terminal events arrive as [`Message`]s on one queue and
//! are handled one at a time by the task that owns the [`Plotter`]. The
//! reading side moves through `Idle -> Reading -> Draining -> Closed`;
//! resizes are handled in every state and never change it.

use std::io::{self, BufRead};
use std::sync::mpsc::SyncSender;

use crate::error::PlotError;
use crate::plotter::Plotter;

/// Number of messages the session queue holds before senders block.
///
/// A fast producer waits for the owner to catch up instead of growing the
/// queue, so quit and resize events stay at most this far behind.
pub const QUEUE_DEPTH: usize = 64;

/// One unit of work for the session owner.
#[derive(Debug)]
pub enum Message {
    /// A line read from the input source.
    Line(String),
    /// The input source reached end-of-input.
    EndOfInput,
    /// The input source failed.
    ReadFailed(io::Error),
    /// The terminal was resized.
    Resize {
        /// New width in cells.
        width: u16,
        /// New height in cells.
        height: u16,
    },
    /// Polling terminal events failed.
    EventFailed(io::Error),
    /// The user asked to quit.
    Quit,
}

/// Lifecycle of the input-reading side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// No read attempted yet.
    Idle,
    /// Consuming input lines.
    Reading,
    /// Input ended; flushing the error queue.
    Draining,
    /// Input finished and the error queue is closed.
    Closed,
}

/// What the owner should do after handling a message.
#[derive(Debug)]
pub enum Step {
    /// Render state changed; redraw and present.
    Redraw,
    /// Nothing visible changed.
    Continue,
    /// Leave the event loop.
    Quit,
    /// Leave the event loop with a fatal error.
    Fail(PlotError),
}

/// Drives a [`Plotter`] from a stream of messages.
#[derive(Debug)]
pub struct Driver {
    plotter: Plotter,
    state: ReaderState,
}

impl Driver {
    /// Wraps a plotter in the `Idle` state.
    #[must_use]
    pub fn new(plotter: Plotter) -> Self {
        Self {
            plotter,
            state: ReaderState::Idle,
        }
    }

    /// Current reader state.
    #[must_use]
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// The owned plotter.
    #[must_use]
    pub fn plotter(&self) -> &Plotter {
        &self.plotter
    }

    /// Mutable access to the owned plotter.
    pub fn plotter_mut(&mut self) -> &mut Plotter {
        &mut self.plotter
    }

    /// Marks the first read attempt.
    pub fn start_reading(&mut self) {
        if self.state == ReaderState::Idle {
            self.transition(ReaderState::Reading);
        }
    }

    /// Handles one message.
    pub fn handle(&mut self, message: Message) -> Step {
        match message {
            Message::Line(line) => {
                self.start_reading();
                if self.state != ReaderState::Reading {
                    tracing::debug!("line after end of input ignored");
                    return Step::Continue;
                }
                if self.plotter.ingest(&line) {
                    Step::Redraw
                } else {
                    Step::Continue
                }
            }
            Message::EndOfInput => {
                self.finish_reading();
                Step::Continue
            }
            Message::ReadFailed(err) => {
                tracing::error!(%err, "input read failed");
                if matches!(self.state, ReaderState::Idle | ReaderState::Reading) {
                    self.plotter.record_error(PlotError::Read(err));
                }
                self.finish_reading();
                Step::Continue
            }
            Message::Resize { width, height } => {
                self.plotter.resize(width, height);
                Step::Redraw
            }
            Message::EventFailed(err) => Step::Fail(PlotError::Terminal(err)),
            Message::Quit => Step::Quit,
        }
    }

    /// Takes every queued error, oldest first.
    pub fn drain_errors(&mut self) -> Vec<PlotError> {
        self.plotter.drain_errors()
    }

    fn finish_reading(&mut self) {
        if matches!(self.state, ReaderState::Draining | ReaderState::Closed) {
            return;
        }
        self.transition(ReaderState::Draining);
        self.plotter.close_errors();
        self.transition(ReaderState::Closed);
    }

    fn transition(&mut self, next: ReaderState) {
        tracing::info!(from = ?self.state, to = ?next, "reader state");
        self.state = next;
    }
}

/// Reads `reader` line by line, forwarding each as a [`Message`].
///
/// Lines are split on `\n` with a trailing `\r` removed. Bytes that are not
/// valid UTF-8 are replaced rather than treated as a read failure, so such a
/// line later fails to parse like any other non-numeric line.
///
/// Ends with exactly one [`Message::EndOfInput`] or [`Message::ReadFailed`].
/// Blocks while the queue is full and returns early if the receiving side
/// has gone away.
pub fn read_lines<R: BufRead>(mut reader: R, tx: &SyncSender<Message>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(strip_newline(&buf)).into_owned();
                if tx.send(Message::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                let _ = tx.send(Message::ReadFailed(err));
                return;
            }
        }
    }
    let _ = tx.send(Message::EndOfInput);
}

fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::mapping::Bounds;
    use std::io::{Cursor, Read};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    fn driver(width: u16) -> Driver {
        let config = PlotConfig::new(Bounds::new(0, 10).unwrap());
        Driver::new(Plotter::new(config, width).unwrap())
    }

    fn contents(d: &Driver) -> Vec<i64> {
        d.plotter().window().iter().collect()
    }

    #[test]
    fn test_starts_idle_and_reads_on_first_line() {
        let mut d = driver(10);
        assert_eq!(d.state(), ReaderState::Idle);

        assert!(matches!(d.handle(Message::Line("5".into())), Step::Redraw));
        assert_eq!(d.state(), ReaderState::Reading);
    }

    #[test]
    fn test_parse_failure_stays_reading() {
        let mut d = driver(10);

        assert!(matches!(d.handle(Message::Line("abc".into())), Step::Continue));
        assert_eq!(d.state(), ReaderState::Reading);
        assert!(d.plotter().window().is_empty());
    }

    #[test]
    fn test_end_of_input_closes() {
        let mut d = driver(10);
        d.start_reading();

        d.handle(Message::EndOfInput);

        assert_eq!(d.state(), ReaderState::Closed);
        assert!(d.drain_errors().is_empty());
    }

    #[test]
    fn test_read_failure_is_recorded_and_closes() {
        let mut d = driver(10);
        d.start_reading();

        let err = io::Error::new(io::ErrorKind::BrokenPipe, "input pipe closed");
        d.handle(Message::ReadFailed(err));

        assert_eq!(d.state(), ReaderState::Closed);
        let errors = d.drain_errors();
        assert!(matches!(errors.as_slice(), [PlotError::Read(_)]));
    }

    #[test]
    fn test_lines_after_close_are_ignored() {
        let mut d = driver(10);
        d.handle(Message::Line("1".into()));
        d.handle(Message::EndOfInput);

        assert!(matches!(d.handle(Message::Line("2".into())), Step::Continue));
        assert_eq!(contents(&d), vec![1]);
    }

    #[test]
    fn test_resize_redraws_without_changing_state() {
        let mut d = driver(10);
        d.handle(Message::Line("1".into()));

        assert!(matches!(
            d.handle(Message::Resize { width: 4, height: 4 }),
            Step::Redraw
        ));
        assert_eq!(d.state(), ReaderState::Reading);
        assert_eq!(d.plotter().window().capacity(), 8);
    }

    #[test]
    fn test_quit_and_event_failure() {
        let mut d = driver(10);

        assert!(matches!(d.handle(Message::Quit), Step::Quit));
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "tty gone");
        assert!(matches!(
            d.handle(Message::EventFailed(err)),
            Step::Fail(PlotError::Terminal(_))
        ));
    }

    #[test]
    fn test_read_lines_forwards_then_ends() {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);

        read_lines(Cursor::new("1\n\n  3 \r\n4"), &tx);
        drop(tx);

        let messages: Vec<Message> = rx.iter().collect();
        assert_eq!(messages.len(), 5);
        assert!(matches!(&messages[0], Message::Line(l) if l == "1"));
        assert!(matches!(&messages[1], Message::Line(l) if l.is_empty()));
        assert!(matches!(&messages[2], Message::Line(l) if l == "  3 "));
        assert!(matches!(&messages[3], Message::Line(l) if l == "4"));
        assert!(matches!(messages[4], Message::EndOfInput));
    }

    #[test]
    fn test_invalid_utf8_line_is_a_parse_error_and_reading_continues() {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        read_lines(Cursor::new(b"7\n\xff\n8\n9\n".to_vec()), &tx);
        drop(tx);

        let mut d = driver(10);
        for message in rx {
            d.handle(message);
        }

        assert_eq!(contents(&d), vec![9, 8, 7]);
        assert_eq!(d.state(), ReaderState::Closed);
        let errors = d.drain_errors();
        assert!(matches!(errors.as_slice(), [PlotError::Parse { line: 2, .. }]));
    }

    /// Endless `"5\n"` source counting how many lines were taken from it.
    struct Endless {
        pos: usize,
        lines: Arc<AtomicUsize>,
    }

    impl Read for Endless {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let n = {
                let available = self.fill_buf()?;
                let n = available.len().min(out.len());
                out[..n].copy_from_slice(&available[..n]);
                n
            };
            self.consume(n);
            Ok(n)
        }
    }

    impl BufRead for Endless {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Ok(&b"5\n"[self.pos..])
        }

        fn consume(&mut self, amt: usize) {
            self.pos += amt;
            if self.pos >= 2 {
                self.pos = 0;
                self.lines.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_read_lines_blocks_when_queue_is_full() {
        let lines = Arc::new(AtomicUsize::new(0));
        let source = Endless {
            pos: 0,
            lines: Arc::clone(&lines),
        };
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        let reader = thread::spawn(move || read_lines(source, &tx));

        thread::sleep(Duration::from_millis(200));

        // one extra line may be in hand, blocked on the full queue
        let taken = lines.load(Ordering::SeqCst);
        assert!(taken <= QUEUE_DEPTH + 1, "reader ran ahead by {taken} lines");
        assert!(taken >= QUEUE_DEPTH);

        drop(rx);
        reader.join().unwrap();
    }
}
