use std::{
    fmt,
    io::{self, Stdout, Write},
    sync::Mutex,
};

use wallclock_proto::ports::surface::{DisplaySurface, SurfaceError};

/// Moves the cursor to the start of the line `n` lines up.
fn cursor_previous_line(n: usize) -> String {
    format!("\x1b[{n}F")
}

/// Clears from the cursor to the end of the screen.
const CLEAR_TO_END: &str = "\x1b[J";

#[derive(Debug)]
struct TerminalState<W> {
    writer:      W,
    last_text:   String,
    drawn_lines: usize,
}

/// Display surface that prints every render to a writer.
///
/// With `in_place` set, each render rewinds over the previously printed block
/// so the terminal shows a single, updating clock.
pub struct TerminalSurface<W> {
    state:    Mutex<TerminalState<W>>,
    in_place: bool,
}

impl TerminalSurface<Stdout> {
    pub fn stdout(in_place: bool) -> Self {
        Self::new(io::stdout(), in_place)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, in_place: bool) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                writer,
                last_text: String::new(),
                drawn_lines: 0,
            }),
            in_place,
        }
    }

    pub fn in_place(&self) -> bool {
        self.in_place
    }

    /// Consume the surface and hand back the writer.
    pub fn into_inner(self) -> Result<W, SurfaceError> {
        self.state
            .into_inner()
            .map(|state| state.writer)
            .map_err(|_| SurfaceError::Poisoned)
    }
}

impl<W: Write> TerminalState<W> {
    fn draw(&mut self, text: &str, in_place: bool) -> io::Result<()> {
        if in_place && self.drawn_lines > 0 {
            write!(self.writer, "{}", cursor_previous_line(self.drawn_lines))?;
            // The cursor now sits at the top of the old block.
            self.drawn_lines = 0;
            self.writer.write_all(CLEAR_TO_END.as_bytes())?;
        }

        writeln!(self.writer, "{text}")?;
        self.drawn_lines = text.lines().count().max(1);
        self.writer.flush()
    }
}

impl<W: Write + Send> DisplaySurface for TerminalSurface<W> {
    fn replace_text(&self, text: &str) -> Result<(), SurfaceError> {
        let mut state = self.state.lock().map_err(|_| SurfaceError::Poisoned)?;

        state.draw(text, self.in_place)?;
        state.last_text.clear();
        state.last_text.push_str(text);

        Ok(())
    }

    fn text(&self) -> Result<String, SurfaceError> {
        self.state
            .lock()
            .map_err(|_| SurfaceError::Poisoned)
            .map(|state| state.last_text.clone())
    }
}

impl<W> fmt::Debug for TerminalSurface<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("in_place", &self.in_place)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use super::*;

    #[derive(Debug, Default)]
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Lets escape sequences through but fails the next text write once armed.
    #[derive(Debug, Default)]
    struct FlakyWriter {
        output:         Vec<u8>,
        fail_next_text: Arc<AtomicBool>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let is_escape = buf.first().is_none_or(|byte| *byte == 0x1b);
            if !is_escape && self.fail_next_text.swap(false, Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn written(surface: TerminalSurface<Vec<u8>>) -> String {
        let bytes = surface.into_inner().expect("writer");
        String::from_utf8(bytes).expect("utf-8 output")
    }

    #[test]
    fn plain_mode_appends_each_render() {
        let surface = TerminalSurface::new(Vec::new(), false);
        assert!(!surface.in_place());

        surface.replace_text("Date: 2024/03/05\nTime: 09:07:02").expect("render");
        surface.replace_text("Date: 2024/03/05\nTime: 09:07:03").expect("render");

        assert_eq!(
            written(surface),
            "Date: 2024/03/05\nTime: 09:07:02\nDate: 2024/03/05\nTime: 09:07:03\n"
        );
    }

    #[test]
    fn in_place_mode_rewinds_over_previous_block() {
        let surface = TerminalSurface::new(Vec::new(), true);
        assert!(surface.in_place());

        surface.replace_text("Date: 2024/03/05\nTime: 09:07:02").expect("render");
        surface.replace_text("Date: 2024/03/05\nTime: 09:07:03").expect("render");

        assert_eq!(
            written(surface),
            "Date: 2024/03/05\nTime: 09:07:02\n\x1b[2F\x1b[JDate: 2024/03/05\nTime: 09:07:03\n"
        );
    }

    #[test]
    fn first_in_place_render_does_not_rewind() {
        let surface = TerminalSurface::new(Vec::new(), true);

        surface.replace_text("one line").expect("render");

        assert_eq!(written(surface), "one line\n");
    }

    #[test]
    fn text_returns_last_render() {
        let surface = TerminalSurface::new(Vec::new(), true);
        assert_eq!(surface.text().expect("read"), "");

        surface.replace_text("first").expect("render");
        surface.replace_text("second").expect("render");

        assert_eq!(surface.text().expect("read"), "second");
    }

    #[test]
    fn write_failures_map_to_surface_errors() {
        let surface = TerminalSurface::new(FailingWriter, false);

        let err = surface.replace_text("anything").expect_err("write failure");

        assert!(matches!(
            err,
            SurfaceError::Write { ref context } if context.as_ref() == "pipe closed"
        ));
        assert_eq!(surface.text().expect("read"), "");
    }

    #[test]
    fn failed_render_after_rewind_does_not_rewind_twice() {
        let fail_next_text = Arc::new(AtomicBool::new(false));
        let surface = TerminalSurface::new(
            FlakyWriter {
                output:         Vec::new(),
                fail_next_text: fail_next_text.clone(),
            },
            true,
        );

        surface.replace_text("Date: A\nTime: 1").expect("render");

        fail_next_text.store(true, Ordering::SeqCst);
        surface
            .replace_text("Date: A\nTime: 2")
            .expect_err("text write fails");

        surface.replace_text("Date: A\nTime: 3").expect("render");

        let output = surface.into_inner().expect("writer").output;
        assert_eq!(
            String::from_utf8(output).expect("utf-8 output"),
            "Date: A\nTime: 1\n\x1b[2F\x1b[JDate: A\nTime: 3\n"
        );
    }

    #[test]
    fn failed_first_render_leaves_nothing_to_rewind() {
        let fail_next_text = Arc::new(AtomicBool::new(false));
        let surface = TerminalSurface::new(
            FlakyWriter {
                output:         Vec::new(),
                fail_next_text: fail_next_text.clone(),
            },
            true,
        );

        fail_next_text.store(true, Ordering::SeqCst);
        surface.replace_text("one").expect_err("first write fails");

        surface.replace_text("Date: A\nTime: 1").expect("render");
        surface.replace_text("Date: A\nTime: 2").expect("render");

        let output = surface.into_inner().expect("writer").output;
        assert_eq!(
            String::from_utf8(output).expect("utf-8 output"),
            "Date: A\nTime: 1\n\x1b[2F\x1b[JDate: A\nTime: 2\n"
        );
    }
}
