use std::io;
use std::sync::Arc;

use hippo_maze::formatter::{frame_count, increment_frame, FrameFormatter};
use parking_lot::Mutex;
use speculoos::prelude::*;
use tracing_subscriber::fmt::MakeWriter;

/// Collects everything the subscriber writes.
#[derive(Clone, Default)]
struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(log: impl FnOnce()) -> String {
    let writer = CaptureWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(writer.clone())
        .event_format(FrameFormatter)
        .finish();

    tracing::subscriber::with_default(subscriber, log);
    writer.contents()
}

#[test]
fn test_line_layout() {
    let output = capture(|| tracing::info!(answer = 42, "hello"));

    assert_that(&output.ends_with('\n')).is_true();
    assert_that(&output.contains(" INFO ")).is_true();
    assert_that(&output.contains(" 0x")).is_true();
    assert_that(&output.contains("formatter: hello answer=42")).is_true();
    // No escape codes without ANSI support
    assert_that(&output.contains('\x1b')).is_false();
}

#[test]
fn test_levels_are_padded() {
    let output = capture(|| {
        tracing::warn!("careful");
        tracing::error!("broken");
        tracing::debug!("details");
    });

    let lines: Vec<&str> = output.lines().collect();
    assert_that(&lines).has_length(3);
    assert_that(&lines[0].contains(" WARN ")).is_true();
    assert_that(&lines[1].contains(" ERROR ")).is_true();
    assert_that(&lines[2].contains(" DEBUG ")).is_true();
}

#[test]
fn test_spans_prefix_the_message() {
    let output = capture(|| {
        let span = tracing::info_span!("scene", restart = 3);
        let _guard = span.enter();
        tracing::info!("spawned");
    });

    assert_that(&output.contains("scene{restart=3}: ")).is_true();
}

#[test]
fn test_frame_counter_advances() {
    let before = frame_count();
    increment_frame();
    increment_frame();

    // Other tests may tick concurrently, so only a lower bound holds
    assert_that(&(frame_count() >= before + 2)).is_true();
}
