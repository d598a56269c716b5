//! Result record output.
//!
//! Records are JSON. Pretty output is tab-indented; sweep frames are written
//! one compact record per line.

use serde::Serialize;
use std::io::Write;

use crate::model::AppError;

/// Write one record followed by a newline.
///
/// # Errors
///
/// Returns the encoder or writer failure.
pub fn write_record<W: Write, T: Serialize>(
    mut writer: W,
    record: &T,
    pretty: bool,
) -> Result<(), AppError> {
    if pretty {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        record.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(&mut writer, record)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write sweep frames as JSON lines, as they are produced.
///
/// Returns the number of frames written.
///
/// # Errors
///
/// Returns the first encoder or writer failure; later frames are not evaluated.
pub fn write_frames<W, I>(mut writer: W, frames: I) -> Result<usize, AppError>
where
    W: Write,
    I: IntoIterator,
    I::Item: Serialize,
{
    let mut written = 0;
    for frame in frames {
        write_record(&mut writer, &frame, false)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measurements, Rect};
    use crate::visibility::{Dimension, ScrollSweep, ZeroExtentPolicy};

    fn sample() -> Measurements {
        Measurements::new(
            Rect::new(100.0, 0.0, 50.0, 50.0),
            Rect::new(120.0, 0.0, 200.0, 300.0),
        )
    }

    #[test]
    fn compact_record_is_single_line() {
        let result = Dimension::Vertical.evaluate(&sample(), ZeroExtentPolicy::Propagate);
        let mut out = Vec::new();

        write_record(&mut out, &result, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with(r#"{"visible":true,"percentVisible":0.6,"#));
    }

    #[test]
    fn pretty_record_is_tab_indented() {
        let result = Dimension::Vertical.evaluate(&sample(), ZeroExtentPolicy::Propagate);
        let mut out = Vec::new();

        write_record(&mut out, &result, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n\t\"visible\": true,"));
        assert!(text.contains("\n\t\t\"invisibleTop\": 20.0,"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn frames_are_json_lines() {
        let sweep = ScrollSweep::new(0.0, 100.0, 50.0).unwrap();
        let frames = sweep.run(&sample(), Dimension::Vertical, ZeroExtentPolicy::Propagate);
        let mut out = Vec::new();

        let written = write_frames(&mut out, &frames).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(written, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(r#"{"offset":0.0,"result":{"visible":"#));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn long_sweep_streams_and_stops_at_first_write_failure() {
        let sweep = ScrollSweep::new(0.0, 1e12, 1.0).unwrap();
        let frames = sweep.frames(&sample(), Dimension::Vertical, ZeroExtentPolicy::Propagate);

        let result = write_frames(Broken, frames);

        assert!(matches!(
            result,
            Err(AppError::Encode(_)) | Err(AppError::Output(_))
        ));
    }

    #[test]
    fn streamed_frames_are_counted() {
        let sweep = ScrollSweep::new(0.0, 1e12, 1.0).unwrap();
        let frames = sweep
            .frames(&sample(), Dimension::Vertical, ZeroExtentPolicy::Propagate)
            .take(4);
        let mut out = Vec::new();

        let written = write_frames(&mut out, frames).unwrap();

        assert_eq!(written, 4);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);
    }
}
