use std::io::Write;

// Sectioned log records on the standard output
pub(crate) struct Logger<W: Write> {
    writer: W,
}

impl<W: Write> Logger<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    pub(crate) fn top_title(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.writer, "[{title}]")
    }

    pub(crate) fn title(&mut self, title: &'static str) -> std::io::Result<()> {
        writeln!(self.writer, "\n[{title}]")
    }

    /// Write a `key=value` record.
    pub(crate) fn kv<S: serde::Serialize>(&mut self, key: &str, value: S) -> super::AnyResult {
        writeln!(self.writer, "{key}={}", ron::to_string(&value)?)?;
        Ok(())
    }

    /// Write a record in one line.
    pub(crate) fn log<S: serde::Serialize>(&mut self, s: &S) -> super::AnyResult {
        writeln!(self.writer, "{}", ron::to_string(s)?)?;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
