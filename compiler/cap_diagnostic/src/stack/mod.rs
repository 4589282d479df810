//! The error stack.

use std::io::{self, Write};

use crate::ProgramLocation;

/// One reported error.
#[derive(Clone, Debug)]
pub struct ErrorRecord {
    /// Engine source file that raised the error.
    pub file: &'static str,
    /// Engine source line that raised the error.
    pub line: u32,
    /// Engine function that raised the error.
    pub function: &'static str,
    pub message: String,
    /// Where in the program the error happened, when known.
    pub location: Option<ProgramLocation>,
}

impl ErrorRecord {
    pub fn new(
        file: &'static str,
        line: u32,
        function: &'static str,
        message: impl Into<String>,
    ) -> Self {
        ErrorRecord {
            file,
            line,
            function,
            message: message.into(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<Option<ProgramLocation>>) -> Self {
        self.location = location.into();
        self
    }
}

/// Ordered collection of error records, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ErrorStack {
    records: Vec<ErrorRecord>,
}

impl ErrorStack {
    pub fn new() -> Self {
        ErrorStack {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    /// Append every record of `other`, keeping order.
    pub fn extend(&mut self, other: ErrorStack) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.records.is_empty()
    }

    /// Message of the earliest record.
    pub fn first_error_message(&self) -> Option<&str> {
        self.records.first().map(|r| r.message.as_str())
    }

    /// Most recently pushed record.
    pub fn last(&self) -> Option<&ErrorRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Write the user-facing trace: program locations newest first, then the
    /// source line of the first error with a caret under it.
    pub fn trace(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Stack trace:")?;
        for record in self.records.iter().rev() {
            match &record.location {
                Some(loc) => writeln!(
                    out,
                    "    {}: {}: {}",
                    loc.file_name(),
                    loc.line(),
                    record.message
                )?,
                None => writeln!(out, "    (unknown module): {}", record.message)?,
            }
        }
        writeln!(out)?;

        if let Some(loc) = self.records.first().and_then(|r| r.location.as_ref()) {
            let (text, pad) = loc.snippet();
            writeln!(out, "    {text}")?;
            writeln!(out, "    {pad}^")?;
        }
        Ok(())
    }

    /// Write engine-internal locations, newest first.
    pub fn trace_debug(&self, out: &mut dyn Write) -> io::Result<()> {
        for record in self.records.iter().rev() {
            writeln!(
                out,
                "{}: {}: {}: {}",
                record.file, record.line, record.function, record.message
            )?;
        }
        Ok(())
    }

    /// Write messages only, newest first.
    pub fn trace_simple(&self, out: &mut dyn Write) -> io::Result<()> {
        for record in self.records.iter().rev() {
            writeln!(out, "{}", record.message)?;
        }
        Ok(())
    }

    /// [`ErrorStack::trace`] into a string.
    pub fn trace_to_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.trace(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> IntoIterator for &'a ErrorStack {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
