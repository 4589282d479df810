//! Program source bookkeeping for caret rendering.

use std::fmt;
use std::rc::Rc;

use cap_ir::{LineIndex, Span};

/// A program text together with the name it is reported under.
pub struct SourceFile {
    name: Option<String>,
    text: String,
    lines: LineIndex,
}

impl SourceFile {
    pub fn new(name: Option<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        SourceFile { name, text, lines }
    }

    /// Name used in traces, if the program came from a named file.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, offset: u32) -> u32 {
        self.lines.line(offset)
    }

    /// Text of the 1-based `line` without its terminator.
    pub fn line_text(&self, line: u32) -> &str {
        let Some(start) = self.lines.line_start(line) else {
            return "";
        };
        let start = (start as usize).min(self.text.len());
        let rest = &self.text[start..];
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        &rest[..end]
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish_non_exhaustive()
    }
}

/// A byte offset into a shared program source.
#[derive(Clone, Debug)]
pub struct ProgramLocation {
    pub source: Rc<SourceFile>,
    pub offset: u32,
}

impl ProgramLocation {
    pub fn new(source: Rc<SourceFile>, offset: u32) -> Self {
        ProgramLocation { source, offset }
    }

    /// Location of the start of `span`.
    pub fn at(source: &Rc<SourceFile>, span: Span) -> Self {
        ProgramLocation::new(Rc::clone(source), span.start)
    }

    pub fn line(&self) -> u32 {
        self.source.line_of(self.offset)
    }

    pub fn file_name(&self) -> &str {
        self.source.name().unwrap_or("(unknown module)")
    }

    /// The source line containing the offset, and the caret padding that
    /// points at the offset within it.
    pub(crate) fn snippet(&self) -> (&str, String) {
        let line = self.line();
        let text = self.source.line_text(line);
        let line_start = self
            .source
            .lines
            .line_start(line)
            .map_or(0, |start| start as usize);
        let column = (self.offset as usize)
            .saturating_sub(line_start)
            .min(text.len());
        let prefix = text.get(..column).unwrap_or(text);
        let pad = prefix
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        (text, pad)
    }
}
