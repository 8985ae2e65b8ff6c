use std::fmt;

/// Destination for recoverable scan and parse problems. The core never
/// formats or prints; it hands `(line, context, message)` to the sink and
/// keeps going wherever the error policy allows.
pub trait DiagnosticSink {
    fn report(&mut self, line: u32, context: &str, message: &str);
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub context: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.context, self.message)
    }
}

/// Records every diagnostic from one scan/parse pass so the driver can print
/// the complete list afterwards and decide the exit code.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Forget recorded diagnostics, so one bad interactive line does not
    /// poison the next.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, line: u32, context: &str, message: &str) {
        self.entries.push(Diagnostic {
            line,
            context: context.to_string(),
            message: message.to_string(),
        });
    }
}
