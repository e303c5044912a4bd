#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub position: Option<Position>,
    pub message: String,
}

pub trait ErrorListener {
    fn syntax_error(&mut self, position: Option<Position>, message: &str);

    fn had_error(&self) -> bool;
}

/// Collects diagnostics and logs each one as it arrives.
#[derive(Debug, Default)]
pub struct SyntaxErrorListener {
    diagnostics: Vec<SyntaxDiagnostic>,
}

impl SyntaxErrorListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[SyntaxDiagnostic] {
        &self.diagnostics
    }
}

impl ErrorListener for SyntaxErrorListener {
    fn syntax_error(&mut self, position: Option<Position>, message: &str) {
        match position {
            Some(Position { line, column }) => log::error!(
                "syntax error at line {}, column {}: {}",
                line,
                column,
                message
            ),
            None => log::error!("syntax error: {}", message),
        }
        self.diagnostics.push(SyntaxDiagnostic {
            position,
            message: message.to_string(),
        });
    }

    fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod listener_tests {
    use super::*;

    #[test]
    fn listener_flags_after_first_diagnostic() {
        let mut listener = SyntaxErrorListener::new();
        assert!(!listener.had_error());

        listener.syntax_error(Some(Position { line: 3, column: 7 }), "unexpected token");
        listener.syntax_error(None, "bad identifier");

        assert!(listener.had_error());
        assert_eq!(listener.diagnostics().len(), 2);
        assert_eq!(
            listener.diagnostics()[0].position,
            Some(Position { line: 3, column: 7 })
        );
        assert_eq!(listener.diagnostics()[1].message, "bad identifier");
    }
}
