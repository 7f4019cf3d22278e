//! Script construction for the automation interpreter.

use crate::error::{OsascriptError, Result};

/// Flag token placed before every statement on the interpreter command line.
pub const STATEMENT_FLAG: &str = "-e";

/// An ordered, non-empty sequence of statements.
///
/// Statements are opaque to this crate. Their order is the execution order and
/// is preserved exactly; empty statements are kept as blank script lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    statements: Vec<String>,
}

impl Script {
    /// Build a script from a sequence of statements.
    ///
    /// # Errors
    ///
    /// Returns [`OsascriptError::EmptyScript`] if `statements` yields nothing.
    pub fn new<I, S>(statements: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let statements: Vec<String> = statements.into_iter().map(Into::into).collect();
        if statements.is_empty() {
            return Err(OsascriptError::EmptyScript);
        }
        Ok(Self { statements })
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Interpreter arguments for this script, see [`osascript_args`].
    pub fn to_args(&self) -> Vec<String> {
        osascript_args(self)
    }
}

impl From<String> for Script {
    fn from(statement: String) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

impl From<&str> for Script {
    fn from(statement: &str) -> Self {
        Self::from(statement.to_string())
    }
}

/// Flatten a script into interpreter arguments.
///
/// Every statement becomes two arguments, the flag followed by the statement
/// itself, so `N` statements yield `2N` arguments in input order.
pub fn osascript_args(script: &Script) -> Vec<String> {
    let mut args = Vec::with_capacity(script.len() * 2);
    for line in script.statements() {
        args.push(STATEMENT_FLAG.to_string());
        args.push(line.clone());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_statement_matches_one_element_sequence() {
        let single = Script::from("beep");
        let sequence = Script::new(["beep"]).unwrap();
        assert_eq!(single, sequence);
        assert_eq!(osascript_args(&single), osascript_args(&sequence));
        assert_eq!(osascript_args(&single), vec!["-e", "beep"]);
    }

    #[test]
    fn test_args_alternate_flag_and_statement() {
        let script = Script::new(["tell application \"Finder\"", "activate", "end tell"]).unwrap();
        assert_eq!(
            script.to_args(),
            vec![
                "-e",
                "tell application \"Finder\"",
                "-e",
                "activate",
                "-e",
                "end tell",
            ]
        );
    }

    #[test]
    fn test_empty_statement_is_preserved() {
        let script = Script::new(["first", "", "last"]).unwrap();
        let args = script.to_args();
        assert_eq!(args.len(), 6);
        assert_eq!(args[3], "");
    }

    #[test]
    fn test_empty_script_rejected() {
        let result = Script::new(Vec::<String>::new());
        assert!(matches!(result, Err(OsascriptError::EmptyScript)));
    }
}
