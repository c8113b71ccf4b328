use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("malformed instruction: `{0}`")]
    MalformedInstruction(String),

    #[error("invalid register: `{0}`")]
    InvalidRegister(String),

    #[error("invalid immediate: `{0}`")]
    InvalidImmediate(String),

    #[error("invalid addressing syntax: `{0}`")]
    InvalidAddressingSyntax(String),

    #[error("undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("failed to write output")]
    Output(#[source] std::io::Error),
}

/// An [`Error`] pinned to the source line that triggered it.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct SourceError {
    line: usize,
    text: String,
    source: Error,
}

impl SourceError {
    pub fn new(line: usize, text: &str, source: Error) -> Self {
        SourceError {
            line,
            text: text.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> &Error {
        &self.source
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line + 1
    }

    /// Print the error with diagnostic information showing the file
    /// location and offending line content.
    pub fn print_diag(&self, path: &str) {
        let line_num = self.line();
        cprintln!("<red,bold>error</>: {}", self.source);
        cprintln!("     <blue>--></> <underline>{}:{}</>", path, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, self.text);
        cprintln!("      <blue>|</>");
    }
}
