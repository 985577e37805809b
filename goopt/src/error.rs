use std::io::{self, Write};

/// Why a handler refused the raw value it was given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    #[error("bad boolean value: {0}")]
    BadBoolean(String),

    #[error("{0}")]
    Custom(String),
}

/// User errors found while scanning the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Bad flag: {0}")]
    BadFlag(String),

    #[error("Flag {0} requires argument!")]
    MissingArgument(String),

    #[error("Error in flag {flag}: {reason}")]
    InvalidValue {
        flag: String,
        #[source]
        reason: Rejection,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a parse ends when it does not simply return the positional
/// arguments. Every variant is reported on stdout and terminates the
/// process with [`Exit::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// `--help` was given.
    Help(String),
    /// `--list-options` (or an unambiguous prefix of it) was given.
    ListOptions(String),
    /// `--create-manpage` (or an unambiguous prefix of it) was given.
    Manpage(String),
    /// A user error; `usage` is printed ahead of the diagnostic.
    Failed { usage: String, error: Error },
}

impl Exit {
    pub fn status(&self) -> i32 {
        match self {
            Exit::Failed { .. } => 1,
            _ => 0,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Exit::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Write the text this exit is supposed to show.
    pub fn report<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Exit::Help(text) | Exit::ListOptions(text) | Exit::Manpage(text) => {
                write!(out, "{}", text)
            }
            Exit::Failed { usage, error } => write!(out, "{}\n\n{}\n", usage, error),
        }
    }

    /// Report on stdout and end the process.
    pub fn terminate(&self) -> ! {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = self.report(&mut out).and_then(|()| out.flush()) {
            eprintln!("Cannot write to stdout: {}", e);
        }
        std::process::exit(self.status());
    }
}
