//! getopt-style command-line parsing with typed, bound option values.
//!
//! Options are declared on a [`Parser`] before parsing. Each builder
//! returns a handle to the value it controls; after [`Parser::parse`]
//! the handles hold whatever the command line set, and `parse` returns
//! the positional arguments.
//!
//! ```no_run
//! let mut p = goopt::Parser::new("example");
//! let happy = p.flag(&["-h", "--happy"], &["-u", "--unhappy"], "be happy", "be unhappy");
//! let name = p.string(&["--name"], "anonymous", "pick your name");
//! let rest = p.parse_env();
//! println!("{} {} {:?}", happy.get(), name.get(), rest);
//! ```
//!
//! Recognized on the command line:
//! - clustered short flags (`-abc`), the last of which may take the next
//!   token as its value;
//! - `--long`, `--long value` and `--long=value`;
//! - `--` ends option processing;
//! - `--help`, `--list-options` and `--create-manpage` print text and exit.

use std::collections::BTreeMap;

pub mod action;
pub mod builders;
pub mod error;
pub mod option;
pub mod parse;
pub mod render;

pub use action::{BoolVar, StringVar, StringsVar};
pub use error::{Error, Exit, Rejection, Result};
pub use option::{Arity, OptionDef, Registry};
pub use render::ProgramInfo;

/// Parser context: the option registry plus program metadata.
///
/// Single-threaded by construction; bound variables are `Rc`-backed, so
/// neither the parser nor its handles can cross threads.
pub struct Parser {
    registry: Registry,
    info: ProgramInfo,
    extra_names: Vec<String>,
}

impl Parser {
    pub fn new(name: &str) -> Self {
        Parser {
            registry: Registry::new(),
            info: ProgramInfo::new(name),
            extra_names: Vec::new(),
        }
    }

    pub fn summary(&mut self, s: &str) -> &mut Self {
        self.info.summary = Some(s.to_string());
        self
    }

    pub fn author(&mut self, s: &str) -> &mut Self {
        self.info.author = Some(s.to_string());
        self
    }

    pub fn version(&mut self, s: &str) -> &mut Self {
        self.info.version = Some(s.to_string());
        self
    }

    pub fn suite(&mut self, s: &str) -> &mut Self {
        self.info.suite = Some(s.to_string());
        self
    }

    pub fn description(&mut self, s: &str) -> &mut Self {
        self.info.description = Some(s.to_string());
        self
    }

    /// Substitute `value` for `key` in help text.
    pub fn var(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn vars(&mut self, vars: BTreeMap<String, String>) -> &mut Self {
        self.info.vars.extend(vars);
        self
    }

    /// Names printed by `--list-options` ahead of the declared ones,
    /// e.g. subcommands.
    pub fn extra_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a fully built option. Panics if one of its names is taken.
    pub fn register(&mut self, opt: OptionDef) {
        self.registry.register(opt);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn info(&self) -> &ProgramInfo {
        &self.info
    }

    pub fn visit_all_names<F: FnMut(&str)>(&self, f: F) {
        self.registry.visit_all_names(f);
    }

    pub fn usage(&self) -> String {
        render::usage(&self.registry, &self.info)
    }

    pub fn help(&self) -> String {
        render::help(&self.registry, &self.info)
    }

    pub fn synopsis(&self) -> String {
        render::synopsis(&self.registry)
    }

    pub fn manpage(&self) -> String {
        render::manpage(&self.registry, &self.info, &render::today())
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("name", &self.info.name)
            .field("options", &self.registry.len())
            .finish()
    }
}
