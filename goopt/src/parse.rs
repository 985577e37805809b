//! The scan over the argument vector.
//!
//! Tokens are read left to right. Each option occurrence is handed to its
//! action as soon as it is resolved, so the first problem in command-line
//! order decides how the parse ends: an unknown `--flag`, a missing
//! required value, a rejected value or `--help`. Occurrences before that
//! point have already been applied.

use tracing::{debug, trace};

use crate::action::Action;
use crate::error::{Error, Exit};
use crate::option::{Arity, OptionDef};
use crate::render;
use crate::Parser;

const LIST_OPTIONS: &str = "--list-options";
const CREATE_MANPAGE: &str = "--create-manpage";

/// A token that could be read as an option value rather than a flag.
/// A lone `-` counts as a value.
fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// `token` itself if it is one of `names`, else the only name it is a
/// prefix of.
fn resolve_prefix<'a>(token: &str, names: &[&'a str]) -> Option<&'a str> {
    if let Some(&exact) = names.iter().find(|&&n| n == token) {
        return Some(exact);
    }
    let mut found = None;
    for &n in names {
        if n.starts_with(token) {
            if found.is_some() {
                return None;
            }
            found = Some(n);
        }
    }
    found
}

impl Parser {
    /// Parse `args` (program name first), exiting the process on `--help`,
    /// the introspection commands, or any user error. Returns the
    /// positional arguments.
    pub fn parse<I, S>(&mut self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_parse(args) {
            Ok(rest) => rest,
            Err(exit) => exit.terminate(),
        }
    }

    /// [`Parser::parse`] over `std::env::args()`.
    pub fn parse_env(&mut self) -> Vec<String> {
        self.parse(std::env::args())
    }

    /// Parse `args` (program name first) without exiting. `Err` carries
    /// what the process should print and its exit status.
    pub fn try_parse<I, S>(&mut self, args: I) -> Result<Vec<String>, Exit>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let tokens = args.get(1..).unwrap_or(&[]);

        if self.registry.find_long("--help").is_none() {
            self.register(OptionDef::new(
                &["--help"],
                Arity::None,
                "",
                "show usage message",
                Action::Help,
            ));
        }

        if let Some(exit) = self.introspect(tokens) {
            return Err(exit);
        }

        self.scan(tokens)
    }

    fn fail(&self, error: Error) -> Exit {
        debug!(%error, "parse failed");
        Exit::Failed {
            usage: self.usage(),
            error,
        }
    }

    /// `--list-options` and `--create-manpage`, matched anywhere on the
    /// command line by exact name or unambiguous prefix.
    fn introspect(&self, tokens: &[String]) -> Option<Exit> {
        let mut names = vec![LIST_OPTIONS, CREATE_MANPAGE];
        names.extend(self.registry.long_names());
        let given = |cmd: &str| {
            tokens
                .iter()
                .any(|a| resolve_prefix(a, &names) == Some(cmd))
        };
        if given(LIST_OPTIONS) {
            debug!("listing options");
            return Some(Exit::ListOptions(render::list_names(
                &self.registry,
                &self.extra_names,
            )));
        }
        if given(CREATE_MANPAGE) {
            debug!("creating man page");
            return Some(Exit::Manpage(self.manpage()));
        }
        None
    }

    /// Run the action for one occurrence of `opt`, spelled `flag`.
    fn dispatch(&self, opt: &OptionDef, flag: &str, value: &str) -> Result<(), Exit> {
        if matches!(opt.action, Action::Help) {
            return Err(Exit::Help(self.usage()));
        }
        debug!(flag, value, "applying option");
        opt.action.apply(value).map_err(|reason| {
            self.fail(Error::InvalidValue {
                flag: flag.to_string(),
                reason,
            })
        })
    }

    /// Resolve the value of an occurrence of `opt`. `next` is the following
    /// token if it exists, does not look like a flag, and this occurrence
    /// is allowed to take it. Returns the value and whether `next` was used.
    fn take_value(
        &self,
        opt: &OptionDef,
        flag: &str,
        next: Option<&String>,
    ) -> Result<(String, bool), Exit> {
        match (next, &opt.arity) {
            (Some(v), arity) if arity.takes_value() => Ok((v.clone(), true)),
            (_, Arity::Required) => Err(self.fail(Error::MissingArgument(flag.to_string()))),
            (_, arity) => Ok((arity.fallback().to_string(), false)),
        }
    }

    /// Apply every option in `tokens` and return the positional arguments.
    fn scan(&self, tokens: &[String]) -> Result<Vec<String>, Exit> {
        let mut positional = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let a = tokens[i].as_str();
            let next = tokens.get(i + 1).filter(|t| !looks_like_flag(t));
            trace!(token = a, "scanning");

            if a == "--" {
                positional.extend(tokens[i + 1..].iter().cloned());
                break;
            }

            if a.len() >= 2 && a.starts_with('-') && !a[1..].starts_with('-') {
                let cluster: Vec<char> = a[1..].chars().collect();
                for (j, &c) in cluster.iter().enumerate() {
                    let Some(opt) = self.registry.find_short(c) else {
                        debug!(token = a, flag = %c, "ignoring unknown short flag");
                        continue;
                    };
                    let flag = format!("-{}", c);
                    let last = j + 1 == cluster.len();
                    let (value, consumed) = self.take_value(opt, &flag, next.filter(|_| last))?;
                    if consumed {
                        i += 1;
                    }
                    self.dispatch(opt, &flag, &value)?;
                }
            } else if let Some(opt) = self.registry.find_long(a) {
                let (value, consumed) = self.take_value(opt, a, next)?;
                if consumed {
                    i += 1;
                }
                self.dispatch(opt, a, &value)?;
            } else if let Some((opt, name, value)) = self.split_attached(a) {
                self.dispatch(opt, name, value)?;
            } else if a.starts_with("--") && a.len() > 2 {
                return Err(self.fail(Error::BadFlag(a.to_string())));
            } else {
                positional.push(a.to_string());
            }
            i += 1;
        }

        Ok(positional)
    }

    /// `--name=value` for a declared option that takes a value, with a
    /// non-empty value.
    fn split_attached<'a>(&self, token: &'a str) -> Option<(&OptionDef, &'a str, &'a str)> {
        let (name, value) = token.split_once('=')?;
        if value.is_empty() {
            return None;
        }
        let opt = self.registry.find_long(name)?;
        opt.arity.takes_value().then_some((opt, name, value))
    }
}
