//! Declared options and the ordered registry that holds them.

use tracing::debug;

use crate::action::Action;

/// Whether an option takes a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    None,
    /// The value may be omitted; `default` is passed to the handler then.
    Optional { default: String },
    Required,
}

impl Arity {
    pub fn takes_value(&self) -> bool {
        !matches!(self, Arity::None)
    }

    /// The raw value handed over when the command line supplied none.
    pub(crate) fn fallback(&self) -> &str {
        match self {
            Arity::Optional { default } => default,
            _ => "",
        }
    }
}

/// One declared flag definition.
#[derive(Debug)]
pub struct OptionDef {
    /// Long spellings including the leading `--`, in declaration order.
    pub long_names: Vec<String>,
    /// Short spellings without the dash, in declaration order.
    pub short_names: Vec<char>,
    pub arity: Arity,
    /// Display text for the value, e.g. `[slow|fast]`.
    pub placeholder: String,
    pub help: String,
    pub(crate) action: Action,
}

impl OptionDef {
    /// Split `names` into short and long spellings.
    ///
    /// Panics on a malformed spelling: these are programming errors in the
    /// caller, not something a user can trigger from the command line.
    pub fn new(names: &[&str], arity: Arity, placeholder: &str, help: &str, action: Action) -> Self {
        let mut long_names: Vec<String> = Vec::new();
        let mut short_names: Vec<char> = Vec::new();
        for &n in names {
            let chars: Vec<char> = n.chars().collect();
            match chars.as_slice() {
                [] | [_] => panic!("Invalid very short flag: {:?}", n),
                [c, ..] if *c != '-' => panic!("Invalid flag, doesn't start with '-': {}", n),
                ['-', '-'] => panic!("Invalid short flag, '-' is not a flag character: {}", n),
                ['-', c] => {
                    if !short_names.contains(c) {
                        short_names.push(*c);
                    }
                }
                [_, c, ..] if *c != '-' => {
                    panic!("Invalid long flag, doesn't start with '--': {}", n)
                }
                _ => {
                    if n.contains('=') {
                        panic!("Invalid long flag, contains '=': {}", n);
                    }
                    if !long_names.iter().any(|l| l == n) {
                        long_names.push(n.to_string());
                    }
                }
            }
        }
        if long_names.is_empty() && short_names.is_empty() {
            panic!("Option declared without any names (help: {:?})", help);
        }
        OptionDef {
            long_names,
            short_names,
            arity,
            placeholder: placeholder.to_string(),
            help: help.to_string(),
            action,
        }
    }

    pub fn has_short(&self, c: char) -> bool {
        self.short_names.contains(&c)
    }

    pub fn has_long(&self, name: &str) -> bool {
        self.long_names.iter().any(|l| l == name)
    }

    /// The spelling to name this option by in diagnostics.
    pub fn display_name(&self) -> String {
        match (self.long_names.first(), self.short_names.first()) {
            (Some(l), _) => l.clone(),
            (None, Some(c)) => format!("-{}", c),
            (None, None) => String::new(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Append-only, ordered collection of declared options.
#[derive(Debug, Default)]
pub struct Registry {
    options: Vec<OptionDef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option. Panics if any of its spellings is already taken.
    pub fn register(&mut self, opt: OptionDef) {
        for &c in &opt.short_names {
            if self.find_short(c).is_some() {
                panic!("Duplicate short flag: -{}", c);
            }
        }
        for l in &opt.long_names {
            if self.find_long(l).is_some() {
                panic!("Duplicate long flag: {}", l);
            }
        }
        debug!(
            long = ?opt.long_names,
            short = ?opt.short_names,
            arity = ?opt.arity,
            "registered option"
        );
        self.options.push(opt);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionDef> {
        self.options.iter()
    }

    pub fn find_short(&self, c: char) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.has_short(c))
    }

    pub fn find_long(&self, name: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.has_long(name))
    }

    /// Call `f` with every declared spelling: each option's long names,
    /// then its short names as `-c`, in registration order.
    pub fn visit_all_names<F: FnMut(&str)>(&self, mut f: F) {
        for opt in &self.options {
            for n in &opt.long_names {
                f(n);
            }
            for c in &opt.short_names {
                f(&format!("-{}", c));
            }
        }
    }

    /// All long spellings, in registration order.
    pub fn long_names(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flat_map(|o| o.long_names.iter().map(|s| s.as_str()))
    }
}
