//! Typed option builders.
//!
//! Each builder registers one option (two for [`Parser::flag`]) and hands
//! back the variable that option writes to.

use crate::action::{Action, BoolVar, StringVar, StringsVar};
use crate::option::{Arity, OptionDef};
use crate::Parser;

impl Parser {
    /// An option without a value that runs `f` each time it occurs.
    pub fn no_arg<F>(&mut self, names: &[&str], help: &str, f: F)
    where
        F: Fn() -> Result<(), String> + 'static,
    {
        let action = Action::Trigger(Box::new(move |_: &str| f()));
        self.register(OptionDef::new(names, Arity::None, "", help, action));
    }

    /// An option that requires a value and passes it to `f`.
    pub fn req_arg<F>(&mut self, names: &[&str], placeholder: &str, help: &str, f: F)
    where
        F: Fn(&str) -> Result<(), String> + 'static,
    {
        let action = Action::Call(Box::new(f));
        self.register(OptionDef::new(names, Arity::Required, placeholder, help, action));
    }

    /// An option whose value may be left out, in which case `f` gets
    /// `default`.
    pub fn opt_arg<F>(&mut self, names: &[&str], default: &str, help: &str, f: F)
    where
        F: Fn(&str) -> Result<(), String> + 'static,
    {
        let action = Action::CallOr {
            default: default.to_string(),
            callback: Box::new(f),
        };
        let arity = Arity::Optional {
            default: default.to_string(),
        };
        self.register(OptionDef::new(names, arity, default, help, action));
    }

    /// A pair of options sharing one boolean: `yes` sets it, `no` clears
    /// it. Starts out false. Either side may be empty.
    pub fn flag(&mut self, yes: &[&str], no: &[&str], help_yes: &str, help_no: &str) -> BoolVar {
        if yes.is_empty() && no.is_empty() {
            panic!("Flag declared without any names ({:?})", help_yes);
        }
        let var = BoolVar::new(false);
        if !yes.is_empty() {
            let action = Action::Set {
                var: var.clone(),
                value: true,
            };
            self.register(OptionDef::new(yes, Arity::None, "", help_yes, action));
        }
        if !no.is_empty() {
            let action = Action::Set {
                var: var.clone(),
                value: false,
            };
            self.register(OptionDef::new(no, Arity::None, "", help_no, action));
        }
        var
    }

    /// A boolean that also accepts an explicit value: `true`, `True`,
    /// `yes` or nothing turn it on; `false`, `False`, `no` turn it off.
    pub fn bool(&mut self, names: &[&str], default: bool, help: &str) -> BoolVar {
        let var = BoolVar::new(default);
        let arity = Arity::Optional {
            default: "true".to_string(),
        };
        let action = Action::ParseBool(var.clone());
        self.register(OptionDef::new(names, arity, &default.to_string(), help, action));
        var
    }

    /// A string set verbatim from the option's value.
    pub fn string(&mut self, names: &[&str], default: &str, help: &str) -> StringVar {
        let var = StringVar::new(default);
        let action = Action::Store(var.clone());
        self.register(OptionDef::new(names, Arity::Required, default, help, action));
        var
    }

    /// Every value given to the option, in command-line order.
    pub fn strings(&mut self, names: &[&str], placeholder: &str, help: &str) -> StringsVar {
        let var = StringsVar::new();
        let action = Action::Append(var.clone());
        self.register(OptionDef::new(names, Arity::Required, placeholder, help, action));
        var
    }

    /// One of a fixed set of strings, starting as the first of them.
    /// Shown in help as `[a|b|c]`.
    pub fn alternatives(&mut self, names: &[&str], choices: &[&str], help: &str) -> StringVar {
        let Some(first) = choices.first() else {
            panic!("Alternatives for {:?} declared without choices", names);
        };
        let var = StringVar::new(first);
        let placeholder = format!("[{}]", choices.join("|"));
        let action = Action::Choose {
            var: var.clone(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
        };
        self.register(OptionDef::new(names, Arity::Required, &placeholder, help, action));
        var
    }
}
