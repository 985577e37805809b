//! Usage, help, synopsis and man page text built from the registry.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use crate::option::{OptionDef, Registry};

const DEFAULT_DESCRIPTION: &str = "To add a description to your program, call Parser::description.

If you want paragraphs, separate them with an empty line.";

/// Program metadata shown in usage text and man pages.
#[derive(Debug, Default, Clone)]
pub struct ProgramInfo {
    pub name: String,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub suite: Option<String>,
    pub description: Option<String>,
    /// Substitutions applied to help text, in ascending key order.
    pub vars: BTreeMap<String, String>,
}

impl ProgramInfo {
    pub fn new(name: &str) -> Self {
        ProgramInfo {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Replace every variable key occurring in `text` with its value.
    pub fn expand(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (k, v) in &self.vars {
            if k.is_empty() {
                continue;
            }
            out = out.replace(k.as_str(), v);
        }
        out
    }
}

/// `Usage of <prog>:` followed by the summary (if any) and the help block.
pub fn usage(registry: &Registry, info: &ProgramInfo) -> String {
    match &info.summary {
        Some(summary) => format!(
            "Usage of {}:\n\t{}\n{}",
            info.name,
            summary,
            help(registry, info)
        ),
        None => format!("Usage of {}:\n{}", info.name, help(registry, info)),
    }
}

/// One line per option: short spellings, long spellings, help text, with
/// the first two columns aligned.
pub fn help(registry: &Registry, info: &ProgramInfo) -> String {
    let rows: Vec<(String, String, String)> = registry
        .iter()
        .map(|o| (short_column(o), long_column(o), info.expand(&o.help)))
        .collect();
    let w0 = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0) + 2;
    let w1 = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(0) + 2;

    let mut out = String::new();
    if registry.len() > 1 {
        out.push_str("Options:\n");
    }
    for (shorts, longs, text) in &rows {
        let _ = write!(out, "{:w0$}{:w1$}{}\n", shorts, longs, text, w0 = w0, w1 = w1);
    }
    out
}

fn short_column(o: &OptionDef) -> String {
    let mut col = String::from("  ");
    if !o.short_names.is_empty() {
        let names: Vec<String> = o.short_names.iter().map(|c| format!("-{}", c)).collect();
        col.push_str(&names.join(", "));
        if !o.placeholder.is_empty() {
            let _ = write!(col, " {}", o.placeholder);
        }
    }
    col
}

fn long_column(o: &OptionDef) -> String {
    let mut col = String::new();
    if !o.long_names.is_empty() {
        col.push_str(&o.long_names.join(", "));
        if !o.placeholder.is_empty() {
            let _ = write!(col, "={}", o.placeholder);
        }
    }
    col
}

/// roff spellings of an option joined by `sep`, plus its placeholder.
fn roff_spellings(o: &OptionDef, sep: &str) -> String {
    let mut names: Vec<String> = o.short_names.iter().map(|c| format!("\\-{}", c)).collect();
    names.extend(o.long_names.iter().map(|n| format!("\\-\\-{}", &n[2..])));
    let mut out = names.join(sep);
    if !o.placeholder.is_empty() {
        let _ = write!(out, " {}", o.placeholder);
    }
    out
}

/// ` [-a|--alpha X] [--beta]...` for a one-line command summary.
pub fn synopsis(registry: &Registry) -> String {
    let mut out = String::new();
    for o in registry.iter() {
        let _ = write!(out, " [{}]", roff_spellings(o, "|"));
    }
    out
}

/// Each line of `text` as is, except empty lines which start a new
/// paragraph.
fn format_paragraphs(text: &str) -> String {
    let mut out = String::new();
    for line in text.split('\n') {
        if line.is_empty() {
            out.push_str(".PP\n");
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// A section 1 man page, dated `date`.
pub fn manpage(registry: &Registry, info: &ProgramInfo, date: &str) -> String {
    let progname = Path::new(&info.name)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| info.name.clone());
    let suite = info.suite.as_deref().unwrap_or("");
    let version = match (&info.suite, &info.version) {
        (Some(s), Some(v)) => format!("{} {}", s, v),
        (Some(s), None) => format!("{} ", s),
        (None, Some(v)) => v.clone(),
        (None, None) => String::new(),
    };

    let mut out = String::new();
    let _ = write!(
        out,
        ".TH \"{}\" 1 \"{}\" \"{}\" \"{}\"\n",
        progname, date, version, suite
    );
    out.push_str(".SH NAME\n");
    match &info.summary {
        Some(summary) => {
            let _ = write!(out, "{} \\- {}\n", progname, summary);
        }
        None => {
            let _ = write!(out, "{}\n", progname);
        }
    }
    out.push_str(".SH SYNOPSIS\n");
    let _ = write!(out, "{}{}\n", progname, synopsis(registry));
    out.push_str(".SH DESCRIPTION\n");
    let description = info.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
    out.push_str(&format_paragraphs(description));
    out.push_str(".SH OPTIONS\n");
    for o in registry.iter() {
        let _ = write!(out, ".TP\n{}\n{}\n", roff_spellings(o, ","), info.expand(&o.help));
    }
    if let Some(author) = &info.author {
        let _ = write!(out, ".SH AUTHOR\n{}\n", author);
    }
    out
}

/// Today's date the way man pages print it, e.g. `March 4, 2026`.
pub fn today() -> String {
    chrono::Local::now().format("%B %-d, %Y").to_string()
}

/// `extra` names followed by every declared name, one per line.
pub fn list_names(registry: &Registry, extra: &[String]) -> String {
    let mut out = String::new();
    for n in extra {
        out.push_str(n);
        out.push('\n');
    }
    registry.visit_all_names(|n| {
        out.push_str(n);
        out.push('\n');
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, BoolVar, StringVar};
    use crate::option::Arity;

    fn sample() -> Registry {
        let mut r = Registry::new();
        r.register(OptionDef::new(
            &["-h", "--happy"],
            Arity::None,
            "",
            "be happy",
            Action::Set {
                var: BoolVar::new(false),
                value: true,
            },
        ));
        r.register(OptionDef::new(
            &["--speed", "--velocity"],
            Arity::Required,
            "[slow|fast]",
            "set the speed of $PROG",
            Action::Store(StringVar::new("slow")),
        ));
        r.register(OptionDef::new(
            &["-b"],
            Arity::Required,
            "BOO!",
            "pick your scary sound",
            Action::Store(StringVar::new("BOO!")),
        ));
        r
    }

    #[test]
    fn expand_replaces_every_occurrence() {
        let mut info = ProgramInfo::new("prog");
        info.vars.insert("$PROG".into(), "tgoopt".into());
        info.vars.insert("@V".into(), "1.0".into());
        assert_eq!(info.expand("$PROG @V $PROG"), "tgoopt 1.0 tgoopt");
        assert_eq!(info.expand("nothing"), "nothing");
    }

    #[test]
    fn expand_applies_keys_in_order() {
        let mut info = ProgramInfo::new("prog");
        info.vars.insert("a".into(), "b".into());
        info.vars.insert("b".into(), "c".into());
        assert_eq!(info.expand("a"), "c");
    }

    #[test]
    fn help_aligns_columns() {
        let mut info = ProgramInfo::new("prog");
        info.vars.insert("$PROG".into(), "prog".into());
        let text = help(&sample(), &info);
        let expected = concat!(
            "Options:\n",
            "  -h       --happy                          be happy\n",
            "           --speed, --velocity=[slow|fast]  set the speed of prog\n",
            "  -b BOO!                                   pick your scary sound\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn single_option_has_no_header() {
        let mut r = Registry::new();
        r.register(OptionDef::new(&["--help"], Arity::None, "", "show usage message", Action::Help));
        let text = help(&r, &ProgramInfo::new("p"));
        assert_eq!(text, "    --help  show usage message\n");
    }

    #[test]
    fn usage_with_and_without_summary() {
        let r = sample();
        let mut info = ProgramInfo::new("prog");
        assert!(usage(&r, &info).starts_with("Usage of prog:\nOptions:\n"));
        info.summary = Some("silly test program".into());
        assert!(usage(&r, &info).starts_with("Usage of prog:\n\tsilly test program\nOptions:\n"));
    }

    #[test]
    fn synopsis_escapes_dashes() {
        assert_eq!(
            synopsis(&sample()),
            " [\\-h|\\-\\-happy] [\\-\\-speed|\\-\\-velocity [slow|fast]] [\\-b BOO!]"
        );
    }

    #[test]
    fn manpage_sections() {
        let mut info = ProgramInfo::new("/usr/bin/prog");
        info.summary = Some("does things".into());
        info.version = Some("1.2".into());
        info.suite = Some("tools".into());
        info.author = Some("A. Hacker".into());
        info.description = Some("First.\n\nSecond.".into());
        let page = manpage(&sample(), &info, "March 4, 2026");
        let expected = ".TH \"prog\" 1 \"March 4, 2026\" \"tools 1.2\" \"tools\"\n\
            .SH NAME\n\
            prog \\- does things\n\
            .SH SYNOPSIS\n\
            prog [\\-h|\\-\\-happy] [\\-\\-speed|\\-\\-velocity [slow|fast]] [\\-b BOO!]\n\
            .SH DESCRIPTION\n\
            First.\n\
            .PP\n\
            Second.\n\
            .SH OPTIONS\n\
            .TP\n\
            \\-h,\\-\\-happy\n\
            be happy\n\
            .TP\n\
            \\-\\-speed,\\-\\-velocity [slow|fast]\n\
            set the speed of $PROG\n\
            .TP\n\
            \\-b BOO!\n\
            pick your scary sound\n\
            .SH AUTHOR\n\
            A. Hacker\n";
        assert_eq!(page, expected);
    }

    #[test]
    fn manpage_without_metadata() {
        let page = manpage(&sample(), &ProgramInfo::new("prog"), "today");
        assert!(page.starts_with(".TH \"prog\" 1 \"today\" \"\" \"\"\n.SH NAME\nprog\n"));
        assert!(page.contains("Parser::description"));
        assert!(!page.contains(".SH AUTHOR"));
    }

    #[test]
    fn list_names_puts_extras_first() {
        let text = list_names(&sample(), &["--extra".to_string()]);
        assert_eq!(text, "--extra\n--happy\n-h\n--speed\n--velocity\n-b\n");
    }

    #[test]
    fn today_is_month_day_year() {
        let d = today();
        let parts: Vec<&str> = d.split(' ').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].ends_with(','));
        assert_eq!(parts[2].len(), 4);
    }
}
