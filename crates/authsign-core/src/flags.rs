//! Table-driven translation of option records into signtool arguments
//!
//! Every options type owns a static table of [`FlagSpec`] entries. Building
//! walks the table in declaration order and emits a flag for each field that
//! is set. Entries may carry nested entries that are only consulted when the
//! parent itself was emitted (e.g. `/dxml` under `/dg`).

use serde::Serialize;

use crate::operation::Operation;
use crate::target::Target;

/// Flag token carrying a secret value
const PASSWORD_FLAG: &str = "/p";

/// How many tokens a flag contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Flag token only
    Switch,
    /// Flag token followed by one value token
    Value,
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Switch => write!(f, "switch"),
            Self::Value => write!(f, "value"),
        }
    }
}

enum Reader<O: 'static> {
    Switch(fn(&O) -> bool),
    Value(fn(&O) -> Option<String>),
}

/// One row of a flag table: options field → flag token → arity
pub struct FlagSpec<O: 'static> {
    /// Options field name
    pub field: &'static str,
    /// Flag token passed to signtool
    pub token: &'static str,
    reader: Reader<O>,
    /// Entries emitted only when this one is
    pub nested: &'static [FlagSpec<O>],
}

impl<O: 'static> FlagSpec<O> {
    /// A flag with no value, emitted when `read` returns true
    pub const fn switch(field: &'static str, token: &'static str, read: fn(&O) -> bool) -> Self {
        Self {
            field,
            token,
            reader: Reader::Switch(read),
            nested: &[],
        }
    }

    /// A flag followed by a value, emitted when `read` returns `Some`
    pub const fn value(
        field: &'static str,
        token: &'static str,
        read: fn(&O) -> Option<String>,
    ) -> Self {
        Self {
            field,
            token,
            reader: Reader::Value(read),
            nested: &[],
        }
    }

    /// A valued flag whose `nested` entries depend on it being present
    pub const fn parent(
        field: &'static str,
        token: &'static str,
        read: fn(&O) -> Option<String>,
        nested: &'static [FlagSpec<O>],
    ) -> Self {
        Self {
            field,
            token,
            reader: Reader::Value(read),
            nested,
        }
    }

    /// Arity of this flag
    pub fn arity(&self) -> Arity {
        match self.reader {
            Reader::Switch(_) => Arity::Switch,
            Reader::Value(_) => Arity::Value,
        }
    }

    /// Push this flag's tokens if the field is set. Returns whether anything was emitted.
    fn emit(&self, options: &O, args: &mut Vec<String>) -> bool {
        match self.reader {
            Reader::Switch(read) => {
                if !read(options) {
                    return false;
                }
                args.push(self.token.to_string());
            }
            Reader::Value(read) => {
                let Some(value) = read(options) else {
                    return false;
                };
                args.push(self.token.to_string());
                args.push(value);
            }
        }
        true
    }
}

impl<O: 'static> std::fmt::Debug for FlagSpec<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSpec")
            .field("field", &self.field)
            .field("token", &self.token)
            .field("arity", &self.arity())
            .field("nested", &self.nested)
            .finish()
    }
}

/// Flattened, printable view of a table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagRow {
    pub field: &'static str,
    pub token: &'static str,
    pub arity: Arity,
    /// Field this entry depends on, if nested
    pub parent: Option<&'static str>,
}

/// An options record with a fixed field → flag table
pub trait FlagTable: Sized + 'static {
    /// Operation these options belong to
    const OPERATION: Operation;

    /// The table, in emission order
    fn table() -> &'static [FlagSpec<Self>];

    /// Flattened rows, depth-first in emission order
    fn rows() -> Vec<FlagRow> {
        let mut rows = Vec::new();
        collect_rows(Self::table(), None, &mut rows);
        rows
    }
}

fn collect_rows<O>(
    table: &'static [FlagSpec<O>],
    parent: Option<&'static str>,
    rows: &mut Vec<FlagRow>,
) {
    for spec in table {
        rows.push(FlagRow {
            field: spec.field,
            token: spec.token,
            arity: spec.arity(),
            parent,
        });
        collect_rows(spec.nested, Some(spec.field), rows);
    }
}

fn emit_table<O>(table: &'static [FlagSpec<O>], options: &O, args: &mut Vec<String>) {
    for spec in table {
        if spec.emit(options, args) {
            emit_table(spec.nested, options, args);
        }
    }
}

/// Build the full argument list: operation token, flags, then targets.
pub fn build_args<O: FlagTable>(options: &O, target: &Target) -> Vec<String> {
    let mut args = vec![O::OPERATION.token().to_string()];
    emit_table(O::table(), options, &mut args);
    args.extend(target.tokens());
    args
}

/// Copy of `args` with the value after `/p` masked, for logging.
pub fn redacted(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            out.push("****".to_string());
            mask_next = false;
            continue;
        }
        mask_next = arg == PASSWORD_FLAG;
        out.push(arg.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        on: bool,
        name: Option<String>,
        child: bool,
    }

    static PROBE_FLAGS: &[FlagSpec<Probe>] = &[
        FlagSpec::switch("on", "/on", |o: &Probe| o.on),
        FlagSpec::parent("name", "/n", |o: &Probe| o.name.clone(), PROBE_NAME_FLAGS),
    ];

    const PROBE_NAME_FLAGS: &[FlagSpec<Probe>] =
        &[FlagSpec::switch("child", "/c", |o: &Probe| o.child)];

    impl FlagTable for Probe {
        const OPERATION: Operation = Operation::Catdb;

        fn table() -> &'static [FlagSpec<Self>] {
            PROBE_FLAGS
        }
    }

    #[test]
    fn test_empty_options_emit_only_operation_and_target() {
        let args = build_args(&Probe::default(), &Target::from("x.cat"));
        assert_eq!(args, vec!["catdb", "x.cat"]);
    }

    #[test]
    fn test_nested_requires_parent() {
        let probe = Probe {
            child: true,
            ..Default::default()
        };
        let args = build_args(&probe, &Target::from("x.cat"));
        assert_eq!(args, vec!["catdb", "x.cat"]);

        let probe = Probe {
            name: Some("n".to_string()),
            child: true,
            ..Default::default()
        };
        let args = build_args(&probe, &Target::from("x.cat"));
        assert_eq!(args, vec!["catdb", "/n", "n", "/c", "x.cat"]);
    }

    #[test]
    fn test_rows_flatten_nested() {
        let rows = Probe::rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].field, "child");
        assert_eq!(rows[2].parent, Some("name"));
        assert_eq!(rows[0].arity, Arity::Switch);
        assert_eq!(rows[1].arity, Arity::Value);
    }

    #[test]
    fn test_redacted_masks_password_value() {
        let args: Vec<String> = ["sign", "/f", "cert.pfx", "/p", "hunter2", "a.exe"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let masked = redacted(&args);
        assert_eq!(masked, vec!["sign", "/f", "cert.pfx", "/p", "****", "a.exe"]);
    }
}
