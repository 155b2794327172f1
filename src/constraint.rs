use std::cmp::Ordering;
use std::fmt;

use crate::version::VersionString;

/// Comparison operators accepted at the front of a constraint string.
///
/// `~` and `^` are deliberately treated as plain lower bounds rather than
/// semver-style range operators; resolution picks the smallest installed
/// version at or above the target either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
    Tilde,
    Caret,
}

/// Two-character symbols come first so `>=` is never read as `>` + `=`.
const SYMBOLS: [(&str, Op); 7] = [
    (">=", Op::Ge),
    ("<=", Op::Le),
    (">", Op::Gt),
    ("<", Op::Lt),
    ("=", Op::Eq),
    ("~", Op::Tilde),
    ("^", Op::Caret),
];

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Eq => "=",
            Op::Tilde => "~",
            Op::Caret => "^",
        }
    }

    /// Whether `candidate` satisfies this operator against `target`.
    pub fn matches(self, candidate: &VersionString, target: &VersionString) -> bool {
        let ord = candidate.cmp(target);
        match self {
            Op::Ge | Op::Tilde | Op::Caret => ord != Ordering::Less,
            Op::Le => ord != Ordering::Greater,
            Op::Gt => ord == Ordering::Greater,
            Op::Lt => ord == Ordering::Less,
            Op::Eq => ord == Ordering::Equal,
        }
    }
}

/// An operator plus the bare version it applies to, e.g. `>=` and `7.2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Op,
    pub target: VersionString,
}

impl Constraint {
    /// Split a raw constraint like `>=7.2` into operator and bare version.
    ///
    /// A string with no recognized leading symbol is an implicit exact
    /// match, so parsing never fails.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        for (symbol, op) in SYMBOLS {
            if let Some(rest) = raw.strip_prefix(symbol) {
                return Self {
                    op,
                    target: VersionString::new(rest.trim()),
                };
            }
        }
        Self {
            op: Op::Eq,
            target: VersionString::new(raw),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.target)
    }
}

/// Strip any leading operator characters, leaving the bare version text.
pub fn strip_operator(raw: &str) -> &str {
    raw.trim().trim_start_matches(['>', '<', '=', '~', '^'])
}
