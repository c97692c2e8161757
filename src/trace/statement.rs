use std::fmt;

use crate::value::handle::ResourceKind;
use crate::value::typed::ElementType;

/// Symbolic reference to a handle in the exported script: `<kind>s[<index>]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolicRef {
    /// Kind list the handle lives in.
    pub kind: ResourceKind,
    /// Position within that list.
    pub index: usize,
}

impl fmt::Display for SymbolicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s[{}]", self.kind.type_name(), self.index)
    }
}

/// Script expression standing in for one argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Pre-rendered JSON literal.
    Literal(String),
    /// `null`
    Null,
    /// `(new Int8Array([..])).buffer`
    ByteBuffer(Vec<i8>),
    /// `new <Type>([..])`
    TypedArray {
        /// View constructor.
        element_type: ElementType,
        /// Elements as numbers.
        elements: Vec<f64>,
    },
    /// Local bound by an earlier statement (image loads).
    Local(String),
    /// Tracked handle.
    Symbol(SymbolicRef),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(text) => f.write_str(text),
            Expr::Null => f.write_str("null"),
            Expr::ByteBuffer(bytes) => {
                f.write_str("(new Int8Array([")?;
                write_joined(f, bytes.iter().map(|b| b.to_string()))?;
                f.write_str("])).buffer")
            }
            Expr::TypedArray {
                element_type,
                elements,
            } => {
                write!(f, "new {element_type}([")?;
                write_joined(f, elements.iter().map(|&x| js_number(x)))?;
                f.write_str("])")
            }
            Expr::Local(name) => f.write_str(name),
            Expr::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = String>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        f.write_str(&item)?;
    }
    Ok(())
}

/// Format a number the way the host's `Number.prototype.toString` does.
pub(crate) fn js_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let magnitude = x.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{x:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    x.to_string()
}

/// One line of the recorded trace.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `gl.canvas.width = <w>;`
    SetCanvasWidth(u32),
    /// `gl.canvas.height = <h>;`
    SetCanvasHeight(u32),
    /// `yield;` marks that at least one frame was presented.
    Yield,
    /// Awaited image load bound to a local.
    LoadImage {
        /// Local the loaded image is bound to.
        binding: String,
        /// Image URL (possibly a data URL).
        src: String,
    },
    /// `[<target> = ]gl.<method>(<args>);`
    Call {
        /// Handle slot receiving the result, if the result is a tracked handle.
        target: Option<SymbolicRef>,
        /// Context method name.
        method: String,
        /// Encoded arguments.
        args: Vec<Expr>,
    },
}

impl Statement {
    /// Whether replaying this statement suspends the script.
    pub fn is_suspension(&self) -> bool {
        matches!(self, Statement::Yield | Statement::LoadImage { .. })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::SetCanvasWidth(w) => write!(f, "gl.canvas.width = {w};"),
            Statement::SetCanvasHeight(h) => write!(f, "gl.canvas.height = {h};"),
            Statement::Yield => f.write_str("yield;"),
            Statement::LoadImage { binding, src } => write!(
                f,
                "var {binding} = await new Promise(function(resolve) {{ let i = new Image(); \
                 i.onload = function() {{ resolve(this); }}; i.src = '{}'; }});",
                escape_single_quoted(src)
            ),
            Statement::Call {
                target,
                method,
                args,
            } => {
                if let Some(target) = target {
                    write!(f, "{target} = ")?;
                }
                write!(f, "gl.{method}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(");")
            }
        }
    }
}

fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Ordered, append-only list of recorded statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    statements: Vec<Statement>,
}

impl Trace {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement.
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Recorded statements in order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements rendered to text, unindented.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.statements.iter().map(|s| s.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/statement.rs"]
mod tests;
