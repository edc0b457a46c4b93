//! Parsing of path strings such as `//orgVdcs[value.get('id') == 'x']/name`.
use crate::error::XpathError;
use std::fmt;
use std::str::FromStr;

/// How a segment is searched for relative to the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `/field`: direct fields only.
    Child,
    /// `//field`: anywhere in the subtree.
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `field[3]`. `None` when the brackets look numeric but are not a valid
    /// position, such as `[-1]` or `[2x]`; those never resolve.
    Index(Option<usize>),
    /// `field[expression]`, stored verbatim.
    Filter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub field: String,
    pub selector: Option<Selector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub relation: Relation,
    pub segment: Segment,
}

/// A parsed path: one or more steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Parses a path string into its steps.
pub fn parse(path: &str) -> Result<Path, XpathError> {
    let mut steps = Vec::new();
    let mut rest = path;

    loop {
        if rest.is_empty() || rest == "/" || rest == "//" {
            return Err(XpathError::invalid_path(
                path,
                format!("nothing to select in '{}'", rest),
            ));
        }

        let (relation, body) = if let Some(body) = rest.strip_prefix("//") {
            (Relation::Descendant, body)
        } else if let Some(body) = rest.strip_prefix('/') {
            (Relation::Child, body)
        } else {
            (Relation::Child, rest)
        };

        let (head, tail) = split_head(body);
        if !head.is_empty() {
            steps.push(Step {
                relation,
                segment: parse_segment(path, head)?,
            });
        }

        match tail {
            Some(tail) => rest = tail,
            None => break,
        }
    }

    log::debug!("Parsed path '{}' into {} step(s)", path, steps.len());
    Ok(Path { steps })
}

/// Splits at the first `/` outside brackets and quoted strings. The tail keeps its `/`.
fn split_head(body: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '\'' | '"' if depth > 0 => quote = Some(c),
            '/' if depth == 0 => return (&body[..i], Some(&body[i..])),
            _ => {}
        }
    }
    (body, None)
}

fn parse_segment(path: &str, text: &str) -> Result<Segment, XpathError> {
    let Some(open) = text.find('[') else {
        if text.contains(']') {
            return Err(XpathError::invalid_path(path, format!("unbalanced ']' in '{}'", text)));
        }
        return Ok(Segment {
            field: text.to_string(),
            selector: None,
        });
    };

    if !text.ends_with(']') {
        return Err(XpathError::invalid_path(
            path,
            format!("segment '{}' must end with ']'", text),
        ));
    }
    let field = &text[..open];
    if field.is_empty() {
        return Err(XpathError::invalid_path(
            path,
            format!("missing field name before '[' in '{}'", text),
        ));
    }
    let inner = &text[open + 1..text.len() - 1];
    if inner.trim().is_empty() {
        return Err(XpathError::invalid_path(path, format!("empty brackets in '{}'", text)));
    }

    Ok(Segment {
        field: field.to_string(),
        selector: Some(parse_selector(inner)),
    })
}

fn parse_selector(inner: &str) -> Selector {
    let trimmed = inner.trim();
    let mut chars = trimmed.chars();
    let numeric = match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    };

    if numeric {
        Selector::Index(trimmed.parse().ok())
    } else {
        Selector::Filter(inner.to_string())
    }
}

impl FromStr for Path {
    type Err = XpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Child => "/",
            Relation::Descendant => "//",
        })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field)?;
        match &self.selector {
            None => Ok(()),
            Some(Selector::Index(Some(i))) => write!(f, "[{}]", i),
            // Any negative position parses back to an unresolvable index.
            Some(Selector::Index(None)) => f.write_str("[-1]"),
            Some(Selector::Filter(expression)) => write!(f, "[{}]", expression),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.steps
            .iter()
            .try_for_each(|step| write!(f, "{}{}", step.relation, step.segment))
    }
}
