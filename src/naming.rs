use std::path::Path;
use std::str::FromStr;

use crate::foundation::error::{GlitchError, GlitchResult};

/// Template used when no `--fmt` is given.
pub const DEFAULT_TEMPLATE: &str = "{basename}_{copy:08}.png";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Basename,
    Input,
    Ext,
    Index,
    Copy,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "basename" => Field::Basename,
            "input" => Field::Input,
            "ext" => Field::Ext,
            "index" => Field::Index,
            "copy" => Field::Copy,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Literal(String),
    Field { field: Field, width: usize },
}

/// Values substituted into an [`OutputName`].
#[derive(Clone, Copy, Debug)]
pub struct NameContext<'a> {
    pub input: &'a Path,
    /// Position of the input on the command line.
    pub index: usize,
    /// Copy number for this input.
    pub copy: usize,
}

/// Parsed output file name template.
///
/// Placeholders: `{basename}` (input file name without extension), `{input}` (input file name),
/// `{ext}` (input extension without the dot), `{index}`, `{copy}`. Numeric fields accept a
/// zero-padded width such as `{copy:08}`. `{{` and `}}` produce literal braces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputName {
    parts: Vec<Part>,
}

impl OutputName {
    pub fn parse(template: &str) -> GlitchResult<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => body.push(c),
                            None => {
                                return Err(GlitchError::configuration(format!(
                                    "unclosed placeholder in name template: {template}"
                                )));
                            }
                        }
                    }
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(parse_field(&body)?);
                }
                '}' => {
                    return Err(GlitchError::configuration(format!(
                        "unmatched '}}' in name template: {template}"
                    )));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    pub fn render(&self, ctx: &NameContext<'_>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(s) => out.push_str(s),
                Part::Field { field, width } => match field {
                    Field::Basename => out.push_str(&os_str(ctx.input.file_stem())),
                    Field::Input => out.push_str(&os_str(ctx.input.file_name())),
                    Field::Ext => out.push_str(&os_str(ctx.input.extension())),
                    Field::Index => out.push_str(&format!("{:0width$}", ctx.index)),
                    Field::Copy => out.push_str(&format!("{:0width$}", ctx.copy)),
                },
            }
        }
        out
    }
}

impl Default for OutputName {
    fn default() -> Self {
        Self {
            parts: vec![
                Part::Field {
                    field: Field::Basename,
                    width: 0,
                },
                Part::Literal("_".to_string()),
                Part::Field {
                    field: Field::Copy,
                    width: 8,
                },
                Part::Literal(".png".to_string()),
            ],
        }
    }
}

impl FromStr for OutputName {
    type Err = GlitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_field(body: &str) -> GlitchResult<Part> {
    let (name, width) = match body.split_once(':') {
        Some((name, width)) => (name, Some(width)),
        None => (body, None),
    };
    let field = Field::parse(name.trim()).ok_or_else(|| {
        GlitchError::configuration(format!("unknown placeholder in name template: {{{body}}}"))
    })?;
    let width = match width {
        None => 0,
        Some(_) if !matches!(field, Field::Index | Field::Copy) => {
            return Err(GlitchError::configuration(format!(
                "placeholder {{{body}}} takes no width"
            )));
        }
        Some(w) => w.parse::<usize>().map_err(|_| {
            GlitchError::configuration(format!("bad width in name template: {{{body}}}"))
        })?,
    };
    Ok(Part::Field { field, width })
}

fn os_str(s: Option<&std::ffi::OsStr>) -> std::borrow::Cow<'_, str> {
    s.map(|s| s.to_string_lossy()).unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/unit/naming.rs"]
mod tests;
