//! CSS-like selectors evaluated against click paths.
//!
//! Supported: type (`a`), universal (`*`), id (`#hero`), class (`.cta`), attribute
//! presence and equality (`[href]`, `[type="submit"]`), compounds of those
//! (`form.signup`), the descendant combinator (`.nav a`) and selector lists (`a, button`).

use crate::error::BinderError;
use crate::page::Element;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

/// Compounds joined by descendant combinators, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex(Vec<Compound>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parses a selector list.
    ///
    /// # Errors
    /// [`BinderError::Selector`] for empty input, stray characters or unclosed brackets.
    pub fn parse(source: &str) -> Result<Self, BinderError> {
        let alternatives = split_outside_brackets(source, |c| c == ',')?
            .into_iter()
            .map(|part| parse_complex(part, source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { source: source.trim().to_owned(), alternatives })
    }

    /// Joins several selectors into one list.
    ///
    /// # Errors
    /// As [`Selector::parse`].
    pub fn any<I, S>(sources: I) -> Result<Self, BinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selector = Self { source: String::new(), alternatives: Vec::new() };
        for source in sources {
            let parsed = Self::parse(source.as_ref())?;
            if !selector.source.is_empty() {
                selector.source.push_str(", ");
            }
            selector.source.push_str(&parsed.source);
            selector.alternatives.extend(parsed.alternatives);
        }
        Ok(selector)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `path[0]` matches, with `path[1..]` as its ancestors (nearest first).
    #[must_use]
    pub fn matches(&self, path: &[Element]) -> bool {
        self.alternatives.iter().any(|complex| complex.matches(path))
    }

    /// Index of the first element on the path that matches, like `Element.closest`.
    #[must_use]
    pub fn closest(&self, path: &[Element]) -> Option<usize> {
        (0..path.len()).find(|&index| self.matches(&path[index..]))
    }
}

impl FromStr for Selector {
    type Err = BinderError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

impl Complex {
    fn matches(&self, path: &[Element]) -> bool {
        let Some((subject, ancestors)) = self.0.split_last() else {
            return false;
        };
        let Some((target, mut rest)) = path.split_first() else {
            return false;
        };
        if !subject.matches(target) {
            return false;
        }

        // Descendant combinators only, so taking the nearest matching ancestor is exact.
        for compound in ancestors.iter().rev() {
            match rest.iter().position(|element| compound.matches(element)) {
                Some(index) => rest = &rest[index + 1..],
                None => return false,
            }
        }
        true
    }
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        self.tag.as_ref().is_none_or(|tag| element.tag.eq_ignore_ascii_case(tag))
            && self.id.as_ref().is_none_or(|id| element.id.as_ref() == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
            && self.attributes.iter().all(|attr| match (&attr.value, element.attr(&attr.name)) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(expected), Some(actual)) => expected == actual,
            })
    }
}

fn parse_complex(part: &str, source: &str) -> Result<Complex, BinderError> {
    let compounds = split_outside_brackets(part, char::is_whitespace)?
        .into_iter()
        .map(|compound| parse_compound(compound, source))
        .collect::<Result<Vec<_>, _>>()?;

    if compounds.is_empty() {
        return Err(BinderError::selector("empty selector", source));
    }
    Ok(Complex(compounds))
}

fn parse_compound(input: &str, source: &str) -> Result<Compound, BinderError> {
    let mut compound = Compound::default();
    let mut rest = input;

    let tag = take_ident(&mut rest);
    if !tag.is_empty() {
        compound.tag = Some(tag.to_ascii_lowercase());
    } else if let Some(stripped) = rest.strip_prefix('*') {
        rest = stripped;
    }

    while let Some(marker) = rest.chars().next() {
        rest = &rest[marker.len_utf8()..];
        match marker {
            '#' => compound.id = Some(required_ident(&mut rest, source)?),
            '.' => compound.classes.push(required_ident(&mut rest, source)?),
            '[' => {
                let end = closing_bracket(rest)
                    .ok_or_else(|| BinderError::selector("unclosed `[`", source))?;
                compound.attributes.push(parse_attr(&rest[..end], source)?);
                rest = &rest[end + 1..];
            },
            other => {
                return Err(BinderError::selector(format!("unexpected `{other}`"), source));
            },
        }
    }

    Ok(compound)
}

/// Index of the `]` ending an attribute selector. Brackets inside quoted values don't count.
fn closing_bracket(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    rest.char_indices().find_map(|(index, c)| {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {},
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(index),
            _ => {},
        }
        None
    })
}

fn parse_attr(body: &str, source: &str) -> Result<AttrMatch, BinderError> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name.trim(), Some(unquote(value.trim()))),
        None => (body.trim(), None),
    };
    if name.is_empty() {
        return Err(BinderError::selector("attribute name missing", source));
    }
    Ok(AttrMatch { name: name.to_owned(), value: value.map(str::to_owned) })
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| value.strip_prefix(*quote).and_then(|v| v.strip_suffix(*quote)))
        .unwrap_or(value)
}

fn take_ident<'a>(rest: &mut &'a str) -> &'a str {
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    let (ident, tail) = rest.split_at(end);
    *rest = tail;
    ident
}

fn required_ident(rest: &mut &str, source: &str) -> Result<String, BinderError> {
    let ident = take_ident(rest);
    if ident.is_empty() {
        return Err(BinderError::selector("name expected after `#` or `.`", source));
    }
    Ok(ident.to_owned())
}

/// Splits on `sep`, ignoring separators inside `[...]` and quotes. Empty pieces are
/// dropped for whitespace splits and rejected for list splits.
fn split_outside_brackets(input: &str, sep: impl Fn(char) -> bool) -> Result<Vec<&str>, BinderError> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, c) in input.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {},
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && sep(c) => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            },
            _ => {},
        }
    }
    if quote.is_some() || depth > 0 {
        return Err(BinderError::selector("unbalanced brackets or quotes", input));
    }
    parts.push(&input[start..]);

    let trimmed: Vec<&str> = parts.into_iter().map(str::trim).collect();
    if sep(' ') {
        return Ok(trimmed.into_iter().filter(|part| !part.is_empty()).collect());
    }
    if trimmed.iter().any(|part| part.is_empty()) {
        return Err(BinderError::selector("empty selector", input));
    }
    Ok(trimmed)
}
