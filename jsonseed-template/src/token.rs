//! Recognition and resolution of a single placeholder token.
//!
//! Recognition runs on a trimmed, lower-cased copy of the string; anything
//! spliced back into the output is taken from the original text, so the
//! case of property names and surrounding text survives.

use crate::{Entropy, TemplateError, TemplateResult};
use jsonseed_types::{Object, SeedValue};
use std::ops::Range;

const RAND_BETWEEN: &str = "$randbetween";
const RAND_BETWEEN_OPEN: &str = "$randbetween(";
const NOW: &str = "$now";
const UTC_NOW: &str = "$utcnow";
const PROP: &str = "$prop";

/// What a string value turned out to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Blank, or no `$` anywhere: kept as-is.
    Literal,
    RandBetween { min: i64, max: i64 },
    Now,
    UtcNow,
    /// `span` is the byte range of `$prop(name)` in the original string.
    PropRef { name: String, span: Range<usize> },
    /// Contains `$` but matches none of the above.
    Unrecognized,
}

/// Classifies a string value.
///
/// Precedence follows the token table: a trimmed string starting with
/// `$randbetween` is always a `RandBetween` (or an error), then the exact
/// `$now` / `$utcnow` keywords, then the first `$prop(..)` anywhere. A
/// `$prop` marker without a parenthesised name is `Unrecognized`.
pub fn recognize(text: &str) -> TemplateResult<Token> {
    if text.trim().is_empty() || !text.contains('$') {
        return Ok(Token::Literal);
    }

    let lowered = text.trim().to_lowercase();
    if lowered.starts_with(RAND_BETWEEN) {
        return parse_rand_between(text, &lowered);
    }
    if lowered == NOW {
        return Ok(Token::Now);
    }
    if lowered == UTC_NOW {
        return Ok(Token::UtcNow);
    }
    if lowered.contains(PROP) {
        return parse_prop_ref(text);
    }
    Ok(Token::Unrecognized)
}

fn parse_rand_between(text: &str, lowered: &str) -> TemplateResult<Token> {
    let args = lowered.replace(RAND_BETWEEN_OPEN, "").replace(')', "");
    let parts: Vec<&str> = args.split(';').collect();
    let [min, max] = parts.as_slice() else {
        return Err(TemplateError::token_syntax(
            text,
            format!("expected `min;max`, found {} argument(s)", parts.len()),
        ));
    };

    let min = parse_bound(text, min)?;
    let max = parse_bound(text, max)?;
    if min > max {
        return Err(TemplateError::token_syntax(
            text,
            format!("lower bound {min} exceeds upper bound {max}"),
        ));
    }
    Ok(Token::RandBetween { min, max })
}

fn parse_bound(text: &str, raw: &str) -> TemplateResult<i64> {
    raw.trim().parse::<i64>().map_err(|e| {
        TemplateError::token_syntax(text, format!("bound {:?} is not an integer: {e}", raw.trim()))
    })
}

fn parse_prop_ref(text: &str) -> TemplateResult<Token> {
    // ASCII lowering keeps byte offsets aligned with `text`.
    let Some(start) = text.to_ascii_lowercase().find(PROP) else {
        return Ok(Token::Unrecognized);
    };
    let open = start + PROP.len();
    if !text[open..].starts_with('(') {
        return Ok(Token::Unrecognized);
    }
    let Some(close) = text[open..].find(')').map(|i| open + i) else {
        return Ok(Token::Unrecognized);
    };

    Ok(Token::PropRef {
        name: text[open + 1..close].to_string(),
        span: start..close + 1,
    })
}

/// Resolves one value against the object it belongs to.
///
/// `original` is the object as declared; `partial` holds the members already
/// resolved in this pass. A `$prop` lookup tries `partial` first, so a
/// reference to an earlier key sees its resolved value and a reference to a
/// later key sees its declared one.
///
/// Non-string values are returned unchanged. Containers are never
/// tokenized here; the expander descends into them itself.
pub fn resolve_value<E: Entropy + ?Sized>(
    value: &SeedValue,
    original: &Object,
    partial: &Object,
    entropy: &mut E,
) -> TemplateResult<SeedValue> {
    let SeedValue::String(text) = value else {
        return Ok(value.clone());
    };

    let resolved = match recognize(text)? {
        Token::Literal => value.clone(),
        Token::RandBetween { min, max } => SeedValue::integer(entropy.rand_between(min, max)),
        Token::Now => SeedValue::Timestamp(entropy.now()),
        Token::UtcNow => SeedValue::Timestamp(entropy.utc_now()),
        Token::PropRef { name, span } => {
            let replacement = partial
                .get(&name)
                .or_else(|| original.get(&name))
                .unwrap_or(&SeedValue::Null)
                .to_prop_text();
            let mut out = String::with_capacity(text.len() + replacement.len());
            out.push_str(&text[..span.start]);
            out.push_str(&replacement);
            out.push_str(&text[span.end..]);
            SeedValue::String(out)
        }
        Token::Unrecognized => resolve_unrecognized(text),
    };
    Ok(resolved)
}

/// A string with a `$` that matches no token resolves to null and its text
/// is dropped. Existing payloads depend on this.
// TODO: return the text unchanged once stray-`$` payloads are confirmed unused.
fn resolve_unrecognized(_text: &str) -> SeedValue {
    SeedValue::Null
}
