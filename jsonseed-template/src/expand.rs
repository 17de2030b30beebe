//! Tree expansion: resolves every token in a value tree.

use crate::token::resolve_value;
use crate::{Entropy, TemplateResult};
use jsonseed_types::{Object, SeedValue};

/// Builds a fully resolved copy of `value`. The input is only read.
///
/// Object members are resolved in declaration order. Each scalar member is
/// handed to [`resolve_value`] together with its declaring object and the
/// members resolved so far, so `$prop` sees earlier siblings resolved and
/// later siblings as declared. Array and object members are expanded
/// recursively, each nested object forming its own `$prop` scope.
///
/// Scalars outside any object (array elements, or a scalar top level) are
/// resolved with an empty scope.
pub fn expand<E: Entropy + ?Sized>(value: &SeedValue, entropy: &mut E) -> TemplateResult<SeedValue> {
    match value {
        SeedValue::Array(items) => items
            .iter()
            .map(|item| expand(item, entropy))
            .collect::<TemplateResult<Vec<_>>>()
            .map(SeedValue::Array),
        SeedValue::Object(members) => expand_object(members, entropy).map(SeedValue::Object),
        scalar => {
            let empty = Object::new();
            resolve_value(scalar, &empty, &empty, entropy)
        }
    }
}

fn expand_object<E: Entropy + ?Sized>(members: &Object, entropy: &mut E) -> TemplateResult<Object> {
    let mut resolved = Object::with_capacity(members.len());
    for (key, value) in members {
        let value = match value {
            SeedValue::Array(_) | SeedValue::Object(_) => expand(value, entropy)?,
            scalar => resolve_value(scalar, members, &resolved, entropy)?,
        };
        resolved.insert(key.clone(), value);
    }
    Ok(resolved)
}
