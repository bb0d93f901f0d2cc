use crate::RuleValue;

use super::Environment;

const TYPE_TAGS: &[&str] = &[
    "int",
    "float",
    "bool",
    "str",
    "list",
    "map",
    "null_type",
    "timestamp",
    "duration",
];

/// Binds the type tags rules compare against with `isinstance`. They live
/// in the data bindings, so a context entry of the same name shadows them.
pub fn load_type_tags(env: &mut Environment) {
    for tag in TYPE_TAGS {
        env.bind_param(tag, RuleValue::from_type(tag));
    }
}
