use crate::directives::{strip_quotes, DirectiveTable};

/// Plain substring replacement of every directive key, in table order.
/// There is no token-boundary check: a key that occurs inside a longer
/// identifier is replaced there as well.
pub fn substitute_directives(text: &str, directives: &DirectiveTable) -> String {
    let mut output = text.to_string();
    for (key, value) in directives.iter() {
        if key.is_empty() {
            continue;
        }
        let value = strip_quotes(value);
        log::debug!("replacing all occurrences of {} with {}", key, value);
        output = output.replace(key, &value);
    }
    output
}
