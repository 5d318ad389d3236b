//! Reason types
//!
//! A reason type is one row of a catalog: a stable key, the level every
//! finding of that type carries, the source that owns it and a message
//! template with `{0}`, `{1}`, ... placeholders.

use super::Level;

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ReasonType {
    pub source: &'static str,
    pub key: &'static str,
    pub level: Level,
    pub template: &'static str,
}

impl ReasonType {
    pub const fn new(
        source: &'static str,
        key: &'static str,
        level: Level,
        template: &'static str,
    ) -> Self {
        Self {
            source,
            key,
            level,
            template,
        }
    }

    /// Substitute positional arguments into the template.
    ///
    /// Placeholders without a matching argument are left as they are.
    pub fn format(&self, args: &[String]) -> String {
        let template = self.template;
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let digits = after.bytes().take_while(|b| b.is_ascii_digit()).count();

            if digits > 0 && after[digits..].starts_with('}') {
                let placeholder = &rest[open..open + digits + 2];
                match after[..digits].parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str(placeholder),
                }
                rest = &after[digits + 1..];
            } else {
                out.push('{');
                rest = after;
            }
        }

        out.push_str(rest);
        out
    }
}
