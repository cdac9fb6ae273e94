//! `{{identifier}}` substitution.

use {regex::Regex, tracing::trace};

use crate::{Error, Result, state::WizardState};

/// Text substituted for fields the state does not have.
pub const UNDEFINED: &str = "undefined";

const TOKEN_PATTERN: &str = r"\{\{(\w+)\}\}";

/// Replaces every `{{identifier}}` with the matching wizard field.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    token: Regex,
    strict: bool,
}

impl TemplateRenderer {
    /// With `strict`, unknown or unset fields fail rendering instead of
    /// producing [`UNDEFINED`].
    pub fn new(strict: bool) -> Result<Self> {
        let token = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::message(format!("invalid token pattern: {e}")))?;
        Ok(Self { token, strict })
    }

    pub fn render(&self, template: &str, state: &WizardState) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        for caps in self.token.captures_iter(template) {
            let (Some(whole), Some(ident)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);
            match state.field(ident.as_str()) {
                Some(value) => out.push_str(&value),
                None if self.strict => {
                    return Err(Error::UnknownToken {
                        token: ident.as_str().to_string(),
                    });
                },
                None => {
                    trace!(token = ident.as_str(), "unresolved template token");
                    out.push_str(UNDEFINED);
                },
            }
            last = whole.end();
        }
        out.push_str(&template[last..]);
        Ok(out)
    }
}
