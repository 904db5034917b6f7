//! Directives recognised ahead of the dialogue engine.
//!
//! Full names work with or without a leading `/`. Short aliases need the
//! slash so that a function called `start` can still be captured.

/// A command dispatched directly instead of being fed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `begin-integration <platform-token>`; the token may be empty.
    BeginIntegration { token: String },
    /// `inspect-workspace`.
    InspectWorkspace,
    /// `wrap-function <name>`; the name may be empty.
    WrapFunction { name: String },
}

impl Directive {
    /// Parses a directive from one inbound message.
    pub fn parse(text: &str) -> Option<Directive> {
        let text = text.trim();
        let (slashed, body) = match text.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (command, rest) = match body.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (body, ""),
        };

        match (command.to_ascii_lowercase().as_str(), slashed) {
            ("begin-integration", _) | ("start", true) => Some(Directive::BeginIntegration {
                token: rest.to_string(),
            }),
            ("inspect-workspace", _) | ("inspect", true) => Some(Directive::InspectWorkspace),
            ("wrap-function", _) | ("wrap", true) => Some(Directive::WrapFunction {
                name: rest.to_string(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_begin_integration_with_token() {
        assert_eq!(
            Directive::parse("begin-integration posix"),
            Some(Directive::BeginIntegration {
                token: "posix".to_string()
            })
        );
    }

    #[test]
    fn parses_begin_integration_without_token() {
        assert_eq!(
            Directive::parse("/begin-integration"),
            Some(Directive::BeginIntegration {
                token: String::new()
            })
        );
    }

    #[test]
    fn short_aliases_need_a_slash() {
        assert_eq!(
            Directive::parse("/start autosar"),
            Some(Directive::BeginIntegration {
                token: "autosar".to_string()
            })
        );
        assert_eq!(Directive::parse("start"), None);
        assert_eq!(Directive::parse("/inspect"), Some(Directive::InspectWorkspace));
        assert_eq!(Directive::parse("inspect"), None);
    }

    #[test]
    fn parses_wrap_function_name() {
        assert_eq!(
            Directive::parse("wrap-function   ShmM_MapOwner  "),
            Some(Directive::WrapFunction {
                name: "ShmM_MapOwner".to_string()
            })
        );
        assert_eq!(
            Directive::parse("/wrap"),
            Some(Directive::WrapFunction {
                name: String::new()
            })
        );
    }

    #[test]
    fn free_text_is_not_a_directive() {
        assert_eq!(Directive::parse("ShmM_MapOwner"), None);
        assert_eq!(Directive::parse(""), None);
        assert_eq!(Directive::parse("none"), None);
    }
}
