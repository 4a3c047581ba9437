//! Localized text lookup
//!
//! Message keys map to templates with `%(name)s` named substitutions.
//! Unknown keys fall back to the key itself, so a missing translation
//! degrades to something debuggable rather than panicking.

use std::collections::HashMap;

/// A message-key catalog
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<&'static str, &'static str>,
}

impl MessageCatalog {
    /// The built-in English catalog
    pub fn english() -> Self {
        let messages = HashMap::from([
            ("failed_to_invite", "Failed to invite"),
            (
                "failed_to_invite_users_to_room",
                "Failed to invite the following users to %(room)s:",
            ),
            ("operation_failed", "Operation failed"),
            ("start_chat_title", "Start a chat"),
            (
                "start_chat_description",
                "Who would you like to communicate with?",
            ),
            ("start_chat_button", "Start Chat"),
            ("invite_room_title", "Invite new room members"),
            (
                "invite_room_description",
                "Who would you like to add to this room?",
            ),
            ("invite_room_button", "Send Invites"),
        ]);
        Self { messages }
    }

    /// Replace or add a message template
    pub fn set(&mut self, key: &'static str, template: &'static str) {
        self.messages.insert(key, template);
    }

    /// Look up a template; unknown keys fall back to the key
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).copied().unwrap_or(key)
    }

    /// Render a template, substituting every `%(name)s` occurrence
    pub fn render(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut out = self.lookup(key).to_string();
        for (name, value) in args {
            out = out.replace(&format!("%({name})s"), value);
        }
        out
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_named_substitutions() {
        let catalog = MessageCatalog::english();
        assert_eq!(
            catalog.render("failed_to_invite_users_to_room", &[("room", "!r1")]),
            "Failed to invite the following users to !r1:"
        );
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let catalog = MessageCatalog::english();
        assert_eq!(catalog.lookup("no_such_key"), "no_such_key");
        assert_eq!(catalog.render("no_such_key", &[]), "no_such_key");
    }

    #[test]
    fn set_overrides_template() {
        let mut catalog = MessageCatalog::english();
        catalog.set("failed_to_invite", "Einladung fehlgeschlagen");
        assert_eq!(catalog.lookup("failed_to_invite"), "Einladung fehlgeschlagen");
    }
}
