//! `{token}` substitution for event and dialogue text.

use std::collections::BTreeMap;

use crate::state::StateSnapshot;

/// Token values available to a template.
#[derive(Clone, Debug, Default)]
pub struct Tokens {
    values: BTreeMap<String, String>,
}

impl Tokens {
    /// Standard tokens derived from the state: `player`, `race`, `day`,
    /// `season`, `time`.
    pub fn from_snapshot(snapshot: StateSnapshot<'_>) -> Self {
        let mut tokens = Self::default();
        tokens
            .insert("player", snapshot.player_name())
            .insert("race", snapshot.race())
            .insert("day", snapshot.day().to_string())
            .insert("season", snapshot.season().to_string())
            .insert("time", snapshot.time_of_day().to_string());
        tokens
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Replaces `{name}` with the matching token. Unknown tokens and unmatched
/// braces are copied verbatim.
pub fn render(template: &str, tokens: &Tokens) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                match tokens.get(name) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Tokens {
        let mut tokens = Tokens::default();
        tokens.insert("player", "Wren").insert("npc", "the hermit");
        tokens
    }

    #[test]
    fn substitutes_known_tokens() {
        assert_eq!(
            render("{npc} nods at {player}.", &tokens()),
            "the hermit nods at Wren."
        );
    }

    #[test]
    fn leaves_unknown_tokens_and_stray_braces() {
        assert_eq!(render("{mystery} {", &tokens()), "{mystery} {");
        assert_eq!(render("a { {player}", &tokens()), "a { Wren");
        assert_eq!(render("no tokens", &tokens()), "no tokens");
    }
}
