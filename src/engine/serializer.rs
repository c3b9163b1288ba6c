//! Rule serializer: the inverse of the parser.
//!
//! Keywords come out in the canonical table order, so serializing a parsed line
//! normalizes keyword order and whitespace. A `:` is written before the name
//! whenever the parser would otherwise misread the name as keywords or sigils,
//! and also when the name is empty and no noun was written, so that the parser
//! does not fill in the default "items" noun.

use super::parser::is_foreign_line;
use crate::keywords::{self, KEYWORDS, Slot};
use crate::flags::Flag;
use crate::{Action, Rule};

/// Canonical source line for `rule`.
pub fn serialize_rule(rule: &Rule) -> String {
    let mut line = String::new();

    if !rule.action.contains(Action::DISPLAY) {
        line.push('(');
    }
    match rule.action.policy() {
        Action::QUERY => line.push(';'),
        Action::DESTROY => line.push('!'),
        Action::LEAVE => line.push('~'),
        _ => {}
    }

    let mut words: Vec<String> = Vec::new();
    let mut has_noun = false;
    for keyword in KEYWORDS.iter().filter(|k| rule.flags.contains(k.flag)) {
        match keyword.slot {
            Slot::Threshold(suffix) => {
                let value = if keyword.flag == Flag::MoreDice { rule.dice } else { rule.bonus };
                words.push(format!("{} {value}{suffix}", keyword.text));
            }
            Slot::PreNoun | Slot::Noun => {
                has_noun = true;
                words.push(keyword.text.to_string());
            }
            Slot::Adjective => words.push(keyword.text.to_string()),
        }
    }
    line.push_str(&words.join(" "));

    let name = rule.name.as_str();
    if has_noun {
        if !name.is_empty() {
            line.push(':');
            line.push_str(name);
        }
    } else if name.is_empty() || needs_separator(name) {
        line.push(':');
        line.push_str(name);
    } else {
        if !words.is_empty() {
            line.push(' ');
        }
        line.push_str(name);
    }

    if let Some(inscription) = &rule.inscription {
        line.push('#');
        line.push_str(inscription);
    }
    line
}

/// True when `name` written bare would be read back as something else.
fn needs_separator(name: &str) -> bool {
    keywords::starts_with_keyword(name) || name.starts_with(['!', '~', ';', '(', ':']) || is_foreign_line(name)
}
