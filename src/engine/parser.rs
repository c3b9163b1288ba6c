//! Rule-line parser.
//!
//! A rule line is read in four phases:
//!
//! ```text
//! (0) sigils        "!" "~" ";" pick the policy (first one wins), "(" hides from the map
//! (1) inscription   everything after the first '#', kept raw
//! (2) keywords      longest adjective/threshold match, repeated until none fits
//! (3) noun          optional "artifact", then at most one category noun
//! (4) name          ':' starts the name; unrecognised text rolls the last
//!                   tentative flag back and becomes the name
//! ```
//!
//! Lines that belong to another pref-file sub-language (`?:`, `%:`, `A:`, `P:`,
//! `C:`) are never rules.

use crate::flags::{Flag, FlagSet};
use crate::keywords::{self, KEY_ARTIFACT, Slot};
use crate::{Action, Rule};

/// First characters of the two-character prefixes owned by other sub-languages.
const FOREIGN_MARKERS: &[u8] = b"?%APC";

/// True when the line starts with a conditional, include, macro or keymap marker.
pub fn is_foreign_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 2 && bytes[1] == b':' && FOREIGN_MARKERS.contains(&bytes[0])
}

/// Parse one rule line.
///
/// Returns `None` for foreign lines, for an empty body when `allow_empty` is
/// false, and for an empty body carrying an inscription.
pub fn parse_rule(line: &str, allow_empty: bool) -> Option<Rule> {
    if is_foreign_line(line) {
        tracing::trace!(line, "foreign line, not a rule");
        return None;
    }

    let (action, rest) = strip_sigils(line);
    let (body, inscription) = match rest.split_once('#') {
        Some((body, inscription)) => (body, Some(inscription.to_string())),
        None => (rest, None),
    };

    let buffer = body.to_ascii_lowercase();
    if buffer.is_empty() && (!allow_empty || inscription.is_some()) {
        tracing::trace!(line, "empty rule body rejected");
        return None;
    }

    let mut rule = Rule { action, inscription, ..Rule::default() };
    let rest = parse_keywords(&buffer, &mut rule);
    let name = parse_noun(rest, &mut rule.flags);
    rule.name = name.to_string();

    tracing::trace!(line, ?rule, "parsed rule");
    Some(rule)
}

fn strip_sigils(line: &str) -> (Action, &str) {
    let mut action = Action::default();
    let mut rest = line;
    loop {
        let picking = action.contains(Action::PICKUP);
        match rest.as_bytes().first() {
            Some(b'!') if picking => action.set_policy(Action::DESTROY),
            Some(b'~') if picking => action.set_policy(Action::LEAVE),
            Some(b';') if picking => action.set_policy(Action::QUERY),
            Some(b'(') if action.contains(Action::DISPLAY) => action.remove(Action::DISPLAY),
            _ => break,
        }
        rest = &rest[1..];
    }
    (action, rest)
}

// --- Keyword phase ------------------------------------------------------------

fn parse_keywords<'a>(mut input: &'a str, rule: &mut Rule) -> &'a str {
    'scan: loop {
        for keyword in keywords::adjective_candidates(input) {
            let Some(after) = keywords::match_key(input, keyword.text) else {
                continue;
            };
            let after = match keyword.slot {
                Slot::Threshold(suffix) => {
                    // A bad number voids this keyword only; shorter candidates still get a chance.
                    let Some((value, after)) = read_threshold(after, suffix) else {
                        continue;
                    };
                    match keyword.flag {
                        Flag::MoreDice => rule.dice = value,
                        _ => rule.bonus = value,
                    }
                    after
                }
                _ => after,
            };
            rule.flags.insert(keyword.flag);
            input = after;
            continue 'scan;
        }
        return input;
    }
}

/// Read `N [suffix]` where N has one or two decimal digits. The suffix is optional.
fn read_threshold<'a>(input: &'a str, suffix: &str) -> Option<(u8, &'a str)> {
    let input = input.trim_start_matches(' ');
    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=2).contains(&digits) {
        return None;
    }
    let value: u8 = input[..digits].parse().ok()?;
    let rest = &input[digits..];
    Some((value, keywords::match_key(rest, suffix).unwrap_or(rest)))
}

// --- Noun phase ---------------------------------------------------------------

fn parse_noun<'a>(mut input: &'a str, flags: &mut FlagSet) -> &'a str {
    // Last flag accepted here, and the text it was read from.
    let mut tentative: Option<(Flag, &'a str)> = None;

    if let Some(after) = keywords::match_key(input, KEY_ARTIFACT) {
        flags.insert(Flag::Artifact);
        tentative = Some((Flag::Artifact, input));
        input = after;
    }
    if let Some(noun) = keywords::longest_noun(input) {
        flags.insert(noun.flag);
        tentative = Some((noun.flag, input));
        input = keywords::match_key(input, noun.text).unwrap_or(input);
    }

    if let Some(name) = input.strip_prefix(':') {
        return name;
    }
    if input.is_empty() {
        if tentative.is_none() {
            flags.insert(Flag::Items);
        }
        return input;
    }
    match tentative {
        Some((flag, start)) => {
            flags.remove(flag);
            start
        }
        None => input,
    }
}
