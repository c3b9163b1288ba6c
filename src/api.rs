use crate::expr;

/// Editor limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Hard maximum number of lines in the buffer.
    pub max_lines: usize,
    /// Longest line, in characters, that typing may produce.
    pub max_line_len: usize,
    /// Rows moved by page up / page down.
    pub page_rows: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_lines: 3000, max_line_len: 1024, page_rows: 20 }
    }
}

/// Character-state snapshot read by `?:` expressions.
///
/// This is the only piece of game state the engine sees outside of items. It is
/// read-only: a session builds one and hands it to the evaluator by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerContext {
    /// Race title, e.g. `"Human"`.
    pub race: String,
    /// Class title, e.g. `"Warrior"`.
    pub class: String,
    pub level: u32,
    /// First magic realm name, empty when the class has none.
    pub realm1: String,
    pub realm2: String,
    pub name: String,
    pub gold: u64,
    /// True once the rule file has an auto-register block.
    pub autoregister: bool,

    // --- Environment ---
    pub sys: String,
    pub keyboard: String,
    pub graf: String,
    pub monochrome: bool,
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self {
            race: "Human".to_string(),
            class: "Warrior".to_string(),
            level: 1,
            realm1: String::new(),
            realm2: String::new(),
            name: "PLAYER".to_string(),
            gold: 0,
            autoregister: false,
            sys: "gcu".to_string(),
            keyboard: "ENGLISH".to_string(),
            graf: "ascii".to_string(),
            monochrome: false,
        }
    }
}

impl PlayerContext {
    /// Value of `$NAME` (pass the name without the `$`).
    ///
    /// Unknown names resolve to [`expr::UNKNOWN`].
    pub fn resolve(&self, name: &str) -> String {
        match name {
            "SYS" => self.sys.clone(),
            "KEYBOARD" => self.keyboard.clone(),
            "GRAF" => self.graf.clone(),
            "MONOCHROME" => on_off(self.monochrome).to_string(),
            "RACE" => self.race.clone(),
            "CLASS" => self.class.clone(),
            "PLAYER" => regex!(r"[ \[\]]").replace_all(&self.name, "_").into_owned(),
            "REALM1" => self.realm1.clone(),
            "REALM2" => self.realm2.clone(),
            "LEVEL" => format!("{:02}", self.level),
            "AUTOREGISTER" => if self.autoregister { "1" } else { "0" }.to_string(),
            "MONEY" => format!("{:09}", self.gold),
            _ => {
                tracing::debug!(name, "unknown expression variable");
                expr::UNKNOWN.to_string()
            }
        }
    }

    /// Evaluate `expression` against this context.
    pub fn eval(&self, expression: &str) -> String {
        expr::eval(expression, &|name| self.resolve(name)).0
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_zero_padded() {
        let ctx = PlayerContext { level: 7, gold: 1234, ..PlayerContext::default() };
        assert_eq!(ctx.resolve("LEVEL"), "07");
        assert_eq!(ctx.resolve("MONEY"), "000001234");
    }

    #[test]
    fn player_name_is_sanitized() {
        let ctx = PlayerContext { name: "Frodo [the] Brave".to_string(), ..PlayerContext::default() };
        assert_eq!(ctx.resolve("PLAYER"), "Frodo__the__Brave");
    }

    #[test]
    fn environment_and_unknown_variables() {
        let ctx = PlayerContext { monochrome: true, ..PlayerContext::default() };
        assert_eq!(ctx.resolve("MONOCHROME"), "ON");
        assert_eq!(ctx.resolve("AUTOREGISTER"), "0");
        assert_eq!(ctx.resolve("NOPE"), expr::UNKNOWN);
    }

    #[test]
    fn default_limits() {
        let opts = Options::default();
        assert_eq!((opts.max_lines, opts.max_line_len, opts.page_rows), (3000, 1024, 20));
    }
}
