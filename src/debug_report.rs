use autopick::{PlayerContext, Rule, RuleSet, expr, is_foreign_line};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// How one source line reads under the current context.
enum Verdict {
    Blank,
    Comment,
    Condition { value: String, bypass: bool },
    /// A rule, with its canonical form.
    Rule { canonical: String, bypassed: bool },
    /// A line the engine does not interpret: foreign directives and text that
    /// does not parse as a rule.
    Opaque { bypassed: bool },
}

fn classify(lines: &[String], context: &PlayerContext) -> Vec<Verdict> {
    let mut bypass = false;
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                return Verdict::Blank;
            }
            if line.starts_with('#') {
                return Verdict::Comment;
            }
            if let Some(condition) = expr::condition(line) {
                let value = context.eval(condition);
                bypass = expr::is_false(&value);
                return Verdict::Condition { value, bypass };
            }
            if is_foreign_line(line) {
                return Verdict::Opaque { bypassed: bypass };
            }
            match Rule::parse(line, false) {
                Some(rule) => Verdict::Rule { canonical: rule.to_line(), bypassed: bypass },
                None => Verdict::Opaque { bypassed: bypass },
            }
        })
        .collect()
}

pub fn print_run(source: &str, lines: &[String], context: &PlayerContext, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Rules: {source}"), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Context ━━━", ansi::GRAY));
    println!(
        "  {} {}  {} {}  {} {}",
        palette.dim("race:"),
        palette.paint(&context.race, ansi::BLUE),
        palette.dim("class:"),
        palette.paint(&context.class, ansi::BLUE),
        palette.dim("level:"),
        palette.paint(context.level.to_string(), ansi::BLUE),
    );
    if !context.realm1.is_empty() || !context.realm2.is_empty() {
        println!(
            "  {} {}  {} {}",
            palette.dim("realm1:"),
            palette.paint(&context.realm1, ansi::BLUE),
            palette.dim("realm2:"),
            palette.paint(&context.realm2, ansi::BLUE),
        );
    }

    println!("\n{}", palette.paint("━━━ Lines ━━━", ansi::GRAY));
    let verdicts = classify(lines, context);
    for (row, (line, verdict)) in lines.iter().zip(&verdicts).enumerate() {
        print_line(row, line, verdict, &palette);
    }

    let active = RuleSet::from_lines(lines.iter().map(String::as_str), context);
    let opaque = verdicts.iter().filter(|v| matches!(v, Verdict::Opaque { .. })).count();
    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    println!(
        "  Lines: {}  │  Active rules: {}  │  Opaque: {}",
        palette.paint(lines.len().to_string(), ansi::BLUE),
        palette.paint(active.len().to_string(), ansi::GREEN),
        palette.dim(opaque.to_string()),
    );
    println!();
}

fn print_line(row: usize, line: &str, verdict: &Verdict, palette: &ansi::Palette) {
    let number = palette.paint(format!("{:>4}", row + 1), ansi::GRAY);
    match verdict {
        Verdict::Blank => println!("  {number}"),
        Verdict::Comment => println!("  {number} {}", palette.dim(line)),
        Verdict::Condition { value, bypass } => {
            let state = if *bypass { palette.paint("off", ansi::YELLOW) } else { palette.paint("on", ansi::GREEN) };
            println!(
                "  {number} {} {} {} {}",
                palette.paint(line, ansi::CYAN),
                palette.dim("→"),
                palette.bold(value),
                state
            );
        }
        Verdict::Rule { canonical, bypassed } => {
            let text = if *bypassed { palette.dim(line) } else { palette.paint(line, ansi::GREEN) };
            if canonical == line {
                println!("  {number} {text}");
            } else {
                println!("  {number} {text} {} {}", palette.dim("│ canonical:"), palette.paint(canonical, ansi::BLUE));
            }
        }
        Verdict::Opaque { bypassed } => {
            let text = if *bypassed { palette.dim(line) } else { line.to_string() };
            println!("  {number} {text} {}", palette.paint("(opaque)", ansi::YELLOW));
        }
    }
}
