use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialex::{
    Diagnostic, Dialect, GroupInfo, HighlightClass, ParseResult, explain, highlight, parse, tooltip,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dialex")]
#[command(about = "Dialex - inspect regex patterns across dialects")]
#[command(version)]
struct Cli {
    /// Regex dialect: ecma, pcre, posix-bre, posix-ere, vim, python, sed
    #[arg(short, long, global = true, env = "DIALEX_DIALECT", default_value = "ecma")]
    dialect: Dialect,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tokens of a pattern
    Tokens {
        /// The regex pattern
        pattern: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Include tooltip text for each token
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the syntax tree of a pattern
    Tree {
        /// The regex pattern
        pattern: String,
        /// Print the full parse result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Explain a pattern in plain language
    Explain {
        /// The regex pattern
        pattern: String,
    },
    /// Print the pattern with syntax colors
    Highlight {
        /// The regex pattern
        pattern: String,
        /// Print overlay markup instead of terminal colors
        #[arg(long)]
        html: bool,
    },
    /// Report errors and warnings; exits with 1 when errors exist
    Check {
        /// The regex pattern
        pattern: String,
    },
    /// List the supported dialects
    Dialects,
}

fn main() {
    let cli = Cli::parse();
    let dialect = cli.dialect;

    match cli.command {
        Commands::Tokens {
            pattern,
            json,
            verbose,
        } => cmd_tokens(&pattern, dialect, json, verbose),
        Commands::Tree { pattern, json } => cmd_tree(&pattern, dialect, json),
        Commands::Explain { pattern } => cmd_explain(&pattern, dialect),
        Commands::Highlight { pattern, html } => cmd_highlight(&pattern, dialect, html),
        Commands::Check { pattern } => cmd_check(&pattern, dialect),
        Commands::Dialects => cmd_dialects(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn print_diagnostics(result: &ParseResult) {
    for error in &result.errors {
        eprintln!("{} {}", "Error:".red().bold(), describe_at(&result.pattern, error));
    }
    for warning in &result.warnings {
        eprintln!(
            "{} {}",
            "Warning:".yellow().bold(),
            describe_at(&result.pattern, warning)
        );
    }
}

/// Diagnostic message followed by the pattern with a caret under the span
fn describe_at(pattern: &str, diagnostic: &Diagnostic) -> String {
    let width = diagnostic.span.len().max(1);
    format!(
        "{}\n  {}\n  {}{}",
        diagnostic,
        pattern,
        " ".repeat(diagnostic.span.start),
        "^".repeat(width)
    )
}

fn cmd_tokens(pattern: &str, dialect: Dialect, json: bool, verbose: bool) {
    let result = parse(pattern, dialect);

    if json {
        print_json(&result.tokens);
        return;
    }

    println!("{}", "Tokens".bold());
    println!("  Pattern: {}", pattern.cyan());
    println!("  Dialect: {}", dialect.to_string().yellow());
    println!();

    for token in &result.tokens {
        println!(
            "  {:>4}  {:<20} {}",
            token.offset,
            token.kind.name(),
            paint(&token.text, HighlightClass::of(token.kind))
        );
        if verbose {
            let tip = tooltip(token, dialect);
            println!("        {} - {}", tip.title.bold(), tip.description);
            for note in tip.notes {
                println!("        * {note}");
            }
        }
    }

    print_diagnostics(&result);
}

fn cmd_tree(pattern: &str, dialect: Dialect, json: bool) {
    let result = parse(pattern, dialect);

    if json {
        print_json(&result);
        return;
    }

    result.ast.walk(&mut |node, depth| {
        println!("{}{}", "  ".repeat(depth), node.label());
    });

    println!();
    println!(
        "{} {} nodes, {} capture groups",
        "Summary:".bold(),
        result.ast.node_count(),
        result.groups.group_count()
    );
    for group in result.groups.groups() {
        println!("  {}", describe_group(group));
    }
    print_diagnostics(&result);
}

fn describe_group(group: &GroupInfo) -> String {
    match group.name.as_deref() {
        Some(name) if group.is_named() => {
            format!("#{} <{}> at position {}", group.index, name, group.offset)
        }
        _ => format!("#{} at position {}", group.index, group.offset),
    }
}

fn cmd_explain(pattern: &str, dialect: Dialect) {
    let result = parse(pattern, dialect);
    explain(&result).report();
}

fn cmd_highlight(pattern: &str, dialect: Dialect, html: bool) {
    let result = parse(pattern, dialect);

    if html {
        println!("{}", highlight::to_html(&result.tokens));
        return;
    }

    let painted: Vec<String> = highlight(&result.tokens)
        .iter()
        .map(|span| paint(&span.text, span.class).to_string())
        .collect();
    println!("{}", painted.concat());
    print_diagnostics(&result);
}

fn cmd_check(pattern: &str, dialect: Dialect) {
    let result = parse(pattern, dialect);
    print_diagnostics(&result);

    if result.success() {
        println!(
            "{} {} ({} group(s))",
            "✓".green().bold(),
            "Pattern is well-formed".green(),
            result.group_count()
        );
        std::process::exit(0);
    } else {
        println!(
            "{} {}",
            "✗".red().bold(),
            format!("{} error(s)", result.errors.len()).red()
        );
        std::process::exit(1);
    }
}

fn cmd_dialects() {
    for dialect in Dialect::all() {
        println!("  {:<10} {}", dialect.tag().cyan(), dialect.description());
    }
}

fn paint(text: &str, class: HighlightClass) -> ColoredString {
    match class {
        HighlightClass::Literal => text.normal(),
        HighlightClass::Metachar => text.blue().bold(),
        HighlightClass::Anchor => text.magenta().bold(),
        HighlightClass::CharClass => text.yellow(),
        HighlightClass::Group => text.cyan().bold(),
        HighlightClass::Assertion => text.bright_cyan(),
        HighlightClass::Quantifier => text.green().bold(),
        HighlightClass::Escape => text.bright_yellow(),
        HighlightClass::Backref => text.bright_magenta(),
        HighlightClass::Alternation => text.bright_red().bold(),
        HighlightClass::Modifier => text.bright_blue(),
        HighlightClass::Error => text.white().on_red(),
    }
}
