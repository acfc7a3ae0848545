use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, Write};
use trends_core::config::{default_config_path, load_config};
use trends_core::core::matcher::SearchResult;
use trends_core::core::state::Action;
use trends_core::core::types::YearRange;
use trends_core::{presets, render, Explorer};

const CHART_WIDTH: usize = 72;
const SHOWN_SUGGESTIONS: usize = 10;
const BASE_URL: &str = "https://localhost/baby-name-charts/";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = match default_config_path() {
        Some(path) => load_config(&path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => Default::default(),
    };
    let data_dir = std::env::args_os().nth(1).map(Into::into);

    println!("Loading data chunks...");
    let mut explorer = Explorer::open(&config, data_dir, true).context("Error loading data")?;

    loop {
        let suggestions = explorer.suggestions();
        print_ui(&explorer, &suggestions)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" | "quit" => break,
            "" => {
                // Enter picks the top suggestion.
                if let Some(top) = suggestions.candidates.first() {
                    explorer.dispatch(Action::Select(top.clone()));
                }
            }
            "clear" => explorer.dispatch(Action::Clear),
            "random" => explorer.dispatch(Action::LoadSelections(presets::random(&mut rand::rng()))),
            "link" => {
                println!("\n{}", explorer.permalink(BASE_URL));
                println!("(press Enter)");
                stdin().read_line(&mut String::new())?;
            }
            s if s.starts_with(':') && s.len() > 1 => {
                // Select suggestion :1, :2 etc
                if let Ok(n) = s[1..].parse::<usize>() {
                    if n > 0 && n <= suggestions.candidates.len() {
                        explorer.dispatch(Action::Select(suggestions.candidates[n - 1].clone()));
                    }
                }
            }
            s if s.starts_with('-') && s.len() > 1 => {
                if let Ok(n) = s[1..].parse::<usize>() {
                    explorer.dispatch(Action::Remove(n.saturating_sub(1)));
                }
            }
            s if s.starts_with("range ") => {
                let years: Vec<u16> = s[6..].split_whitespace().filter_map(|y| y.parse().ok()).collect();
                if let [start, end] = years[..] {
                    explorer.dispatch(Action::SetRange(YearRange::new(start, end)));
                }
            }
            s if s == "pin" || s.starts_with("pin ") => {
                let year = s[3..].trim().parse().ok();
                explorer.dispatch(Action::PinYear(year));
            }
            s if s.starts_with("open ") => explorer.dispatch(Action::Restore(s[5..].trim().to_string())),
            s => explorer.dispatch(Action::SetQuery(s.to_string())),
        }
    }

    println!("\nBye.");
    Ok(())
}

fn print_ui(explorer: &Explorer, suggestions: &SearchResult) -> Result<()> {
    let mut out = stdout();
    // Basic clear screen for simplicity
    print!("\x1B[2J\x1B[1;1H");
    println!("{}", "Baby Name Trends".bold());
    println!("---------------------------------------------------------------");
    println!("Type a name or /regex/, then Enter for the top match or ':2' for another.");
    println!("'-1' removes a name, 'range 1950 2000', 'pin 1990', 'link', 'open <url>',");
    println!("'random', 'clear', 'exit'.\n");

    let state = explorer.state();
    let chips: Vec<String> = state
        .selections
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[{}] {}", i + 1, s.label()))
        .collect();
    println!("Selected: {}", if chips.is_empty() { "-".to_string() } else { chips.join("  ") });
    let (from, to) = state.year_range.normalized();
    println!("Years: {} to {}\n", from, to);

    render::render_chart(&mut out, &explorer.chart(), state.year_range, CHART_WIDTH)?;
    if let Some(lines) = explorer.pinned_tooltip() {
        println!();
        for line in lines {
            println!("  {}", line.dim());
        }
    }

    println!("\nSearch: [{}]", state.query);
    if !suggestions.is_empty() {
        for (i, candidate) in suggestions.candidates.iter().take(SHOWN_SUGGESTIONS).enumerate() {
            println!("  :{}: {}", i + 1, candidate);
        }
        if suggestions.truncated || suggestions.candidates.len() > SHOWN_SUGGESTIONS {
            println!("  {}", "more results, keep typing to narrow".dim());
        }
    } else if state.query.len() > 1 {
        println!("  No results found");
    }
    print!("\n> ");
    out.flush()?;
    Ok(())
}
