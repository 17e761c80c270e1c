//! Calculator Session
//!
//! Drives the widget over the mock DOM from stdin. Each line holds
//! whitespace-separated button tokens or keyboard keys (`7 * 6 Enter`), or
//! one of the session commands:
//!
//! - `replay`: restore the previous input
//! - `theme`: toggle and persist the theme
//! - `history`: list calculations, newest first
//! - `select N`: load history row `N` (0 = newest)
//! - `clear-history`: empty the history
//! - `quit`
//!
//! The theme is stored in the JSON file named by the first argument, else
//! `$CALC_WIDGET_PREFS`, else a file in the temp directory.
//!
//! Run with: RUST_LOG=calc_widget=debug cargo run --example calculator_session

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use calc_widget::driver::CalculatorDriver;
use calc_widget::prelude::*;
use calc_widget::wasm::MockDomKeypadExt;
use tracing_subscriber::EnvFilter;

type Session = Calculator<MockDom, JsonFileStore>;

fn prefs_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("CALC_WIDGET_PREFS"))
        .map_or_else(
            || std::env::temp_dir().join("calc-widget-prefs.json"),
            PathBuf::from,
        )
}

fn print_views(out: &mut impl Write, calc: &Session) -> io::Result<()> {
    writeln!(
        out,
        "  {:<28} │ {}",
        calc.expression_display(),
        calc.result_display()
    )
}

fn print_history(out: &mut impl Write, calc: &Session) -> io::Result<()> {
    let rows = calc.surface().history_rows();
    if rows.is_empty() {
        writeln!(out, "  {}", calc_widget::surface::EMPTY_HISTORY_TEXT)?;
    }
    for (position, row) in rows.iter().enumerate() {
        writeln!(out, "  [{position}] {row}")?;
    }
    Ok(())
}

fn run_line(out: &mut impl Write, calc: &mut Session, line: &str) -> io::Result<bool> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => return Ok(true),
        Some("quit") => return Ok(false),
        Some("replay") => {
            if !calc.replay() {
                writeln!(out, "  nothing to replay")?;
            }
        }
        Some("theme") => {
            let theme = calc.toggle_theme();
            writeln!(out, "  theme: {theme} {}", theme.glyph())?;
        }
        Some("history") => return print_history(out, calc).map(|()| true),
        Some("clear-history") => calc.clear_history(),
        Some("select") => {
            let selected = words
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .is_some_and(|position| CalculatorDriver::select_history(calc, position));
            if !selected {
                writeln!(out, "  no such history row")?;
            }
        }
        Some(_) => {
            for word in line.split_whitespace() {
                let handled = if Command::parse(word).is_some() {
                    !calc.press(word).is_rejected()
                } else {
                    calc.handle_event(&DomEvent::key_press(word))
                };
                if !handled {
                    writeln!(out, "  ignored: {word}")?;
                }
            }
        }
    }
    print_views(out, calc)?;
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let path = prefs_path();
    let mut dom = MockDom::calculator();
    dom.add_keypad(&Keypad::new());
    let mut calc = Calculator::new(dom, JsonFileStore::new(&path));
    calc.mount();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "calc-widget session (prefs: {})", path.display())?;
    writeln!(out, "  theme: {} {}", calc.theme(), calc.theme().glyph())?;
    print_views(&mut out, &calc)?;

    for line in io::stdin().lock().lines() {
        if !run_line(&mut out, &mut calc, &line?)? {
            break;
        }
    }
    Ok(())
}
