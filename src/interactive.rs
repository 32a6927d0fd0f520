use comfy_table::{modifiers, presets, Cell, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use yansi::Paint;

use kcal::panel::{
    ActionOutcome, PanelAction, SearchPanel, BARCODE_BUTTON, BARCODE_PLACEHOLDER, NAME_BUTTON,
    NAME_PLACEHOLDER, WINDOW_TITLE,
};

const HELP: &str = "b <штрихкод>   поиск по штрихкоду\nn <название>   поиск по названию или категории\nhelp           эта подсказка\nq              выход";

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Barcode(String),
    Name(String),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head.to_lowercase().as_str() {
        "b" | "barcode" => Command::Barcode(rest.to_string()),
        "n" | "name" => Command::Name(rest.to_string()),
        "help" | "h" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(head.to_string()),
    }
}

/// Draw the panel: both input rows and the output area.
pub fn render_panel(panel: &SearchPanel, outcome: Option<&ActionOutcome>) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }

    table.set_header(vec![Cell::new(WINDOW_TITLE), Cell::new("")]);
    table.add_row(vec![input_cell(&panel.barcode_input, BARCODE_PLACEHOLDER), Cell::new(format!("[{}]", BARCODE_BUTTON))]);
    table.add_row(vec![input_cell(&panel.name_input, NAME_PLACEHOLDER), Cell::new(format!("[{}]", NAME_BUTTON))]);

    let output = match outcome {
        Some(ActionOutcome::Failed(_)) => Paint::new(panel.output()).red().to_string(),
        Some(ActionOutcome::EmptyInput) | Some(ActionOutcome::NotFound) => Paint::new(panel.output()).yellow().to_string(),
        _ => panel.output().to_string(),
    };
    table.add_row(vec![Cell::new(output), Cell::new("")]);

    println!("\n{table}\n");
}

fn input_cell(value: &str, placeholder: &str) -> Cell {
    if value.is_empty() {
        Cell::new(Paint::new(placeholder).dim().to_string())
    } else {
        Cell::new(value)
    }
}

/// Read commands from stdin until EOF or `q`. Each action awaits its request
/// before the next line is read.
pub async fn run(mut panel: SearchPanel) -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    render_panel(&panel, None);
    println!("{}", Paint::new(HELP).dim());

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let action = match parse_command(&line) {
            Command::Barcode(text) => {
                panel.barcode_input = text;
                PanelAction::BarcodeSearch
            }
            Command::Name(text) => {
                panel.name_input = text;
                PanelAction::NameSearch
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
            Command::Unknown(head) if head.is_empty() => continue,
            Command::Unknown(head) => {
                println!("{} '{}' ({})", Paint::new("Неизвестная команда").red(), head, Paint::new("help").cyan());
                continue;
            }
        };

        let outcome = panel.trigger(action).await;
        render_panel(&panel, Some(&outcome));
    }
    Ok(())
}
