// UI layer: provides a simple interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::{MasterClient, ProcessingResult};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Main interactive menu. Receives a `MasterClient` instance and runs a
/// simple select loop until the user chooses "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
pub fn main_menu(mut client: MasterClient) -> Result<()> {
    print_banner();
    println!("Master service: {}", client.get_endpoint_url());

    loop {
        let items = vec![
            "Process a text file",
            "Process typed text",
            "Check master status",
            "Configure master address",
            "Exit",
        ];
        // `Select` shows a keyboard-navigable list in the terminal.
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_process_file(&client)?,
            1 => handle_process_text(&client)?,
            2 => handle_status(&client),
            3 => handle_configure(&mut client)?,
            4 => break,
            _ => {}
        }
    }
    Ok(())
}

fn print_banner() {
    println!();
    println!("================================");
    println!("   DISTRIBUTED TEXT ANALYZER    ");
    println!("     letter / number counter    ");
    println!("================================");
    println!();
}

/// Prompt for a file path and send the file's content to the master.
fn handle_process_file(client: &MasterClient) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Path of the text file")
        .allow_empty(true)
        .interact_text()?;
    if path.trim().is_empty() {
        println!("{}", "File path cannot be empty.".red());
        return Ok(());
    }
    if !Path::new(&path).exists() {
        println!("{} {}", "File not found:".red(), path);
        return Ok(());
    }

    let sp = spinner("Processing file...");
    let result = client.process_file(&path);
    sp.finish_and_clear();
    print_result(&result);
    Ok(())
}

/// Prompt for a line of text and send it to the master.
fn handle_process_text(client: &MasterClient) -> Result<()> {
    let text: String = Input::new()
        .with_prompt("Text to analyze")
        .allow_empty(true)
        .interact_text()?;
    if text.is_empty() {
        println!("{}", "Text cannot be empty.".red());
        return Ok(());
    }

    println!("Processing text ({} characters)...", text.chars().count());
    let sp = spinner("Waiting for the master...");
    let result = client.process_text(&text);
    sp.finish_and_clear();
    print_result(&result);
    Ok(())
}

/// Run the health probe and report the verdict.
fn handle_status(client: &MasterClient) {
    let sp = spinner("Checking master status...");
    let healthy = client.check_health();
    sp.finish_and_clear();

    if healthy {
        println!("{}", "Master is up and ready to process requests.".green());
    } else {
        println!("{}", "Master is unavailable or unhealthy.".red());
        println!(
            "Check that the master is running at: {}",
            client.get_endpoint_url()
        );
    }
}

/// Ask for a new host/port and reconfigure the client. An unparsable port
/// falls back to 8080 with a warning, like the rest of the prompts this is
/// forgiving rather than strict.
fn handle_configure(client: &mut MasterClient) -> Result<()> {
    println!("Current master: {}", client.get_endpoint_url());

    let host: String = Input::new()
        .with_prompt("Master host")
        .default("localhost".to_string())
        .interact_text()?;
    let port_input: String = Input::new()
        .with_prompt("Master port")
        .default("8080".to_string())
        .interact_text()?;
    let port: u16 = match port_input.trim().parse() {
        Ok(p) if p > 0 => p,
        _ => {
            println!("{}", "Invalid port, keeping 8080.".yellow());
            8080
        }
    };

    client.configure(&host, port);
    println!("Master reconfigured: {}", client.get_endpoint_url());
    Ok(())
}

/// Render a `ProcessingResult`: statistics and distribution on success,
/// the error plus a truncated raw response on failure.
fn print_result(result: &ProcessingResult) {
    let rule = "=".repeat(50);
    println!("\n{rule}");

    if result.success {
        println!("{}", "Processing completed successfully".green());
        println!();
        println!("  Letters found:     {:>10}", result.letters_count);
        println!("  Numbers found:     {:>10}", result.numbers_count);
        println!("  Total characters:  {:>10}", result.total_characters);
        println!("  Processing time:   {:>10.2} ms", result.processing_time_ms);

        let counted = result.letters_count + result.numbers_count;
        if counted > 0 {
            let letters_pct = result.letters_count as f64 / counted as f64 * 100.0;
            let numbers_pct = result.numbers_count as f64 / counted as f64 * 100.0;
            println!();
            println!("  Letters: {letters_pct:>6.2}%");
            println!("  Numbers: {numbers_pct:>6.2}%");
        }
    } else {
        println!("{}", "Processing failed".red());
        println!();
        println!("Error: {}", result.error_message);

        if !result.raw_response.is_empty() {
            println!("\nServer response:");
            let preview: String = result.raw_response.chars().take(500).collect();
            print!("{preview}");
            if result.raw_response.chars().count() > 500 {
                print!("... (truncated)");
            }
            println!();
        }
    }

    println!("{rule}");
}

/// Spinner shown while a blocking request is in flight.
fn spinner(message: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    sp.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    sp.set_message(message.to_string());
    sp.enable_steady_tick(Duration::from_millis(100));
    sp
}
