//! CLI tool for inspecting fonts and text of a PDF's first page

use pdf_font_inspector::{analyze_pdf_fonts, ReportConfig, DEFAULT_PDF_PATH};
use std::env;
use std::io::{self, Write};
use std::process;

fn print_usage(program: &str) {
    eprintln!("Usage: {} [pdf_file]", program);
    eprintln!();
    eprintln!("Prints page count, metadata, first-page text and font usage.");
    eprintln!("Defaults to {} when no file is given.", DEFAULT_PDF_PATH);
    eprintln!("Set RUST_LOG=debug for backend diagnostics on stderr.");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("analyze_pdf_fonts");

    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        print_usage(program);
        return;
    }

    if args.len() > 2 {
        print_usage(program);
        process::exit(1);
    }

    let pdf_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_PDF_PATH);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = analyze_pdf_fonts(pdf_path, &ReportConfig::default(), &mut out)
        .and_then(|_| out.flush())
    {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
