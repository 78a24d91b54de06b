use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_EXTRACT_DIR};
use colored::Colorize;

pub fn print_recreate_help() {
    println!("{:━^60}", " RECREATE-IMAGES ".yellow());
    println!("Usage:");
    println!("  {} [config_path]", "recreate-images".bold().green());
    println!("\nArguments:");
    println!(
        "  {}  INI file with [API] and [Settings] sections (default: {}).",
        "[config_path]".bold().cyan(),
        DEFAULT_CONFIG_PATH
    );
    println!(
        "  {}     Display this help message.",
        "-h, -help".bold().blue()
    );
    println!("\nConfiguration:");
    println!(
        "  {} api_key, text_model, dalle_model, size (WxH), max_tokens, [base_url]",
        "[API]".bold().magenta()
    );
    println!(
        "  {} image_folder, num_images",
        "[Settings]".bold().magenta()
    );
    println!("\nExamples:");
    println!("  {}", "recreate-images".bold().green());
    println!("  {} my_config.ini", "recreate-images".bold().green());
    println!("{:━^60}", "".yellow());
}

pub fn print_extract_help() {
    println!("{:━^60}", " PDF-IMAGES ".yellow());
    println!("Usage:");
    println!(
        "  {} <pdf_path> [output_dir]",
        "pdf-images".bold().green()
    );
    println!("\nArguments:");
    println!("  {}    PDF document to read.", "<pdf_path>".bold().cyan());
    println!(
        "  {}  Folder for image_<N>.png files (default: {}).",
        "[output_dir]".bold().cyan(),
        DEFAULT_EXTRACT_DIR
    );
    println!(
        "  {}     Display this help message.",
        "-h, -help".bold().blue()
    );
    println!("\nExamples:");
    println!("  {} report.pdf", "pdf-images".bold().green());
    println!("  {} report.pdf out/images", "pdf-images".bold().green());
    println!("{:━^60}", "".yellow());
}
