use img_recreation::constants::DEFAULT_EXTRACT_DIR;
use img_recreation::pdf::extract_images_from_pdf;
use img_recreation::print_help::print_extract_help;
use img_recreation::utils::wants_help;
use std::{env, error::Error, path::Path};

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || wants_help(&args) {
        print_extract_help();
        return Ok(());
    }

    let pdf_path = Path::new(&args[1]);
    let output_dir = Path::new(args.get(2).map_or(DEFAULT_EXTRACT_DIR, String::as_str));

    extract_images_from_pdf(pdf_path, output_dir)?;
    Ok(())
}
