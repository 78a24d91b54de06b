use colored::Colorize;
use img_recreation::client::OpenAiClient;
use img_recreation::constants::DEFAULT_CONFIG_PATH;
use img_recreation::error::RecreateError;
use img_recreation::print_help::print_recreate_help;
use img_recreation::recreate::{process_images_in_folder, Outcome};
use img_recreation::settings::Settings;
use img_recreation::utils::wants_help;
use log::info;
use std::env;

async fn run(config_path: &str) -> Result<(), RecreateError> {
    let settings = Settings::load(config_path)?;
    let client = OpenAiClient::from_settings(&settings)?;

    let processed = process_images_in_folder(&client, &settings).await?;
    let recreated = processed
        .iter()
        .filter(|image| matches!(image.outcome, Outcome::Recreated { .. }))
        .count();
    info!("recreated {} of {} image(s)", recreated, processed.len());
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if wants_help(&args) {
        print_recreate_help();
        return;
    }

    let config_path = args.get(1).map_or(DEFAULT_CONFIG_PATH, String::as_str);
    if let Err(e) = run(config_path).await {
        println!("{} {}", "Error:".bold().red(), e);
    }
}
