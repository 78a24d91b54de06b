use crate::constants::IMAGE_EXTENSIONS;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter().skip(1).any(|arg| arg == "-help" || arg == "-h")
}
