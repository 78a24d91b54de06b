pub const DEFAULT_CONFIG_PATH: &str = "config.ini";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const COMPLETIONS_PATH: &str = "completions";
pub const IMAGE_GENERATIONS_PATH: &str = "images/generations";
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

pub const SECTION_API: &str = "api";
pub const SECTION_SETTINGS: &str = "settings";
pub const KEY_API_KEY: &str = "api_key";
pub const KEY_TEXT_MODEL: &str = "text_model";
pub const KEY_DALLE_MODEL: &str = "dalle_model";
pub const KEY_SIZE: &str = "size";
pub const KEY_MAX_TOKENS: &str = "max_tokens";
pub const KEY_BASE_URL: &str = "base_url";
pub const KEY_IMAGE_FOLDER: &str = "image_folder";
pub const KEY_NUM_IMAGES: &str = "num_images";

pub const REQUIRED_API_KEYS: [&str; 5] = [
    KEY_API_KEY,
    KEY_TEXT_MODEL,
    KEY_DALLE_MODEL,
    KEY_SIZE,
    KEY_MAX_TOKENS,
];

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];
pub const DESCRIBE_PROMPT_PREFIX: &str = "Please describe the contents of this image: ";
pub const IMAGES_PER_REQUEST: u8 = 1;

pub const DEFAULT_EXTRACT_DIR: &str = "extracted_images";
pub const EXTRACTED_IMAGE_PREFIX: &str = "image_";
pub const EXTRACTED_IMAGE_EXTENSION: &str = "png";
