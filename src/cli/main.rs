use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use notescan::common::init_logger;
use notescan::vision::{VisionClient, VisionConfig};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "A CLI tool to recognize notebook photos via Yandex Vision", long_about = None)]
struct Cli {
    #[arg(
        long,
        help = "input file in image (png, jpeg, gif, webp, etc) format"
    )]
    image: PathBuf,
    #[arg(long, help = "Yandex Cloud folder id, overrides YANDEX_FOLDER_ID")]
    folder_id: Option<String>,
}

#[tokio::main]
async fn main() {
    init_logger(
        env::current_exe()
            .unwrap()
            .file_stem()
            .unwrap()
            .to_str()
            .unwrap(),
    );
    let cli = Cli::parse();

    let mut config = VisionConfig::from_env();
    if let Some(folder_id) = cli.folder_id {
        config.folder_id = folder_id;
    }

    let bytes = match tokio::fs::read(&cli.image).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read image {:?}: {}", cli.image, e);
            std::process::exit(1);
        }
    };
    let image_base64 = STANDARD.encode(bytes);

    let client = match VisionClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    match client.recognize(&image_base64).await {
        Ok(text) if text.trim().is_empty() => {
            log::warn!("No text detected on the image");
        }
        Ok(text) => {
            println!("{}", text.trim());
        }
        Err(e) => {
            log::error!("Failed to recognize text: {}", e);
            std::process::exit(1);
        }
    }
}
