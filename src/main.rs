use clap::Parser;
use photogen::logger::{self, LogLevel, LoggerConfig};
use photogen::{
    Gallery, GeminiConfig, Gender, GenerationConfig, Height, ModelOptions, SkinTone, Studio,
    StyleKind,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "photogen", version, about = "Generate product photo variations with Gemini")]
struct Cli {
    /// Product photo to build every shot from
    #[arg(short, long)]
    image: PathBuf,

    /// What the product is, e.g. "blue cotton t-shirt"
    #[arg(short, long)]
    description: String,

    /// Photo style to generate (ecommerce, lifestyle, model); repeatable
    #[arg(short, long = "style", required = true)]
    styles: Vec<StyleKind>,

    /// Images per style (1-5)
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    #[arg(long, default_value = "Any")]
    gender: Gender,

    #[arg(long, default_value = "Any")]
    skin_tone: SkinTone,

    #[arg(long, default_value = "Any")]
    height: Height,

    /// Pose for model shots, e.g. "walking"
    #[arg(long, default_value = "")]
    gesture: String,

    /// Scene for lifestyle and model shots
    #[arg(short, long, default_value = "")]
    background: String,

    /// Reference photo of the scene for lifestyle and model shots
    #[arg(long)]
    background_image: Option<PathBuf>,

    #[arg(short, long, default_value = "generated")]
    output_dir: PathBuf,

    /// Overrides GEMINI_MODEL
    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    json_logs: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::new(self.description.clone())
            .with_images_per_style(self.count)
            .with_styles(self.styles.iter().copied())
            .with_background(self.background.clone())
            .with_model_options(
                ModelOptions::new()
                    .with_gender(self.gender)
                    .with_skin_tone(self.skin_tone)
                    .with_height(self.height)
                    .with_gesture(self.gesture.clone()),
            )
    }

    fn logger_config(&self) -> LoggerConfig {
        let config = if self.json_logs {
            LoggerConfig::production()
        } else {
            LoggerConfig::default()
        };
        if self.verbose {
            config.with_level(LogLevel::Debug)
        } else {
            config
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env_loaded = dotenv::dotenv().is_ok();
    logger::init_with_config(cli.logger_config())?;
    if env_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::debug!("No .env file found, using process environment");
    }

    let mut gemini = GeminiConfig::from_env();
    if let Some(model) = &cli.model {
        gemini = gemini.with_model(model.clone());
    }
    logger::log_config_info(&gemini);

    let studio = match Studio::new(gemini) {
        Ok(studio) => studio,
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(e.into());
        }
    };

    let config = cli.generation_config();
    log::info!(
        "🖼️  Generating {} photos of \"{}\"",
        config.total_images(),
        config.product_description
    );

    let mut gallery = Gallery::new();
    if let Err(e) = gallery
        .generate(
            &studio,
            &config,
            Some(cli.image.as_path()),
            cli.background_image.as_deref(),
        )
        .await
    {
        if e.is_precondition() {
            log::warn!("⚠️  {}", e);
        } else {
            log::error!("❌ An error occurred during image generation: {}", e);
        }
        return Err(e.into());
    }

    if gallery.results().is_empty() {
        log::warn!("⚠️  No images were generated. Check the log above for per-request errors.");
        return Ok(());
    }

    let saved = gallery.save_all(&cli.output_dir);

    println!(
        "{} of {} photos written to {}",
        saved,
        config.total_images(),
        cli.output_dir.display()
    );

    Ok(())
}
