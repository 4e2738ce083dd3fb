use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use veo_scene_analyzer::analyzer::VideoAnalyzer;
use veo_scene_analyzer::config::Config;
use veo_scene_analyzer::llm::KNOWN_MODELS;
use veo_scene_analyzer::prompt::{self, Style};
use veo_scene_analyzer::session::{Continuation, SceneSession};
use veo_scene_analyzer::video::{VideoPayload, SUPPORTED_EXTENSIONS};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("Veo Scene Analyzer")
        .version("0.1.0")
        .about("Splits a video into 8-second Veo 3 scene prompts via Gemini")
        .arg(
            Arg::new("video")
                .short('i')
                .long("video")
                .value_name("FILE")
                .help("Video file to analyze")
                .required_unless_present("list-styles"),
        )
        .arg(
            Arg::new("style")
                .short('s')
                .long("style")
                .value_name("STYLE")
                .help("Preset style name, custom style text, or 'original'"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("ID")
                .help("Gemini model identifier"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Gemini API key (overrides GEMINI_API_KEY and the config file)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path for the exported prompt file"),
        )
        .arg(
            Arg::new("max-continuations")
                .long("max-continuations")
                .value_name("NUM")
                .help("Maximum continuation cycles after the first"),
        )
        .arg(
            Arg::new("print")
                .long("print")
                .help("Print the accumulated prompts to stdout")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-styles")
                .long("list-styles")
                .help("List preset styles and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-styles") {
        println!("original");
        for style in prompt::PRESET_STYLES {
            println!("{}", style);
        }
        return Ok(());
    }

    // Load configuration before logging is up so the configured log level
    // can seed the filter; any load failure is reported right after init.
    let (mut config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // CLI overrides
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config.model.api_key = Some(api_key.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model.model = model.clone();
    }
    if let Some(style) = matches.get_one::<String>("style") {
        config.analysis.style = style.clone();
    }
    if let Some(max) = matches.get_one::<String>("max-continuations") {
        config.analysis.max_continuations = max.parse()?;
    }

    // Initialize logging: RUST_LOG wins, otherwise the configured level
    // (forced to debug by --verbose).
    let verbose = matches.get_flag("verbose");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.output.log_filter(verbose)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }
    if verbose {
        info!("Verbose logging enabled");
    }

    config.validate()?;

    let video_path = PathBuf::from(matches.get_one::<String>("video").unwrap());
    if !video_path.exists() {
        error!("Video file does not exist: {}", video_path.display());
        return Err(anyhow::anyhow!("Video file not found"));
    }

    let extension = video_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    if !extension
        .as_deref()
        .map_or(false, |e| SUPPORTED_EXTENSIONS.contains(&e))
    {
        warn!(
            "Unrecognized video extension on {}; sending as video/mp4",
            video_path.display()
        );
    }
    if !KNOWN_MODELS.contains(&config.model.model.as_str()) {
        warn!(
            "Model {} is not in the known-good list; proceeding anyway",
            config.model.model
        );
    }

    let style = Style::parse(&config.analysis.style);

    info!("🎬 Veo Scene Analyzer starting...");
    info!("📼 Video: {}", video_path.display());
    info!("🎨 Style: {}", style.descriptor());
    info!("🤖 Model: {}", config.model.model);

    let payload = VideoPayload::load(&video_path).await?;
    let analyzer = VideoAnalyzer::new(&config.model)?;
    let mut session = SceneSession::new();

    let start_time = std::time::Instant::now();

    // Initial cycle: a failure here is fatal, there is nothing to keep yet.
    let result = analyzer.analyze(&payload, &style, 0).await?;
    match session.absorb(result.scenes) {
        Continuation::Appended(count) => info!("✅ Initial cycle recovered {} scene(s)", count),
        Continuation::Exhausted => {
            warn!("Model returned no scenes; nothing to export");
            return Ok(());
        }
    }

    // Continuation cycles: a transport failure mid-run keeps what was
    // already gathered and still exports it.
    for cycle in 1..=config.analysis.max_continuations {
        let offset = session.resume_offset();
        info!("▶️  Continuation {} (resuming after scene {})", cycle, offset);

        match analyzer.analyze(&payload, &style, offset).await {
            Ok(result) => match session.absorb(result.scenes) {
                Continuation::Appended(count) => info!("✅ Recovered {} more scene(s)", count),
                Continuation::Exhausted => {
                    info!("ℹ️  No further scenes available");
                    break;
                }
            },
            Err(e) => {
                error!("Continuation cycle failed: {}", e);
                break;
            }
        }
    }

    let export = session.export_text();

    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let stem = video_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("export");
            config
                .output
                .output_dir
                .join(format!("veo_prompts_{}.txt", stem))
        });

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output_path, &export).await?;

    if matches.get_flag("print") {
        println!("{}", export);
    }

    info!(
        "🎉 Done in {:.2}s: {} scene(s) exported to {}",
        start_time.elapsed().as_secs_f64(),
        session.len(),
        output_path.display()
    );

    Ok(())
}
