use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use peekaboo::application::{GalleryPager, PickImagesUseCase, PickRequest};
use peekaboo::domain::entities::{ImageSource, SelectionMode};
use peekaboo::domain::ports::ImageResizerPort;
use peekaboo::infrastructure::{
    AppConfig, CliArgs, Command, DirectoryGallery, DirectoryMediaProvider, ImagePipeline,
    MemoryRasterCache, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = match &args.config {
        Some(path) => StorageManager::at(path.clone()),
        None => StorageManager::new()?,
    };
    let mut config = storage.load_config()?;
    config.merge_with_args(args);
    Ok(config)
}

fn output_provider(config: &AppConfig) -> Result<DirectoryMediaProvider> {
    let dir = config
        .effective_output_dir()
        .ok_or_else(|| eyre!("no output directory configured"))?;
    Ok(DirectoryMediaProvider::new(dir))
}

async fn run_resize(
    config: &AppConfig,
    pipeline: &ImagePipeline,
    path: PathBuf,
    resize: &peekaboo::infrastructure::ResizeArgs,
    out: Option<&Path>,
) -> Result<()> {
    let (options, filter) = config.resize.resolve(resize);
    let source = ImageSource::file(path);
    let bytes = pipeline
        .resize(source.clone(), options, filter)
        .await
        .ok_or_else(|| eyre!("failed to process {source}"))?;

    let written = match out {
        Some(out) => {
            tokio::fs::write(out, &bytes).await?;
            out.to_path_buf()
        }
        None => output_provider(config)?.save_image(&bytes).await?,
    };
    println!("{}", written.display());
    Ok(())
}

async fn run_pick(
    config: &AppConfig,
    pipeline: ImagePipeline,
    dir: PathBuf,
    max: usize,
    resize: &peekaboo::infrastructure::ResizeArgs,
) -> Result<()> {
    let (options, filter) = config.resize.resolve(resize);
    let selection = if max == 1 {
        SelectionMode::Single
    } else {
        SelectionMode::Multiple { max_selection: max }
    };

    let use_case = PickImagesUseCase::new(
        Arc::new(DirectoryMediaProvider::new(dir)),
        Arc::new(pipeline),
    );
    let request = PickRequest::new(selection)
        .with_resize(options)
        .with_filter(filter);
    let response = match use_case.execute(request).await {
        Ok(response) => response,
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Pick failed, retrying may succeed");
            return Err(eyre!(e).wrap_err("pick failed temporarily, try again"));
        }
        Err(e) => return Err(e.into()),
    };

    let output = output_provider(config)?;
    for bytes in &response.images {
        println!("{}", output.save_image(bytes).await?.display());
    }
    if response.dropped > 0 {
        eprintln!("{} image(s) could not be processed", response.dropped);
    }
    Ok(())
}

async fn run_gallery(
    config: &AppConfig,
    dir: PathBuf,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let pager = GalleryPager::new(Arc::new(DirectoryGallery::new(dir)));
    let page_size = page_size.unwrap_or(config.gallery.page_size);
    let result = pager.load(Some(page), page_size).await?;

    for image in &result.data {
        let modified = image
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!("{:>20}  {}  {}", image.id, modified, image.path.display());
    }
    println!(
        "page {page} of {} entries, prev: {:?}, next: {:?}",
        pager.count().await?,
        result.prev_key,
        result.next_key
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = peekaboo::VERSION, "Starting Peekaboo");

    let cache = Arc::new(MemoryRasterCache::with_sizing(config.cache.sizing()));
    let pipeline = ImagePipeline::new(cache.clone(), config.resize.max_concurrent_decodes);

    match args.command {
        Command::Resize { path, resize, out } => {
            run_resize(&config, &pipeline, path, &resize, out.as_deref()).await?;
        }
        Command::Pick { dir, max, resize } => {
            run_pick(&config, pipeline, dir, max, &resize).await?;
        }
        Command::Gallery {
            dir,
            page,
            page_size,
        } => {
            run_gallery(&config, dir, page, page_size).await?;
        }
    }

    info!(stats = %cache.stats(), "Done");
    Ok(())
}
