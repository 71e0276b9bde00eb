use rshelf::{LibraryWriter, VirtualLibrary};
use anyhow::Result;
use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

struct Config {
    num_artists: usize,
    albums_min: usize,
    albums_max: usize,
    tracks_min: usize,
    tracks_max: usize,
    seed: u64,
    output_file: Option<String>,
    use_brotli: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_artists: 200,
            albums_min: 1,
            albums_max: 8,
            tracks_min: 4,
            tracks_max: 16,
            seed: 42,
            output_file: None,
            use_brotli: false,
        }
    }
}

/// Parses `<N> [M]` starting at `args[*i]`; a missing or non-numeric `M` means `N..=N`.
fn parse_range(args: &[String], i: &mut usize, flag: &str) -> Result<(usize, usize)> {
    *i += 1;
    if *i >= args.len() {
        anyhow::bail!("{} requires at least one argument", flag);
    }
    let min: usize = args[*i].parse()?;
    if let Some(max) = args.get(*i + 1).and_then(|next| next.parse::<usize>().ok()) {
        *i += 1;
        return Ok((min, max));
    }
    Ok((min, min))
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-artists" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-artists requires an argument");
                }
                config.num_artists = args[i].parse()?;
            }
            "-albums" => {
                (config.albums_min, config.albums_max) = parse_range(&args, &mut i, "-albums")?;
            }
            "-tracks" => {
                (config.tracks_min, config.tracks_max) = parse_range(&args, &mut i, "-tracks")?;
            }
            "-seed" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-seed requires an argument");
                }
                config.seed = args[i].parse()?;
            }
            "-out" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-out requires a file path argument");
                }
                config.output_file = Some(args[i].clone());
            }
            "-brotli" => {
                config.use_brotli = true;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    if config.albums_max < config.albums_min || config.tracks_max < config.tracks_min {
        anyhow::bail!("range maximum must not be below its minimum");
    }

    Ok(config)
}

fn print_help() {
    println!("Synthetic Music Library Generator");
    println!("Usage: shelf-libgen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -artists <N>           Number of artists (default: 200)");
    println!("  -albums <N> [M]        Albums per artist, N..=M (default: 1 8)");
    println!("  -tracks <N> [M]        Tracks per album, N..=M (default: 4 16)");
    println!("  -seed <S>              Random seed (default: 42)");
    println!("  -out <FILE>            Output file (default: library.jsonl)");
    println!("  -brotli                Compress output (default file: library.jsonl.br)");
    println!("  -h, -help, --help      Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  shelf-libgen -artists 5000 -albums 1 12 -out big.jsonl.br");
    println!("  shelf-libgen -tracks 10 -seed 7 -brotli");
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rshelf=info,shelf_libgen=info")),
        )
        .init();

    let config = parse_args()?;

    let output_path = config.output_file.clone()
        .unwrap_or_else(|| {
            if config.use_brotli {
                "library.jsonl.br".to_string()
            } else {
                "library.jsonl".to_string()
            }
        });

    let library = VirtualLibrary::with_config(
        config.num_artists,
        (config.albums_min, config.albums_max),
        (config.tracks_min, config.tracks_max),
        config.seed,
    )
    .generate();

    let mut writer = LibraryWriter::new(&output_path)?;
    writer.write_library(
        &library,
        serde_json::json!({
            "tool": "shelf-libgen v0.1",
            "seed": config.seed,
        }),
    )?;

    info!(
        path = %output_path,
        artists = library.artists().len(),
        albums = library.albums().len(),
        tracks = library.tracks().len(),
        "library written"
    );

    Ok(())
}
