//! pr3conv - Converts parsed 3D scenes into PR3 containers
//!
//! Reads a scene (JSON dump or glTF), welds every mesh into a vertex-indexed
//! triangle list, writes the PR3 model container and optionally flattens the
//! armature into a PR3R rig container.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pr3_assets::{load_scene, AssetError};
use pr3_format::{encode_model, encode_rig, FormatError};
use pr3_mesh::{GeometryAssembler, MeshError, SkeletonExtractor};

use settings::ConvertSettings;

/// PR3 converter arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pr3conv",
    version,
    about = "Convert a parsed 3D scene into PR3 model and rig containers"
)]
struct Args {
    /// Scene file (.json scene dump, .gltf or .glb)
    input: PathBuf,

    /// Model container to write
    output_model: PathBuf,

    /// Rig container to write (skipped when absent)
    output_rig: Option<PathBuf>,

    /// Settings file to use instead of the default lookup
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model container version (1 = legacy, 2 = compact)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2))]
    format_version: Option<u32>,

    /// Name of the armature node
    #[arg(long, value_name = "NAME")]
    armature: Option<String>,

    /// Save the effective settings to the user config directory
    #[arg(long)]
    save_config: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Fold command-line overrides into the loaded settings.
    fn apply(&self, settings: &mut ConvertSettings) {
        if let Some(version) = self.format_version {
            settings.format.version = version;
        }
        if let Some(armature) = &self.armature {
            settings.rig.armature = armature.clone();
        }
        match self.verbose {
            0 => {}
            1 => settings.log.level = "debug".to_string(),
            _ => settings.log.level = "trace".to_string(),
        }
    }

    /// Rig destination, if one is wanted.
    fn rig_path(&self, settings: &ConvertSettings) -> Option<PathBuf> {
        self.output_rig.clone().or_else(|| {
            settings
                .rig
                .always_write
                .then(|| self.output_model.with_extension("pr3r"))
        })
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn try_main(args: &Args) -> Result<()> {
    // Bootstrap subscriber for messages emitted while loading settings
    let bootstrap = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    let mut settings = tracing::subscriber::with_default(bootstrap, || {
        ConvertSettings::load(args.config.as_deref())
    })?;
    args.apply(&mut settings);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.level))
        .with_context(|| format!("Invalid log level '{}'", settings.log.level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    convert(args, &settings)?;

    if args.save_config {
        settings.save()?;
    }
    Ok(())
}

/// Run the whole pipeline. Containers are encoded in memory and each written
/// with a single call, so a failed conversion leaves no partial output.
fn convert(args: &Args, settings: &ConvertSettings) -> Result<()> {
    let version = settings.format.model_version()?;
    info!(
        "Converting '{}' (format version {})",
        args.input.display(),
        version.as_u32()
    );

    let scene = load_scene(&args.input)?;
    let model = GeometryAssembler::new(&scene)
        .with_armature(&settings.rig.armature)
        .build_model()?;
    let model_bytes = encode_model(&model, version)?;

    let rig = match args.rig_path(settings) {
        Some(path) => {
            let rig = SkeletonExtractor::new(&scene, &settings.rig.armature)?.extract()?;
            Some((path, encode_rig(&rig)?))
        }
        None => {
            debug!("No rig output requested");
            None
        }
    };

    write_output(&args.output_model, &model_bytes)?;
    info!(
        "Wrote {} objects ({} vertices, {} faces) to '{}'",
        model.objects.len(),
        model.vertex_count(),
        model.face_count(),
        args.output_model.display()
    );

    if let Some((path, bytes)) = rig {
        write_output(&path, &bytes)?;
        info!("Wrote rig to '{}'", path.display());
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {:?}", path))
}

/// Map the root cause of a failure to the process exit code.
fn exit_code(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if cause.is::<AssetError>() {
            return 3;
        }
        if cause.is::<MeshError>() {
            return 4;
        }
        if cause.is::<FormatError>() || cause.is::<pr3_codec::CodecError>() {
            return 5;
        }
    }
    1
}
