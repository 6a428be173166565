use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dti_alps::{AlpsCalculator, LabelSource, MniTemplate, VolumeLoader};

/// Compute the DTI-ALPS index from a diffusion tensor image and
/// Projection / Association ROI labels
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input DTI image file path
    input_dti: PathBuf,

    /// Label that defines the Projection ROI in the DTI image space
    input_proj_label: Option<PathBuf>,

    /// Label that defines the Association ROI in the DTI image space
    input_assoc_label: Option<PathBuf>,

    /// The input DTI is already in MNI space (2 mm). The standard MNI labels
    /// are used instead of the Projection / Association paths.
    #[arg(long, alias = "MNISpace")]
    mni_space: bool,

    /// Directory holding the standard MNI labels
    #[arg(long, env = "DTI_ALPS_MNI_DIR", default_value = "Resources/MNI")]
    mni_dir: PathBuf,

    /// Show more details throughout the processing
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<f64> {
    info!("Input DTI: {}", args.input_dti.display());
    let tensor = VolumeLoader::load_tensor_volume(&args.input_dti)
        .with_context(|| format!("failed to load DTI volume {}", args.input_dti.display()))?;

    let report = if args.mni_space {
        info!("Projection / Association labels: MNI standard from {}", args.mni_dir.display());
        let template = MniTemplate::load(&args.mni_dir).context("failed to load MNI labels")?;
        AlpsCalculator::process(Some(&tensor), LabelSource::Mni(&template))?
    } else {
        let projection = load_optional_label(args.input_proj_label.as_ref())?;
        let association = load_optional_label(args.input_assoc_label.as_ref())?;
        AlpsCalculator::process(
            Some(&tensor),
            LabelSource::Native {
                projection: projection.as_ref(),
                association: association.as_ref(),
            },
        )?
    };

    Ok(report.index)
}

fn load_optional_label(path: Option<&PathBuf>) -> Result<Option<dti_alps::LabelVolume>> {
    path.map(|path| {
        info!("Input label: {}", path.display());
        VolumeLoader::load_label_volume(path)
            .with_context(|| format!("failed to load label volume {}", path.display()))
    })
    .transpose()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(index) => {
            println!("DTI-ALPS index = {index:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
