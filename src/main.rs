//! `shaderlab` demo binary: opens a window and runs the selected renderer
//! with the free-look camera.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shaderlab::options::{Kernel, Options, RendererKind};
use shaderlab::{DemoError, Viewer};

/// Free-look camera demos rendered by GPU compute kernels or a CPU ray
/// tracer.
#[derive(Debug, Parser)]
#[command(name = "shaderlab", version)]
struct Cli {
    /// Renderer: `compute` or `cpu`.
    #[arg(long)]
    renderer: Option<RendererKind>,

    /// Compute kernel: `scene`, `spotlight` or `plasma`.
    #[arg(long)]
    kernel: Option<Kernel>,

    /// TOML options file; missing fields use defaults.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    print_schema: bool,

    /// Write the effective options to FILE and exit.
    #[arg(long, value_name = "FILE")]
    save_options: Option<PathBuf>,
}

impl Cli {
    fn resolve_options(&self) -> Result<Options, DemoError> {
        let mut options = match &self.options {
            Some(path) => {
                log::info!("loading options from {}", path.display());
                Options::load(path)?
            }
            None => Options::default(),
        };
        if let Some(kind) = self.renderer {
            options.renderer.kind = kind;
        }
        if let Some(kernel) = self.kernel {
            options.renderer.kernel = kernel;
        }
        Ok(options)
    }
}

#[allow(clippy::print_stdout)]
fn print_schema() -> Result<(), DemoError> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| DemoError::OptionsParse(e.to_string()))?;
    println!("{schema}");
    Ok(())
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    if cli.print_schema {
        return print_schema();
    }

    let options = cli.resolve_options()?;

    if let Some(path) = &cli.save_options {
        options.save(path)?;
        log::info!("options written to {}", path.display());
        return Ok(());
    }

    Viewer::builder().with_options(options).build().run()
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
