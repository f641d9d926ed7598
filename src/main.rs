use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gateway_stats::{
    init_tracing, run, ChiSquareDof, DegeneratePolicy, NullVisualizer, ReportConfig, SvgVisualizer,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DofChoice {
    /// Four-cell goodness of fit, df = 3 (default)
    GoodnessOfFit,
    /// 2x2 layout, df = 1
    TwoByTwo,
}

impl From<DofChoice> for ChiSquareDof {
    fn from(choice: DofChoice) -> Self {
        match choice {
            DofChoice::GoodnessOfFit => ChiSquareDof::GoodnessOfFit,
            DofChoice::TwoByTwo => ChiSquareDof::TwoByTwo,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gateway-report")]
#[command(about = "Marijuana gateway-drug analysis of the NSDUH 2018 extract", long_about = None)]
#[command(version)]
struct Cli {
    /// Tab-separated survey extract (overrides the configuration file)
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write SVG charts into this directory
    #[arg(long)]
    charts: Option<PathBuf>,

    /// Significance level for the verdicts
    #[arg(long)]
    alpha: Option<f64>,

    /// Degrees of freedom for the chi-square p-value
    #[arg(long, value_enum)]
    dof: Option<DofChoice>,

    /// Fail instead of skipping tests with degenerate samples
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(input) = cli.input {
        config = config.with_input(input);
    }
    if let Some(dir) = cli.charts {
        config = config.with_charts_dir(dir);
    }
    if let Some(alpha) = cli.alpha {
        config = config.with_significance_level(alpha);
    }
    if let Some(dof) = cli.dof {
        config = config.with_chi_square_dof(dof.into());
    }
    if cli.strict {
        config = config.with_on_degenerate(DegeneratePolicy::Abort);
    }

    let report = match &config.charts_dir {
        Some(dir) => {
            let viz = SvgVisualizer::new(dir)
                .with_context(|| format!("failed to create chart directory {}", dir.display()))?;
            run(&config, &viz)
        }
        None => run(&config, &NullVisualizer),
    }
    .with_context(|| format!("report on {} failed", config.input.display()))?;

    println!("{report}");
    Ok(())
}
