use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use schemefit::{
    recommend, AppConfig, Catalog, CatalogStats, MatchSummary, ModelStore, RankingEngine,
    Recommendation, SocialCategory, UserProfile,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Rank government welfare schemes for a citizen profile
#[derive(Parser, Debug)]
#[command(name = "schemefit")]
#[command(about = "Rank welfare schemes against a citizen profile", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// JSON configuration file with optional index/ranking/policy/keywords sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit the vector spaces over a catalog and save the model
    Build {
        #[arg(long)]
        catalog: PathBuf,

        #[arg(long, default_value = "./model")]
        model_dir: PathBuf,
    },

    /// Rank schemes for one profile and print them as JSON
    Match(MatchArgs),

    /// Print catalog statistics as JSON
    Stats {
        #[arg(long)]
        catalog: PathBuf,

        /// Number of categories to list
        #[arg(long, default_value_t = CatalogStats::DEFAULT_TOP_CATEGORIES)]
        top_categories: usize,
    },
}

const PROFILE_FLAGS: [&str; 8] = [
    "age",
    "income",
    "occupation",
    "category",
    "location",
    "education",
    "family_size",
    "years_experience",
];

#[derive(Args, Debug)]
struct MatchArgs {
    /// Catalog CSV to fit on the fly
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory holding a saved model
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Profile as a JSON file or inline JSON object with all eight fields
    #[arg(long, conflicts_with_all = PROFILE_FLAGS)]
    profile: Option<String>,

    #[arg(long, required_unless_present = "profile")]
    age: Option<u32>,

    /// Annual income in rupees
    #[arg(long, required_unless_present = "profile")]
    income: Option<f64>,

    #[arg(long, required_unless_present = "profile")]
    occupation: Option<String>,

    /// General, SC, ST, OBC, WOMEN or MINORITY
    #[arg(long, required_unless_present = "profile")]
    category: Option<SocialCategory>,

    #[arg(long, required_unless_present = "profile")]
    location: Option<String>,

    #[arg(long, required_unless_present = "profile")]
    education: Option<String>,

    #[arg(long, required_unless_present = "profile", value_parser = clap::value_parser!(u32).range(1..))]
    family_size: Option<u32>,

    #[arg(long, required_unless_present = "profile")]
    years_experience: Option<u32>,

    #[arg(long, default_value_t = 15)]
    top_n: usize,

    #[arg(long, default_value_t = 0.0)]
    min_confidence: f64,

    /// Use the recommendation policy (strict query with a looser fallback)
    #[arg(long)]
    recommend: bool,
}

impl MatchArgs {
    fn profile(&self) -> anyhow::Result<UserProfile> {
        let Some(source) = &self.profile else {
            return Ok(UserProfile {
                age: required(&self.age, "age")?,
                income: required(&self.income, "income")?,
                occupation: required(&self.occupation, "occupation")?,
                category: required(&self.category, "category")?,
                location: required(&self.location, "location")?,
                education: required(&self.education, "education")?,
                family_size: required(&self.family_size, "family-size")?,
                years_experience: required(&self.years_experience, "years-experience")?,
            });
        };

        let text = if source.trim_start().starts_with('{') {
            source.clone()
        } else {
            std::fs::read_to_string(source)
                .with_context(|| format!("reading profile from {source}"))?
        };
        serde_json::from_str(&text).context("parsing profile JSON")
    }
}

fn required<T: Clone>(value: &Option<T>, flag: &str) -> anyhow::Result<T> {
    value
        .clone()
        .with_context(|| format!("--{flag} is required unless --profile is given"))
}

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let log_level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout is reserved for JSON output
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match EnvFilter::try_from_default_env() {
        Ok(filter) => tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())?,
        Err(_) => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}

fn build_engine(catalog: &Path, config: &AppConfig) -> anyhow::Result<RankingEngine> {
    let catalog = Catalog::from_path(catalog)
        .with_context(|| format!("loading catalog {}", catalog.display()))?;
    let engine = RankingEngine::build(
        catalog,
        &config.index,
        config.keywords.clone(),
        config.ranking.clone(),
    )?;
    Ok(engine)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), value)?;
    println!();
    Ok(())
}

fn run_match(args: &MatchArgs, config: &AppConfig, config_path: Option<&Path>) -> anyhow::Result<()> {
    let profile = args.profile()?;
    let engine = load_engine(args, config, config_path)?;

    let output = if args.recommend {
        recommend(&engine, &profile, &config.policy)
    } else {
        let results = engine.rank(&profile, args.top_n, args.min_confidence);
        let summary = MatchSummary::compute(&results, engine.total_schemes());
        Recommendation {
            results,
            summary,
            used_fallback: false,
        }
    };

    info!(
        "{} schemes matched, {} eligible",
        output.summary.results_count, output.summary.eligible_count
    );
    print_json(&output)
}

/// Saved model when `--model-dir` holds one, otherwise a fresh fit of `--catalog`
fn load_engine(
    args: &MatchArgs,
    config: &AppConfig,
    config_path: Option<&Path>,
) -> anyhow::Result<RankingEngine> {
    let stored = match &args.model_dir {
        Some(dir) if dir.is_dir() => {
            let store = ModelStore::new(dir)?;
            store.exists().then_some(store)
        }
        _ => None,
    };

    match (stored, &args.catalog) {
        (Some(store), _) => {
            if let Some(path) = config_path {
                warn!(
                    "Loading saved model from {}; index, ranking and keyword settings in {} are ignored",
                    store.dir().display(),
                    path.display()
                );
            }
            store
                .load()
                .with_context(|| format!("loading model from {}", store.dir().display()))
        }
        (None, Some(catalog)) => build_engine(catalog, config),
        (None, None) => bail!("no saved model found and no --catalog given"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = match &cli.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    info!("schemefit v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Build { catalog, model_dir } => {
            let engine = build_engine(catalog, &config)?;
            let store = ModelStore::new(model_dir)?;
            let metadata = store.save(&engine)?;
            print_json(&metadata)?;
        }
        Command::Match(args) => run_match(args, &config, cli.config.as_deref())?,
        Command::Stats {
            catalog,
            top_categories,
        } => {
            let catalog = Catalog::from_path(catalog)
                .with_context(|| format!("loading catalog {}", catalog.display()))?;
            print_json(&CatalogStats::compute(&catalog, *top_categories))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn match_args(argv: &[&str]) -> Result<MatchArgs, clap::Error> {
        let mut full = vec!["schemefit", "match", "--catalog", "schemes.csv"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full)?.command {
            Command::Match(args) => Ok(args),
            other => panic!("expected match command, got {other:?}"),
        }
    }

    const FLAGS: [&str; 16] = [
        "--age", "65", "--income", "80000", "--occupation", "Retired", "--category", "General",
        "--location", "Maharashtra", "--education", "Graduate", "--family-size", "2",
        "--years-experience", "40",
    ];

    #[test]
    fn test_profile_flags_are_required() {
        let err = match_args(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = match_args(&["--age", "65", "--income", "80000"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_profile_from_flags() {
        let profile = match_args(&FLAGS).unwrap().profile().unwrap();
        assert_eq!(profile.age, 65);
        assert_eq!(profile.income, 80000.0);
        assert_eq!(profile.category, SocialCategory::General);
        assert_eq!(profile.location, "Maharashtra");
        assert_eq!(profile.family_size, 2);
        assert_eq!(profile.years_experience, 40);
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let mut argv = FLAGS;
        argv[1] = "sixty";
        assert_eq!(match_args(&argv).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_zero_family_size_rejected() {
        let mut argv = FLAGS;
        argv[13] = "0";
        assert_eq!(match_args(&argv).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_incomplete_profile_json_rejected() {
        let args = match_args(&["--profile", r#"{"income": 80000}"#]).unwrap();
        assert!(args.profile().is_err());
    }

    #[test]
    fn test_profile_json_conflicts_with_flags() {
        let err = match_args(&["--profile", "{}", "--age", "65"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_missing_model_dir_is_not_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("model");
        let missing_arg = missing.to_string_lossy().into_owned();

        let argv = ["schemefit", "match", "--model-dir", missing_arg.as_str()];
        let args = match Cli::try_parse_from(argv.iter().copied().chain(FLAGS)).unwrap().command {
            Command::Match(args) => args,
            other => panic!("expected match command, got {other:?}"),
        };

        assert!(load_engine(&args, &AppConfig::default(), None).is_err());
        assert!(!missing.exists());
    }
}
