//! xccdf-bundle CLI - Security content parsing and tailoring tool
//!
//! Parses an XCCDF datastream into profile, rule and variable records kept
//! in a directory store, and builds XCCDF tailoring documents for profiles
//! in that store.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod error;
mod output;
mod store;

use error::{CliError, Result};
use output::ParseSummary;
use store::{BundleStatus, DataStreamStatus, RecordStore};

use xccdf_bundle::observability::{self, ObservabilityConfig};
use xccdf_bundle::parser::{read_content, ParseError, RecordKind, SinkResult};
use xccdf_bundle::tailoring::{
    resolve_variable_overrides, tailored_profile_id, tailored_profile_to_xml,
};
use xccdf_bundle::xccdf::prefixed_name;
use xccdf_bundle::{
    ContentDocument, ContentParser, ParserConfig, Profile, TailoringOverrideSpec, TextMode,
    Variable,
};

/// xccdf-bundle - XCCDF content parser and tailoring generator
#[derive(Parser)]
#[command(name = "xccdf-bundle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a parser configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a content file into the record store
    Parse {
        /// Content file (datastream or benchmark)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Bundle name, used to prefix record names
        #[arg(short, long)]
        bundle: Option<String>,

        /// Namespace of the bundle
        #[arg(short, long)]
        namespace: Option<String>,

        /// How descriptive text is extracted
        #[arg(long, value_enum)]
        text_mode: Option<TextModeArg>,

        /// Store directory
        #[arg(short, long, env = "XCCDF_STORE_DIR", default_value = "xccdf-store")]
        output: PathBuf,
    },

    /// Build a tailoring document from an override spec
    Tailor {
        /// Override spec (YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Store directory
        #[arg(short, long, env = "XCCDF_STORE_DIR", default_value = "xccdf-store")]
        output: PathBuf,

        /// Print the document instead of writing it to the store
        #[arg(long)]
        stdout: bool,
    },

    /// Show a stored record
    Show {
        /// Record kind
        #[arg(value_enum)]
        kind: KindArg,

        /// Record name (bundle-prefixed)
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Store directory
        #[arg(short, long, env = "XCCDF_STORE_DIR", default_value = "xccdf-store")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TextModeArg {
    Raw,
    Rendered,
}

impl From<TextModeArg> for TextMode {
    fn from(arg: TextModeArg) -> Self {
        match arg {
            TextModeArg::Raw => TextMode::Raw,
            TextModeArg::Rendered => TextMode::Rendered,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Profile,
    Rule,
    Variable,
}

impl From<KindArg> for RecordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Profile => RecordKind::Profile,
            KindArg::Rule => RecordKind::Rule,
            KindArg::Variable => RecordKind::Variable,
        }
    }
}

/// Command-line overrides for the parser configuration
#[derive(Default)]
struct ParseOverrides {
    content: Option<PathBuf>,
    bundle: Option<String>,
    namespace: Option<String>,
    text_mode: Option<TextMode>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut obs_config = ObservabilityConfig::from_env();
    if cli.verbose {
        obs_config = obs_config.with_filter("debug");
    }
    if let Err(e) = observability::init(&obs_config) {
        output::warning(&e.to_string());
    }

    let result = match cli.command {
        Commands::Parse {
            content,
            bundle,
            namespace,
            text_mode,
            output,
        } => {
            let overrides = ParseOverrides {
                content,
                bundle,
                namespace,
                text_mode: text_mode.map(Into::into),
            };
            cmd_parse(cli.config.as_deref(), overrides, &output)
        }

        Commands::Tailor {
            spec,
            output,
            stdout,
        } => cmd_tailor(&spec, &output, stdout),

        Commands::Show {
            kind,
            name,
            json,
            output,
        } => cmd_show(&output, kind.into(), &name, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn load_config(config_path: Option<&Path>, overrides: ParseOverrides) -> Result<ParserConfig> {
    let mut config = match config_path {
        Some(path) => ParserConfig::from_file(path)?,
        None => ParserConfig::from_env(),
    };

    if let Some(content) = overrides.content {
        config.content_path = content;
    }
    if let Some(bundle) = overrides.bundle {
        config.bundle_name = bundle;
    }
    if let Some(namespace) = overrides.namespace {
        config.bundle_namespace = namespace;
    }
    if let Some(text_mode) = overrides.text_mode {
        config.text_mode = text_mode;
    }

    config.validate()?;
    Ok(config)
}

fn cmd_parse(config_path: Option<&Path>, overrides: ParseOverrides, output_dir: &Path) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let references = config.reference_parser()?;
    let parser = ContentParser::new(&references).with_text_mode(config.text_mode);
    let store = RecordStore::open(output_dir)?;

    output::info(&format!("Parsing {}...", config.content_path.display()));

    let mut summary = ParseSummary::default();
    let mut existing = 0;
    let outcome = parse_into_store(&parser, &config, &store, &mut summary, &mut existing);

    let content_file = config
        .content_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let status = BundleStatus::new(
        &config.bundle_name,
        &config.bundle_namespace,
        content_file,
        outcome.as_ref().err().map(ToString::to_string),
    );
    store.update_bundle_status(&status)?;

    output::print_parse_result(&status, &summary);
    if existing > 0 {
        output::warning(&format!(
            "{} record(s) already existed and were kept",
            existing
        ));
    }

    outcome.map_err(CliError::from)
}

/// Run the three extraction passes, storing every record
///
/// Profiles, then rules, then variables; a pass that fails stops the run.
fn parse_into_store(
    parser: &ContentParser<'_>,
    config: &ParserConfig,
    store: &RecordStore,
    summary: &mut ParseSummary,
    existing: &mut usize,
) -> std::result::Result<(), ParseError> {
    let text = read_content(&config.content_path)?;
    let doc = ContentDocument::parse(&text)?;
    let bundle = config.bundle_name.as_str();

    summary.profiles = parser.parse_profiles(&doc, |mut profile| {
        profile.name = prefixed_name(bundle, &profile.name);
        for rule in &mut profile.rules {
            rule.name = prefixed_name(bundle, &rule.name);
        }
        store_record(store, RecordKind::Profile, &profile.name, &profile, existing)
    })?;

    summary.rules = parser.parse_rules(&doc, |mut rule| {
        rule.name = prefixed_name(bundle, &rule.name);
        store_record(store, RecordKind::Rule, &rule.name, &rule, existing)
    })?;

    summary.variables = parser.parse_variables(&doc, |mut variable| {
        variable.name = prefixed_name(bundle, &variable.name);
        store_record(store, RecordKind::Variable, &variable.name, &variable, existing)
    })?;

    Ok(())
}

/// Sink body shared by all passes; an existing record is not an error
fn store_record<T: Serialize>(
    store: &RecordStore,
    kind: RecordKind,
    name: &str,
    record: &T,
    existing: &mut usize,
) -> SinkResult {
    tracing::info!(kind = %kind, name, "Creating record");
    match store.create(kind, name, record) {
        Ok(()) => Ok(()),
        Err(CliError::AlreadyExists { .. }) => {
            tracing::info!(kind = %kind, name, "Record already exists");
            *existing += 1;
            Ok(())
        }
        Err(e) => {
            tracing::error!(kind = %kind, name, error = %e, "Couldn't create record");
            Err(e.into())
        }
    }
}

fn cmd_tailor(spec_path: &Path, output_dir: &Path, stdout: bool) -> Result<()> {
    let yaml = std::fs::read_to_string(spec_path).map_err(|source| CliError::FileRead {
        path: spec_path.to_path_buf(),
        source,
    })?;
    let spec = TailoringOverrideSpec::from_yaml_str(&yaml)?;
    spec.validate()?;
    if spec.name.is_empty() {
        return Err(CliError::invalid("name", "tailoring name is required"));
    }
    store::check_record_name(&spec.name)?;

    let store = RecordStore::open(output_dir)?;
    let bundle = store.bundle_status()?;
    if bundle.data_stream_status == DataStreamStatus::Invalid {
        output::warning(&format!(
            "Bundle '{}' is marked invalid; its records may be incomplete",
            bundle.name
        ));
    }

    let base: Profile = store.get(RecordKind::Profile, &spec.extends)?;

    let mut variables = Vec::new();
    for entry in &spec.set_values {
        match store.get::<Variable>(RecordKind::Variable, &entry.name) {
            Ok(variable) => variables.push(variable),
            // Reported as an unknown variable by the resolution below
            Err(CliError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    let overrides = resolve_variable_overrides(&spec, &variables)?;
    let xml = tailored_profile_to_xml(&spec, &base, &bundle.content_file, &overrides)?;

    if stdout {
        print!("{}", xml);
        return Ok(());
    }

    let path = store.write_tailoring(&spec.name, &xml)?;
    output::success(&format!("Wrote {}", path.display()));
    output::info(&format!("Tailored profile: {}", tailored_profile_id(&spec)));

    Ok(())
}

fn cmd_show(output_dir: &Path, kind: RecordKind, name: &str, json: bool) -> Result<()> {
    let store = RecordStore::open(output_dir)?;
    let record: serde_yaml::Value = store.get(kind, name)?;

    if json {
        output::print_json(&record)?;
    } else {
        output::print_yaml(&record)?;
    }

    Ok(())
}
