use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uuidgen_uuid::{
    CanonicalUuid, GeneratorConfig, UuidVersion, build_generator, parse_namespace, parse_node_id,
};

/// Environment variable holding the default v1 node id.
const NODE_ID_ENV: &str = "UUIDGEN_NODE_ID";

#[derive(Parser)]
#[command(name = "uuidgen")]
#[command(about = "Generate and inspect RFC 9562 UUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time-based UUIDs (Gregorian epoch, node id)
    V1 {
        /// Node id as six hex octets, e.g. 01:23:45:67:89:ab
        /// (defaults to UUIDGEN_NODE_ID, then random)
        #[arg(long)]
        node_id: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// MD5 name-based UUID
    V3 {
        /// dns, url, oid, x500 or a canonical UUID
        namespace: String,
        /// Name to hash within the namespace
        name: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Hyphenated)]
        format: OutputFormat,
    },
    /// Random UUIDs
    V4 {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// SHA-1 name-based UUID
    V5 {
        /// dns, url, oid, x500 or a canonical UUID
        namespace: String,
        /// Name to hash within the namespace
        name: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Hyphenated)]
        format: OutputFormat,
    },
    /// Time-ordered UUIDs (Unix milliseconds, random)
    V7 {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Describe a canonical UUID
    Inspect {
        uuid: String,
        /// Print the description as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Number of UUIDs to generate
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    count: u64,
    #[arg(long, value_enum, default_value_t = OutputFormat::Hyphenated)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 8-4-4-4-12 lowercase hex
    Hyphenated,
    /// 32 lowercase hex characters
    Simple,
    /// urn:uuid: prefix
    Urn,
    /// Wrapped in braces
    Braced,
}

impl OutputFormat {
    fn render(self, uuid: &CanonicalUuid) -> String {
        match self {
            OutputFormat::Hyphenated => uuid.to_string(),
            OutputFormat::Simple => uuid.simple(),
            OutputFormat::Urn => uuid.urn(),
            OutputFormat::Braced => uuid.braced(),
        }
    }
}

/// What `inspect` reports about a UUID.
#[derive(Debug, Serialize)]
struct Inspection {
    uuid: CanonicalUuid,
    version: Option<UuidVersion>,
    version_bits: u8,
    rfc_variant: bool,
    timestamp: Option<DateTime<Utc>>,
}

impl Inspection {
    fn of(uuid: CanonicalUuid) -> Self {
        Self {
            uuid,
            version: uuid.version(),
            version_bits: uuid.version_bits(),
            rfc_variant: uuid.is_rfc_variant(),
            timestamp: uuid.timestamp(),
        }
    }
}

/// Main entry point for the uuidgen command line
///
/// Loads `.env` if present, installs a stderr tracing subscriber filtered by `RUST_LOG`, then
/// runs the requested subcommand with its output on stdout.
///
/// # Environment Variables
/// - `UUIDGEN_NODE_ID`: node id for `v1` when `--node-id` is not given
/// - `RUST_LOG`: tracing filter (default directive: "uuidgen=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uuidgen=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let env_node_id = std::env::var(NODE_ID_ENV).ok();

    let mut stdout = std::io::stdout().lock();
    run(cli.command, env_node_id, &mut stdout)
}

fn run(command: Commands, env_node_id: Option<String>, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::V1 { node_id, output } => {
            let node_id = node_id
                .or(env_node_id)
                .map(|s| parse_node_id(&s))
                .transpose()?;
            let config = GeneratorConfig::new(UuidVersion::V1, None, None, node_id)?;
            generate(&config, &output, out)
        }
        Commands::V3 {
            namespace,
            name,
            format,
        } => {
            let config = name_based_config(UuidVersion::V3, &namespace, name)?;
            generate(&config, &OutputArgs { count: 1, format }, out)
        }
        Commands::V4 { output } => {
            let config = GeneratorConfig::new(UuidVersion::V4, None, None, None)?;
            generate(&config, &output, out)
        }
        Commands::V5 {
            namespace,
            name,
            format,
        } => {
            let config = name_based_config(UuidVersion::V5, &namespace, name)?;
            generate(&config, &OutputArgs { count: 1, format }, out)
        }
        Commands::V7 { output } => {
            let config = GeneratorConfig::new(UuidVersion::V7, None, None, None)?;
            generate(&config, &output, out)
        }
        Commands::Inspect { uuid, json } => inspect(&uuid, json, out),
    }
}

fn name_based_config(
    version: UuidVersion,
    namespace: &str,
    name: String,
) -> anyhow::Result<GeneratorConfig> {
    let namespace = parse_namespace(namespace)?;
    Ok(GeneratorConfig::new(
        version,
        Some(namespace),
        Some(name),
        None,
    )?)
}

fn generate(
    config: &GeneratorConfig,
    output: &OutputArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let generator = build_generator(config)?;

    for _ in 0..output.count {
        let uuid = generator
            .generate()
            .with_context(|| format!("failed to generate {} UUID", config.version()))?;
        writeln!(out, "{}", output.format.render(&uuid))?;
    }

    tracing::debug!("generated {} {} UUID(s)", output.count, config.version());
    Ok(())
}

fn inspect(input: &str, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let uuid = CanonicalUuid::parse(input)?;
    let inspection = Inspection::of(uuid);

    if json {
        serde_json::to_writer_pretty(&mut *out, &inspection)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "uuid:      {}", inspection.uuid)?;
    match inspection.version {
        Some(version) => writeln!(out, "version:   {}", version)?,
        None => writeln!(out, "version:   unknown ({})", inspection.version_bits)?,
    }
    writeln!(
        out,
        "variant:   {}",
        if inspection.rfc_variant {
            "RFC 4122"
        } else {
            "other"
        }
    )?;
    if let Some(timestamp) = inspection.timestamp {
        writeln!(out, "timestamp: {}", timestamp.to_rfc3339())?;
    }
    Ok(())
}
