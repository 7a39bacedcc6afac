use clap::{Parser, ValueEnum};
use provmerge_observability::LogFormat;
use provmerge_store::config::{DEFAULT_ADDRESS, DEFAULT_DATABASE, DEFAULT_SCHEME, DEFAULT_USER};
use provmerge_store::{ConnectionParams, DEFAULT_BATCH_SIZE, ImportConfig};

/// Standard input, when given as an input path.
pub const STDIN: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// W3C PROV-JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreChoice {
    Neo4j,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatChoice {
    Text,
    Json,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Text => LogFormat::Text,
            LogFormatChoice::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "provmerge")]
#[command(about = "Merge PROV documents into a property graph database", long_about = None)]
pub struct Cli {
    /// PROV documents to import; `-` reads standard input.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Serialization of the inputs.
    #[arg(long, value_enum, default_value_t = InputFormat::Json)]
    pub format: InputFormat,

    /// Graph database address as host:port.
    #[arg(long, env = "PROVMERGE_ADDRESS", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    #[arg(long, env = "PROVMERGE_USER", default_value = DEFAULT_USER)]
    pub user: String,

    #[arg(long, env = "PROVMERGE_PASSWORD", default_value = "", hide_env_values = true, hide_default_value = true)]
    pub password: String,

    /// Target database, created when missing.
    #[arg(long, env = "PROVMERGE_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// bolt, bolt+s, bolt+ssc, http, https, http+s or http+ssc.
    #[arg(long, env = "PROVMERGE_SCHEME", default_value = DEFAULT_SCHEME)]
    pub scheme: String,

    /// Nodes or edges per transaction.
    #[arg(long, env = "PROVMERGE_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Store backend; `memory` performs a dry run.
    #[arg(long, value_enum, default_value_t = StoreChoice::Neo4j)]
    pub store: StoreChoice,

    #[arg(long, value_enum, default_value_t = LogFormatChoice::Text)]
    pub log_format: LogFormatChoice,

    /// Log progress at info level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub inputs: Vec<String>,
    pub format: InputFormat,
    pub store: StoreChoice,
    pub connection: ConnectionParams,
    pub import: ImportConfig,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<RunConfig> {
        let stdin_inputs = self.inputs.iter().filter(|input| *input == STDIN).count();
        if stdin_inputs > 1 {
            anyhow::bail!("standard input can only be read once");
        }
        let import = ImportConfig::new(self.batch_size)?;
        let connection = ConnectionParams::new(self.address, self.user, self.password)
            .with_database(self.database)
            .with_scheme(self.scheme);
        Ok(RunConfig { inputs: self.inputs, format: self.format, store: self.store, connection, import })
    }
}
