use clap::{Parser, Subcommand};

use crate::probe::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Parser)]
#[command(name = "synprobe", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe one URL and publish the result record to the events service
    RunTest {
        /// Events schema to publish into
        schema_name: String,

        /// Probe this URL instead of a random candidate
        #[arg(long)]
        url: Option<String>,

        /// Measurement correlation id attached to the record
        #[arg(long, default_value = "U")]
        mesid: String,

        /// Probe request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Register the record schema with the events service
    CreateSchema { schema_name: String },

    /// Delete the schema from the events service
    DeleteSchema { schema_name: String },

    /// Run `select * from <schema>` and print the response
    Query { schema_name: String },

    /// Fetch the synthetic-test metric series from the controller
    ControllerMetric,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_test_defaults() {
        let cli = Cli::parse_from(["synprobe", "run-test", "mysch"]);
        match cli.command {
            Command::RunTest {
                schema_name,
                url,
                mesid,
                timeout_secs,
            } => {
                assert_eq!(schema_name, "mysch");
                assert!(url.is_none());
                assert_eq!(mesid, "U");
                assert_eq!(timeout_secs, DEFAULT_TIMEOUT_SECS);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(Cli::try_parse_from(["synprobe", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["synprobe"]).is_err());
    }
}
