use crate::domain::descriptor::{SinkDescriptor, SourceDescriptor};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tabular-etl")]
#[command(about = "This script serves to do some cleaning of the provided data.")]
pub struct CliConfig {
    #[arg(long = "input_mode", default_value = "local", value_parser = ["local", "http", "api"], help = "Input mode (local, http, or api)")]
    pub input_mode: String,

    #[arg(long = "input_file_path", default_value = "./data/input/title.basics.tsv.gz", help = "Path to the input file (local, http, or api)")]
    pub input_file_path: String,

    #[arg(long = "input_file_format", default_value = "tsv", value_parser = ["tsv", "csv", "parquet"], help = "Input file format. For now this supports tsv, csv and parquet")]
    pub input_file_format: String,

    #[arg(long = "output_mode", default_value = "local", value_parser = ["local", "s3"], help = "Output mode (local, s3)")]
    pub output_mode: String,

    #[arg(long = "output_file_path", default_value = "./data/output/sample.csv", help = "Name for the output file")]
    pub output_file_path: String,

    #[arg(long = "output_file_format", default_value = "csv", value_parser = ["tsv", "csv", "parquet"], help = "Output file format. For now this supports tsv, csv and parquet")]
    pub output_file_format: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage for each phase")]
    pub monitor: bool,

    #[arg(long = "json_logs", help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn source_descriptor(&self) -> Result<SourceDescriptor> {
        SourceDescriptor::parse(
            &self.input_mode,
            &self.input_file_path,
            &self.input_file_format,
        )
    }

    pub fn sink_descriptor(&self) -> Result<SinkDescriptor> {
        SinkDescriptor::parse(
            &self.output_mode,
            &self.output_file_path,
            &self.output_file_format,
        )
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let source = self.source_descriptor()?;
        let sink = self.sink_descriptor()?;

        // 驗證輸入來源
        if source.mode().is_remote() {
            validate_url("input_file_path", source.location())?;
        } else {
            validate_path("input_file_path", source.location())?;
        }

        // 驗證輸出目的地
        validate_path("output_file_path", sink.location())?;

        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::{DeclaredFormat, InputMode, OutputMode};

    #[test]
    fn test_defaults_match_title_basics_run() {
        let config = CliConfig::parse_from(["tabular-etl"]);
        assert_eq!(config.input_mode, "local");
        assert_eq!(config.input_file_format, "tsv");
        assert_eq!(config.output_file_path, "./data/output/sample.csv");
        assert!(config.validate().is_ok());

        let source = config.source_descriptor().unwrap();
        assert_eq!(source.mode(), InputMode::Local);
        assert_eq!(source.declared_format(), &DeclaredFormat::Tsv);
    }

    #[test]
    fn test_underscore_flags() {
        let config = CliConfig::parse_from([
            "tabular-etl",
            "--input_mode",
            "http",
            "--input_file_path",
            "https://datasets.example.com/title.basics.csv",
            "--output_mode",
            "s3",
            "--output_file_path",
            "s3://bucket/out.parquet",
            "--output_file_format",
            "parquet",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.sink_descriptor().unwrap().mode(), OutputMode::S3);
    }

    #[test]
    fn test_remote_input_requires_url() {
        let config = CliConfig::parse_from(["tabular-etl", "--input_mode", "api", "--input_file_path", "not-a-url"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_choice_is_rejected_by_parser() {
        let result = CliConfig::try_parse_from(["tabular-etl", "--output_mode", "gcs"]);
        assert!(result.is_err());
    }
}
