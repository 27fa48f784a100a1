use log::{debug, info};
use snafu::prelude::*;

use crate::args::Args;
use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "groupBy")]
    pub group_by: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    #[serde(rename = "summaryFile")]
    pub summary_file: Option<String>,
    pub fields: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
}

/// The options of a run, once the command line and the config file are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportSettings {
    pub input: String,
    pub group_by: GroupingMode,
    pub output: String,
    pub summary: Option<String>,
    pub reference: Option<String>,
    pub fields: Option<Vec<String>>,
}

impl ReportSettings {
    /// The command line always wins over the config file.
    pub fn resolve(args: &Args) -> BReportResult<ReportSettings> {
        let (config, root) = match &args.config {
            Some(path) => {
                let config = read_config(path)?;
                let root = Path::new(path).parent().map(|p| p.to_path_buf());
                (config, root)
            }
            None => (ReportConfig::default(), None),
        };
        let from_config = |p: &Option<String>| p.as_ref().map(|s| resolve_path(root.as_deref(), s));

        let input = args
            .input
            .clone()
            .or_else(|| from_config(&config.source.file_path))
            .context(MissingInputSnafu {})?;

        let group_by = match args.group_by.as_ref().or(config.source.group_by.as_ref()) {
            Some(mode) => GroupingMode::parse(mode)?,
            None => GroupingMode::Points,
        };

        let output = args
            .out
            .clone()
            .or_else(|| from_config(&config.output_settings.output_file))
            .unwrap_or_else(|| "stdout".to_string());

        let summary = args
            .summary
            .clone()
            .or_else(|| from_config(&config.output_settings.summary_file));

        Ok(ReportSettings {
            input,
            group_by,
            output,
            summary,
            reference: args.reference.clone(),
            fields: config.output_settings.fields,
        })
    }
}

pub fn read_config(path: &str) -> BReportResult<ReportConfig> {
    info!("Attempting to read config file {:?}", path);
    let config_str = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: ReportConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> BReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// Paths in the config file are relative to the config file itself.
fn resolve_path(root: Option<&Path>, p: &str) -> String {
    match root {
        Some(r) if p != "stdout" && Path::new(p).is_relative() => {
            let full: PathBuf = r.join(p);
            full.display().to_string()
        }
        _ => p.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> Args {
        Args {
            config: None,
            input: Some("points.json".to_string()),
            out: None,
            group_by: None,
            summary: None,
            reference: None,
            verbose: false,
        }
    }

    #[test]
    fn defaults_without_config() {
        let s = ReportSettings::resolve(&bare_args()).unwrap();
        assert_eq!(s.input, "points.json");
        assert_eq!(s.group_by, GroupingMode::Points);
        assert_eq!(s.output, "stdout");
        assert_eq!(s.summary, None);
        assert_eq!(s.fields, None);
    }

    #[test]
    fn unknown_grouping_is_rejected() {
        let mut a = bare_args();
        a.group_by = Some("precinct".to_string());
        let err = ReportSettings::resolve(&a).unwrap_err();
        assert!(matches!(*err, ReportError::UnknownGrouping { .. }));
    }

    #[test]
    fn config_parsing() {
        let config: ReportConfig = serde_json::from_str(
            r#"{"source": {"filePath": "data/points.json"}, "outputSettings": {"summaryFile": "stdout"}}"#,
        )
        .unwrap();
        assert_eq!(config.source.file_path.as_deref(), Some("data/points.json"));
        assert_eq!(config.source.group_by, None);
        assert_eq!(config.output_settings.summary_file.as_deref(), Some("stdout"));

        let empty: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ReportConfig::default());
    }

    #[test]
    fn config_paths_are_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(
            &config,
            r#"{"source": {"filePath": "points.json", "groupBy": "address"},
                "outputSettings": {"outputFile": "/tmp/out.csv", "summaryFile": "stdout"}}"#,
        )
        .unwrap();
        let a = Args {
            config: Some(config.display().to_string()),
            input: None,
            out: None,
            group_by: None,
            summary: None,
            reference: None,
            verbose: false,
        };
        let s = ReportSettings::resolve(&a).unwrap();
        assert_eq!(s.input, dir.path().join("points.json").display().to_string());
        assert_eq!(s.group_by, GroupingMode::Address);
        assert_eq!(s.output, "/tmp/out.csv");
        assert_eq!(s.summary.as_deref(), Some("stdout"));

        // The command line overrides the config.
        let mut b = a.clone();
        b.group_by = Some("city".to_string());
        b.input = Some("other.json".to_string());
        let s = ReportSettings::resolve(&b).unwrap();
        assert_eq!(s.group_by, GroupingMode::City);
        assert_eq!(s.input, "other.json");
    }
}
