//! Rank command implementations for the Huddle CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use huddle_core::{
    GroupCandidate, GroupStatus, MemoryGroupSource, MemoryInterestSource, parse_tag_payload,
};
use huddle_fs::open_utf8_file;
use huddle_ranker::{InterestRanker, InterestRequest, PopularityRanker, PopularityRequest};

use crate::{
    ARG_GROUPS, ARG_INTERESTS, ARG_REQUEST, CliError, ENV_INTERESTS_GROUPS,
    ENV_INTERESTS_REQUEST, ENV_POPULAR_GROUPS, ENV_POPULAR_REQUEST,
};

/// CLI arguments for the `popular` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate study groups by popularity blended with \
                 proximity. The request is a JSON-encoded PopularityRequest; \
                 candidates come from a JSON fixture of group records.",
    about = "Rank groups by popularity"
)]
#[ortho_config(prefix = "HUDDLE")]
pub(crate) struct PopularArgs {
    /// Path to a JSON file containing a PopularityRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON file of candidate group records.
    #[arg(long = ARG_GROUPS, value_name = "path")]
    #[serde(default)]
    pub(crate) groups: Option<Utf8PathBuf>,
}

impl PopularArgs {
    fn into_config(self) -> Result<PopularConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PopularConfig::try_from(merged)
    }
}

/// Resolved `popular` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PopularConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) groups_path: Utf8PathBuf,
}

impl PopularConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)?;
        require_existing(&self.groups_path, ARG_GROUPS)?;
        Ok(())
    }
}

impl TryFrom<PopularArgs> for PopularConfig {
    type Error = CliError;

    fn try_from(args: PopularArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_POPULAR_REQUEST,
        })?;
        let groups_path = args.groups.ok_or(CliError::MissingArgument {
            field: ARG_GROUPS,
            env: ENV_POPULAR_GROUPS,
        })?;
        Ok(Self {
            request_path,
            groups_path,
        })
    }
}

/// CLI arguments for the `interests` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate study groups by interest-tag similarity \
                 blended with proximity. The request is a JSON-encoded \
                 InterestRequest; candidates and user tags come from JSON \
                 fixtures.",
    about = "Rank groups by interest match"
)]
#[ortho_config(prefix = "HUDDLE")]
pub(crate) struct InterestsArgs {
    /// Path to a JSON file containing an InterestRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON file of candidate group records.
    #[arg(long = ARG_GROUPS, value_name = "path")]
    #[serde(default)]
    pub(crate) groups: Option<Utf8PathBuf>,
    /// Path to a JSON file of user interest records; omit for no tags.
    #[arg(long = ARG_INTERESTS, value_name = "path")]
    #[serde(default)]
    pub(crate) interests: Option<Utf8PathBuf>,
}

impl InterestsArgs {
    fn into_config(self) -> Result<InterestsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InterestsConfig::try_from(merged)
    }
}

/// Resolved `interests` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InterestsConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) groups_path: Utf8PathBuf,
    pub(crate) interests_path: Option<Utf8PathBuf>,
}

impl InterestsConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)?;
        require_existing(&self.groups_path, ARG_GROUPS)?;
        if let Some(path) = &self.interests_path {
            require_existing(path, ARG_INTERESTS)?;
        }
        Ok(())
    }
}

impl TryFrom<InterestsArgs> for InterestsConfig {
    type Error = CliError;

    fn try_from(args: InterestsArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_INTERESTS_REQUEST,
        })?;
        let groups_path = args.groups.ok_or(CliError::MissingArgument {
            field: ARG_GROUPS,
            env: ENV_INTERESTS_GROUPS,
        })?;
        Ok(Self {
            request_path,
            groups_path,
            interests_path: args.interests,
        })
    }
}

/// Denormalized group row as exported by the external query layer.
///
/// Tags arrive as the raw JSON-encoded column value; conversion to a typed
/// list, with the malformed-payload fallback, happens here so the engine
/// only ever sees parsed lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupRecord {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    member_count: u32,
    #[serde(default)]
    max_members: u32,
    #[serde(default)]
    status: GroupStatus,
    lat: f64,
    lng: f64,
    #[serde(default)]
    distance_km: Option<f64>,
    #[serde(default)]
    tags: Option<String>,
}

impl GroupRecord {
    fn into_candidate(self) -> GroupCandidate {
        let tags = self
            .tags
            .map(|payload| parse_tag_payload(self.id, &payload))
            .unwrap_or_default();
        let mut candidate = GroupCandidate::new(
            self.id,
            self.title,
            Coord {
                x: self.lng,
                y: self.lat,
            },
        )
        .with_members(self.member_count, self.max_members)
        .with_status(self.status)
        .with_tags(tags);
        candidate.description = self.description;
        candidate.distance_km = self.distance_km;
        candidate
    }
}

/// One user's interest tags, as exported by the user-profile store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InterestRecord {
    user_id: u64,
    #[serde(default)]
    tags: Vec<String>,
}

pub(crate) fn run_popular(args: PopularArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_popular_with(args, &mut stdout)
}

pub(crate) fn run_popular_with(
    args: PopularArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request: PopularityRequest = load_json(&config.request_path, ARG_REQUEST)?;
    let source = load_group_source(&config.groups_path)?;
    let ranking = PopularityRanker::new(source)
        .rank(&request)
        .map_err(|source| CliError::Rank { source })?;
    write_ranking(writer, &ranking)
}

pub(crate) fn run_interests(args: InterestsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_interests_with(args, &mut stdout)
}

pub(crate) fn run_interests_with(
    args: InterestsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request: InterestRequest = load_json(&config.request_path, ARG_REQUEST)?;
    let source = load_group_source(&config.groups_path)?;
    let interests = load_interest_source(config.interests_path.as_deref())?;
    let ranking = InterestRanker::new(source, interests)
        .rank(&request)
        .map_err(|source| CliError::Rank { source })?;
    write_ranking(writer, &ranking)
}

fn load_group_source(path: &Utf8Path) -> Result<MemoryGroupSource, CliError> {
    let records: Vec<GroupRecord> = load_json(path, ARG_GROUPS)?;
    Ok(MemoryGroupSource::with_groups(
        records.into_iter().map(GroupRecord::into_candidate),
    ))
}

fn load_interest_source(path: Option<&Utf8Path>) -> Result<MemoryInterestSource, CliError> {
    let Some(path) = path else {
        return Ok(MemoryInterestSource::new());
    };
    let records: Vec<InterestRecord> = load_json(path, ARG_INTERESTS)?;
    Ok(records
        .into_iter()
        .fold(MemoryInterestSource::new(), |source, record| {
            source.with_tags(record.user_id, record.tags)
        }))
}

/// Load a JSON-encoded value from disk.
fn load_json<T: serde::de::DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn write_ranking<T: Serialize>(writer: &mut dyn Write, ranking: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(ranking).map_err(CliError::SerializeRanking)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match huddle_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
