use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use neon_mask_core::LevelConfig;
use thiserror::Error;

const SHARE_DOMAIN: &str = "neon";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded configuration.
pub(crate) const SHARE_HEADER: &str = "neon:v1";
/// Delimiter used to separate the prefix, level dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes `config` into a single-line string that regenerates the same level.
///
/// The configuration must carry a seed for the code to be reproducible.
pub(crate) fn encode(config: &LevelConfig) -> Result<String, ShareCodeError> {
    let json = serde_json::to_vec(config).map_err(ShareCodeError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!(
        "{SHARE_HEADER}:{}x{}:{encoded}",
        config.width, config.height
    ))
}

/// Decodes a configuration from a share code.
///
/// The dimensions segment is authoritative over the dimensions in the payload.
pub(crate) fn decode(value: &str) -> Result<LevelConfig, ShareCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShareCodeError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(4, FIELD_DELIMITER);
    let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
    let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
    let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
    let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

    if domain != SHARE_DOMAIN {
        return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != SHARE_VERSION {
        return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
    }

    let (width, height) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(ShareCodeError::InvalidEncoding)?;
    let mut config: LevelConfig =
        serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;
    config.width = width;
    config.height = height;
    if config.seed.is_none() {
        return Err(ShareCodeError::MissingSeed);
    }
    Ok(config)
}

/// Errors that can occur while encoding or decoding share codes.
#[derive(Debug, Error)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("share code was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("share code is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("share code is missing the version")]
    MissingVersion,
    /// The dimensions segment was missing.
    #[error("share code is missing the level dimensions")]
    MissingDimensions,
    /// The payload segment was missing.
    #[error("share code is missing the payload")]
    MissingPayload,
    /// The prefix segment named another domain.
    #[error("share code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The version segment named an unknown version.
    #[error("share code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The dimensions segment could not be parsed.
    #[error("could not parse level dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share code payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be converted to or from JSON.
    #[error("could not parse share code payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The payload carried no seed, so the level cannot be reproduced.
    #[error("share code does not carry a seed")]
    MissingSeed,
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ShareCodeError> {
    let invalid = || ShareCodeError::InvalidDimensions(dimensions.to_owned());
    let (width, height) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}
