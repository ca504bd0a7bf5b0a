//! Provenance of initialized workspace content.

use crate::errors::ContentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of content source produced a workspace's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InitSource {
    #[default]
    #[serde(rename = "from-other")]
    FromOther,
    #[serde(rename = "from-backup")]
    FromBackup,
    #[serde(rename = "from-prebuild")]
    FromPrebuild,
    #[serde(rename = "from-vcs")]
    FromVersionControl,
}

impl InitSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitSource::FromOther => "from-other",
            InitSource::FromBackup => "from-backup",
            InitSource::FromPrebuild => "from-prebuild",
            InitSource::FromVersionControl => "from-vcs",
        }
    }
}

impl fmt::Display for InitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitSource {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from-other" => Ok(InitSource::FromOther),
            "from-backup" => Ok(InitSource::FromBackup),
            "from-prebuild" => Ok(InitSource::FromPrebuild),
            "from-vcs" => Ok(InitSource::FromVersionControl),
            other => Err(ContentError::InvalidArgument(format!(
                "unknown init source: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_other() {
        assert_eq!(InitSource::default(), InitSource::FromOther);
    }

    #[test]
    fn test_parse_display_agree() {
        for source in [
            InitSource::FromOther,
            InitSource::FromBackup,
            InitSource::FromPrebuild,
            InitSource::FromVersionControl,
        ] {
            assert_eq!(source.to_string().parse::<InitSource>().unwrap(), source);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&InitSource::FromBackup).unwrap();
        assert_eq!(json, "\"from-backup\"");
        assert!("from-nowhere".parse::<InitSource>().is_err());
    }
}
