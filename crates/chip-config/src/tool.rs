//! The fixed catalogue of external tools and bundled resources.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Filename of the bundled profile-HMM database.
pub const PHYLO_HMM_FILE: &str = "MetaCHIP_phylo.hmm";

/// Filename of the bundled circos plotting script.
pub const CIRCOS_SCRIPT_FILE: &str = "MetaCHIP_circos_HGT.R";

/// A logical tool or resource name understood by the registry.
///
/// Variants are declared in canonical order; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tool {
    #[serde(rename = "prodigal")]
    Prodigal,
    #[serde(rename = "hmmsearch")]
    HmmSearch,
    #[serde(rename = "hmmfetch")]
    HmmFetch,
    #[serde(rename = "hmmalign")]
    HmmAlign,
    #[serde(rename = "hmmstat")]
    HmmStat,
    #[serde(rename = "mafft")]
    Mafft,
    #[serde(rename = "fasttree")]
    FastTree,
    #[serde(rename = "blastp")]
    BlastP,
    #[serde(rename = "blastn")]
    BlastN,
    #[serde(rename = "makeblastdb")]
    MakeBlastDb,
    #[serde(rename = "ranger_mac")]
    RangerMac,
    #[serde(rename = "ranger_linux")]
    RangerLinux,
    /// Bundled profile-HMM database.
    #[serde(rename = "path_to_hmm")]
    PathToHmm,
    /// Bundled R script that draws the HGT circos plot.
    #[serde(rename = "circos_HGT_R")]
    CircosHgtR,
}

/// How a tool's configured value is meant to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Bare command token, located through the executable search path at spawn time.
    Command,
    /// Absolute path to a file shipped next to the installation.
    Resource,
}

/// The fixed part of a tool's configured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSource {
    /// Command token passed to the process launcher as-is.
    Command(&'static str),
    /// Filename joined onto the install directory.
    Resource(&'static str),
}

/// Pipeline stage that consumes a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    /// Open reading frame prediction (Prodigal)
    GenePrediction,
    /// HMMER profile search and alignment
    ProfileSearch,
    /// Multiple sequence alignment (MAFFT)
    Alignment,
    /// Tree building (FastTree)
    Phylogeny,
    /// BLAST similarity search and database building
    Similarity,
    /// Gene tree / species tree reconciliation (Ranger-DTL)
    Reconciliation,
    /// Data files shipped with the installation
    BundledData,
}

impl Tool {
    /// Number of registered tools.
    pub const COUNT: usize = 14;

    /// Every tool, in canonical order.
    pub const ALL: [Tool; Self::COUNT] = [
        Self::Prodigal,
        Self::HmmSearch,
        Self::HmmFetch,
        Self::HmmAlign,
        Self::HmmStat,
        Self::Mafft,
        Self::FastTree,
        Self::BlastP,
        Self::BlastN,
        Self::MakeBlastDb,
        Self::RangerMac,
        Self::RangerLinux,
        Self::PathToHmm,
        Self::CircosHgtR,
    ];

    /// The logical name used as the lookup key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prodigal => "prodigal",
            Self::HmmSearch => "hmmsearch",
            Self::HmmFetch => "hmmfetch",
            Self::HmmAlign => "hmmalign",
            Self::HmmStat => "hmmstat",
            Self::Mafft => "mafft",
            Self::FastTree => "fasttree",
            Self::BlastP => "blastp",
            Self::BlastN => "blastn",
            Self::MakeBlastDb => "makeblastdb",
            Self::RangerMac => "ranger_mac",
            Self::RangerLinux => "ranger_linux",
            Self::PathToHmm => "path_to_hmm",
            Self::CircosHgtR => "circos_HGT_R",
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self.source() {
            ToolSource::Command(_) => ToolKind::Command,
            ToolSource::Resource(_) => ToolKind::Resource,
        }
    }

    pub fn category(&self) -> ToolCategory {
        match self {
            Self::Prodigal => ToolCategory::GenePrediction,
            Self::HmmSearch | Self::HmmFetch | Self::HmmAlign | Self::HmmStat => {
                ToolCategory::ProfileSearch
            }
            Self::Mafft => ToolCategory::Alignment,
            Self::FastTree => ToolCategory::Phylogeny,
            Self::BlastP | Self::BlastN | Self::MakeBlastDb => ToolCategory::Similarity,
            Self::RangerMac | Self::RangerLinux => ToolCategory::Reconciliation,
            Self::PathToHmm | Self::CircosHgtR => ToolCategory::BundledData,
        }
    }

    /// Where the configured value comes from.
    pub fn source(&self) -> ToolSource {
        match self {
            Self::Prodigal => ToolSource::Command("prodigal"),
            Self::HmmSearch => ToolSource::Command("hmmsearch"),
            Self::HmmFetch => ToolSource::Command("hmmfetch"),
            Self::HmmAlign => ToolSource::Command("hmmalign"),
            Self::HmmStat => ToolSource::Command("hmmstat"),
            Self::Mafft => ToolSource::Command("mafft"),
            Self::FastTree => ToolSource::Command("FastTree"),
            Self::BlastP => ToolSource::Command("blastp"),
            Self::BlastN => ToolSource::Command("blastn"),
            Self::MakeBlastDb => ToolSource::Command("makeblastdb"),
            Self::RangerMac => ToolSource::Command("Ranger-DTL-Dated.mac"),
            Self::RangerLinux => ToolSource::Command("Ranger-DTL-Dated.linux"),
            Self::PathToHmm => ToolSource::Resource(PHYLO_HMM_FILE),
            Self::CircosHgtR => ToolSource::Resource(CIRCOS_SCRIPT_FILE),
        }
    }

    /// Bare command token for command tools, `None` for resources.
    pub fn command_token(&self) -> Option<&'static str> {
        match self.source() {
            ToolSource::Command(token) => Some(token),
            ToolSource::Resource(_) => None,
        }
    }

    /// Filename relative to the install directory for resources, `None` for commands.
    pub fn resource_file(&self) -> Option<&'static Path> {
        match self.source() {
            ToolSource::Resource(file) => Some(Path::new(file)),
            ToolSource::Command(_) => None,
        }
    }

    /// The Ranger-DTL build matching the platform this binary was compiled for.
    pub fn ranger_for_host() -> Tool {
        if cfg!(target_os = "macos") {
            Self::RangerMac
        } else {
            Self::RangerLinux
        }
    }

    /// Whether the host platform needs this tool.
    ///
    /// Only the Ranger-DTL build for the other platform is optional.
    pub fn is_required_on_host(&self) -> bool {
        match self {
            Self::RangerMac | Self::RangerLinux => *self == Self::ranger_for_host(),
            _ => true,
        }
    }

    /// Comma-separated list of every logical name, for diagnostics.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Tool::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Tool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| Error::key_not_found(s))
    }
}

impl AsRef<str> for Tool {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_count_matches_all() {
        assert_eq!(Tool::ALL.len(), Tool::COUNT);
        let names: HashSet<_> = Tool::ALL.iter().map(Tool::as_str).collect();
        assert_eq!(names.len(), Tool::COUNT, "Duplicate logical names found");
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for tool in Tool::ALL {
            assert_eq!(tool.as_str().parse::<Tool>().unwrap(), tool);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("BLASTP".parse::<Tool>().is_err());
        assert!("circos_hgt_r".parse::<Tool>().is_err());
        assert!(" blastp".parse::<Tool>().is_err());
    }

    #[test]
    fn test_kind_and_payload_agree() {
        for tool in Tool::ALL {
            match tool.kind() {
                ToolKind::Command => {
                    assert!(tool.command_token().is_some(), "{tool} has no command");
                    assert!(tool.resource_file().is_none());
                }
                ToolKind::Resource => {
                    assert!(tool.command_token().is_none());
                    assert!(tool.resource_file().is_some(), "{tool} has no file");
                    assert_eq!(tool.category(), ToolCategory::BundledData);
                }
            }
        }
    }

    #[test]
    fn test_command_tokens_differ_from_keys_where_expected() {
        assert_eq!(Tool::FastTree.command_token(), Some("FastTree"));
        assert_eq!(Tool::RangerMac.command_token(), Some("Ranger-DTL-Dated.mac"));
        assert_eq!(Tool::RangerLinux.command_token(), Some("Ranger-DTL-Dated.linux"));
    }

    #[test]
    fn test_exactly_one_ranger_required() {
        let required: Vec<_> = Tool::ALL
            .into_iter()
            .filter(|t| t.category() == ToolCategory::Reconciliation)
            .filter(Tool::is_required_on_host)
            .collect();
        assert_eq!(required, vec![Tool::ranger_for_host()]);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_ranger_for_host_macos() {
        assert_eq!(Tool::ranger_for_host(), Tool::RangerMac);
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_ranger_for_host_other() {
        assert_eq!(Tool::ranger_for_host(), Tool::RangerLinux);
    }

    #[test]
    fn test_serde_uses_logical_names() {
        assert_eq!(
            serde_json::to_string(&Tool::CircosHgtR).unwrap(),
            "\"circos_HGT_R\""
        );
        let tool: Tool = serde_json::from_str("\"makeblastdb\"").unwrap();
        assert_eq!(tool, Tool::MakeBlastDb);
        assert_eq!(
            serde_json::to_string(&ToolCategory::GenePrediction).unwrap(),
            "\"gene_prediction\""
        );
    }

    #[test]
    fn test_valid_names_lists_every_key() {
        let names = Tool::valid_names();
        for tool in Tool::ALL {
            assert!(names.contains(tool.as_str()));
        }
    }
}
