//! Executable and bundled-resource registry for the MetaCHIP pipeline
//!
//! The pipeline shells out to Prodigal, HMMER, MAFFT, FastTree, BLAST+ and
//! Ranger-DTL, and reads two files shipped with the installation: the
//! profile-HMM database and the circos plotting script. This crate maps the
//! logical name of each one to the value a caller needs:
//!
//! - **Commands** are bare tokens (`"blastp"`, `"FastTree"`) left for the
//!   process launcher to find on `PATH`.
//! - **Resources** are absolute paths computed from the install directory,
//!   so they stay locatable wherever the distribution is unpacked.
//!
//! Build one [`ExecutableRegistry`] at startup and pass it to whatever needs
//! it:
//!
//! ```rust,no_run
//! use chip_config::{ExecutableRegistry, Tool};
//!
//! let registry = ExecutableRegistry::discover()?;
//! let hmm = registry.resolve("path_to_hmm")?;
//! let mut blastp = registry.command(Tool::BlastP)?;
//! blastp.arg("-version");
//! # Ok::<(), chip_config::Error>(())
//! ```
//!
//! Nothing is checked on disk during construction. Call
//! [`ExecutableRegistry::validate`] to fail fast on a broken installation.

pub mod error;
pub mod location;
pub mod logging;
pub mod registry;
pub mod tool;
pub mod validation;

pub use error::{Error, Result};
pub use registry::{ConfigEntry, ExecutableRegistry};
pub use tool::{CIRCOS_SCRIPT_FILE, PHYLO_HMM_FILE, Tool, ToolCategory, ToolKind, ToolSource};
pub use validation::{ToolStatus, ValidationReport};
