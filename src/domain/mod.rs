//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod bump;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use bump::{bump, BumpKind};
pub use commit::ParsedCommit;
pub use prerelease::{is_valid_channel, ChannelRank, PreRelease};
pub use tag::{ParseFailure, Tag, TagPrefix};
pub use version::{NormalVersion, StructuredVersion};
