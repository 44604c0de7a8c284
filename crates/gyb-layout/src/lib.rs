// Library root: sponsor layout engine for campaign pages.
//
// Pipeline: filter -> rank -> size -> place (grid slots, flow order, or
// word-cloud coordinates). Pure and synchronous; the only I/O lives in
// `config` and `import`, which the binary uses.

pub mod config;
pub mod import;
pub mod layout;
pub mod sponsor;

pub use config::EngineConfig;
pub use layout::engine::LayoutEngine;
pub use layout::{Layout, PlacedSponsor, Placement, Strategy};
pub use sponsor::{Container, LayoutConfig, SponsorRecord};
