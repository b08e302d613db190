//! Q-app engine: HTTP, host bridge and resource IO behind the core's effects.
mod api;
mod bridge;
mod client;
mod decode;
mod engine;
mod extract;
mod fetch;
mod filename;
mod persist;
mod popout;
mod resolve;
mod resources;
mod theme;
mod types;

pub use api::JobApi;
pub use bridge::{
    fetch_identity, parse_host_message, AccountInfo, BridgeError, HostBridge, HostEvent,
    HttpHostBridge, UnavailableBridge, IDENTITY_METHOD,
};
pub use client::{ApiClient, ApiSettings};
pub use decode::{decode_html, DecodedHtml};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use extract::extract_title;
pub use fetch::ArchiveSource;
pub use filename::deterministic_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use popout::PopOutWriter;
pub use resolve::{resolve_archive, Candidate, Resolution, CANDIDATES};
pub use resources::ResourceStore;
pub use theme::{read_theme, StaticThemeSource, ThemeSource};
pub use types::{
    ArchiveLocation, EngineEvent, FailureKind, FetchError, FetchOutput, JobListing, JobRecord,
    NewJobRequest, TabId,
};
