//! Common test infrastructure
//!
//! Spawns a stub Deezer API and the server under test on random ports.
//! Tests should only import from this module, not from internal submodules.

mod server;

// Public API - this is what tests import
pub use deezer_stub::{chart_payload, chart_track, DeezerStub};
pub use server::TestServer;
