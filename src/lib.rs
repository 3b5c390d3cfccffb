//! Places autocomplete core: preferred-first suggestion ranking, address
//! geocoding, and a small JSON API around them.

pub mod location;
pub mod server;
