//! Campus ride-sharing marketplace core.
//!
//! The crate is laid out as a hexagon: [`domain`] holds entities, validation,
//! and the services behind the driving ports; [`outbound`] holds driven
//! adapters (the in-memory entity store); [`marketplace`] wires both into a
//! single bundle of ports for whichever request handler sits in front.

pub mod domain;
pub mod marketplace;
pub mod outbound;
pub mod settings;
pub mod telemetry;
pub mod test_support;

pub use marketplace::Marketplace;
pub use settings::MarketplaceSettings;
