//! Chemviz infrastructure layer.
//!
//! Typed REST transport for the Chemviz server plus the configuration
//! service. The application layer depends on the [`EquipmentApi`] trait;
//! [`HttpEquipmentApi`] is the production implementation.

pub mod api;
pub mod config_service;
pub mod http;

pub use api::EquipmentApi;
pub use config_service::ConfigService;
pub use http::HttpEquipmentApi;
