//! Card system: values, attributes, catalog and scripts.
//!
//! ## Key Types
//!
//! - `CardId`: Concrete card identity (0 = virtual)
//! - `Suit`, `Color`, `CardType`, `CardSubtype`: Card attributes
//! - `Card`: Concrete or virtual card value
//! - `CardRegistry`: Catalog of concrete cards and per-name scripts
//! - `CardScript`: Hooks catalog content implements

pub mod attributes;
pub mod definition;
pub mod registry;
pub mod script;

pub use attributes::{CardSubtype, CardType, Color, Suit};
pub use definition::{Card, CardId, MAX_NUMBER};
pub use registry::CardRegistry;
pub use script::CardScript;
