//! Card catalog: definitions, instances, and the registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (category, footprint, score impact,
//!   placement constraint)
//! - `InstanceId` / `CardInstance`: A concrete stack of identical copies held
//!   together; instances, not definitions, move between hand, floor, and back
//! - `Catalog`: Definition lookup plus the deck recipe
//!
//! The catalog is read-only at runtime. It is supplied to the engine at
//! construction time; the engine builds the shared deck from the catalog's
//! deck recipe when a game starts.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardCategory, CardDefinition, CardId, FloorRule};
pub use instance::{CardInstance, InstanceId};
pub use registry::{Catalog, DeckEntry};
