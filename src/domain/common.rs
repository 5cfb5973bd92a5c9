//! Shared traits and the id-generation capability used across the domain.

use uuid::Uuid;

/// Exposes a stable identifier for entities tracked by the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Produces identifiers for newly constructed entities.
///
/// Constructors take the generator as a capability so hosts and tests can
/// substitute deterministic sources.
pub trait IdGenerator {
    fn generate(&self) -> Uuid;
}

/// Default generator backed by random v4 uuids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
