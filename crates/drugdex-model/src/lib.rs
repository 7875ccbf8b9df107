pub mod lenient;
pub mod psychonautwiki;
pub mod route;
pub mod substance;
pub mod tripsit;

pub use psychonautwiki::{PwSubstance, SubstanceClass, Tolerance};
pub use route::{Dose, DoseRange, DurationPhase, RouteDuration, RouteRecord};
pub use substance::{CanonicalSubstance, Interaction};
pub use tripsit::{ComboRisk, ComboSource, TsLinks, TsProperties, TsSubstance};
