//! Physical fluxes and the numerical interface flux.

mod lax_friedrichs;
mod physical;

pub use lax_friedrichs::LaxFriedrichs;
pub use physical::{clamp_events, PhysicalFlux};
