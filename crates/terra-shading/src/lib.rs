//! Day/night shading for procedurally textured planets.
//!
//! [`ShadingModel`] is a pure function of a classified surface sample, a
//! validated [`LightDirection`] and the sphere normal at that texel.
//! [`DayNightState`] turns elapsed time into the light direction and
//! ambient level fed to it each frame.

mod day_night;
mod error;
mod frame;
mod light;
mod model;

pub use day_night::{DayNightClock, DayNightState, ambient_intensity, sun_direction_from_time};
pub use error::ShadingError;
pub use frame::{lit_fraction, render_frame};
pub use light::{LightDirection, UNIT_TOLERANCE};
pub use model::{ShadingModel, ShadingParams, diffuse_term};
