//! Geometric transforms over a morphology.
//!
//! Both transforms are pure: they return a new [`Morphology`] with the same
//! section ids and topology and replaced point arrays. Sections are visited
//! parent first, since unravelling a child needs its parent's corrected end.
//!
//! - [`unravel`]: straighten local wiggle while keeping segment lengths
//! - [`simplify`] / [`simplify_morphology`]: Ramer-Douglas-Peucker point reduction
//!
//! ```rust,ignore
//! use shakha::transform::{SimplifyConfig, UnravelConfig, simplify_morphology, unravel};
//!
//! let straightened = unravel(&morph, &UnravelConfig::default())?;
//! let reduced = simplify_morphology(&straightened, &SimplifyConfig::new().with_epsilon(0.5))?;
//! ```
//!
//! [`Morphology`]: crate::morphology::Morphology

mod config;
mod simplify;
mod unravel;

pub use config::{SimplifyConfig, UnravelConfig};
pub use simplify::{simplify, simplify_morphology};
pub use unravel::{unravel, unravel_points};
