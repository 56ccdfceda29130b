//! pxp value transformer
//!
//! Parses a CSS declaration value into a lossless node tree and rewrites the
//! `pxp` unit ("pixels proportional to a reference dimension") into a `calc()`
//! expression that scales by a CSS custom property.
//!
//! # Example
//!
//! ```
//! use pxp_value::{transform_pxp, PxpOptions};
//!
//! let options = PxpOptions::new("--viewport-width", "1920").unwrap();
//! assert_eq!(
//!     transform_pxp("red 2pxp solid", &options),
//!     "red calc(2px * var(--viewport-width) / 1920) solid",
//! );
//! ```

pub mod node;
pub mod options;
pub mod parser;
pub mod transform;

pub use node::{Value, ValueNode, WalkAction};
pub use options::{OptionsError, PxpOptions, PXP_UNIT};
pub use parser::ValueParser;
pub use transform::transform_pxp;
