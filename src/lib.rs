//! Compute sensory-dissonance curves of musical timbres.
//!
//! A timbre is described by a set of [`dissonance::Partial`]s. Its dissonance curve is obtained by raising a copy of the
//! partials by a range of intervals and summing up the roughness of every resulting pair of partials.
//!
//! # Examples
//!
//! ```
//! # use disscalc::dissonance::{Partial, Timbre};
//! # use disscalc::table::{self, Sweep};
//! let timbre = Timbre::symmetric(Partial::zip(&[220.0, 440.0, 660.0], &[1.0, 0.5, 0.33]));
//!
//! let mut output = Vec::new();
//! let num_rows = table::write_table(&mut output, Sweep::new(1.0, 0.5, 2.0), &[1.2], ',', |interval| {
//!     timbre.dissonance_at(interval)
//! })
//! .unwrap();
//!
//! assert_eq!(num_rows, 4);
//! assert!(String::from_utf8(output).unwrap().starts_with("1,"));
//! ```

pub mod dissonance;
pub mod table;
