// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Interactive exploration of NGTS light curves: airmass detrending, Lomb-Scargle
period searches and phase folding.
 */

pub mod airmass;
mod cli;
pub mod constants;
pub mod detrend;
pub mod explorer;
pub mod io;
pub mod lightcurve;
pub(crate) mod math;
pub mod periodogram;
pub mod plotting;

#[cfg(test)]
mod tests;

// Re-exports.
pub use airmass::{AirmassLookup, AirmassTable, DatabaseConfig};
pub use cli::{ExplorerError, NgtsExplorer};
pub use detrend::detrend;
pub use explorer::Explorer;
pub use lightcurve::{FluxUnits, FoldedLightCurve, LightCurve};
pub use periodogram::{PeriodSearch, PeriodogramMethod, PowerSpectrum};
pub use plotting::Figure;
