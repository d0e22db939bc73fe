// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{
    detrend::DetrendError,
    io::read::{CatalogueError, DataFileError},
    lightcurve::LightCurveError,
    periodogram::PeriodSearchError,
    plotting::PlotError,
};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No object is selected; select one first (e.g. 'select <class> <index>')")]
    NoObjectSelected,

    #[error("There is no figure to save; draw one first with 'plot', 'phase' or 'period'")]
    NoFigure,

    #[error("No period search has been run; give a period or run 'period' first")]
    NoSpectrum,

    #[error("The selected light curve has no finite times")]
    NoFiniteTimes,

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    DataFile(#[from] DataFileError),

    #[error(transparent)]
    Detrend(#[from] DetrendError),

    #[error(transparent)]
    LightCurve(#[from] LightCurveError),

    #[error(transparent)]
    PeriodSearch(#[from] PeriodSearchError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
