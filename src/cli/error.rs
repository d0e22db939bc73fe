// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all ngts-explorer-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::common::SessionArgsError;
use crate::{
    airmass::AirmassError,
    detrend::DetrendError,
    explorer::SessionError,
    io::read::{CatalogueError, DataFileError, FitsError},
    lightcurve::LightCurveError,
    periodogram::PeriodSearchError,
    plotting::PlotError,
};

/// The *only* publicly visible error from ngts-explorer. Where it helps, each
/// error message includes a hint on what to try next.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// An error related to the catalogue cross-match file.
    #[error("{0}\n\nList the available object classes with 'ngts-explorer classes'")]
    Catalogue(String),

    /// An error related to the light-curve data file.
    #[error("{0}")]
    DataFile(String),

    /// An error related to airmass lookups.
    #[error("{0}\n\nAirmass can come from the data file's image list (--airmass-source imagelist) or the database (--airmass-source database)")]
    Airmass(String),

    /// An error related to airmass detrending.
    #[error("{0}\n\nTry again without detrending")]
    Detrend(String),

    /// An error related to phase folding or light-curve construction.
    #[error("{0}")]
    LightCurve(String),

    /// An error related to period searches.
    #[error("{0}")]
    PeriodSearch(String),

    /// An error related to drawing figures.
    #[error("{0}")]
    Plot(String),

    /// Something was asked of a session before it was ready.
    #[error("{0}")]
    Session(String),

    /// An error related to command-line arguments.
    #[error("{0}\n\nSee 'ngts-explorer help' for the available arguments")]
    Args(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv) and check that the file is an NGTS product.")]
    Cfitsio(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<SessionArgsError> for ExplorerError {
    fn from(e: SessionArgsError) -> Self {
        match e {
            SessionArgsError::InvalidAirmassSource(_) => Self::Airmass(e.to_string()),
            _ => Self::Args(e.to_string()),
        }
    }
}

impl From<SessionError> for ExplorerError {
    fn from(e: SessionError) -> Self {
        let s = e.to_string();
        match e {
            SessionError::NoObjectSelected
            | SessionError::NoFigure
            | SessionError::NoSpectrum
            | SessionError::NoFiniteTimes => Self::Session(s),
            SessionError::Catalogue(e) => Self::from(e),
            SessionError::DataFile(e) => Self::from(e),
            SessionError::Detrend(e) => Self::from(e),
            SessionError::LightCurve(e) => Self::from(e),
            SessionError::PeriodSearch(e) => Self::from(e),
            SessionError::Plot(e) => Self::from(e),
            SessionError::IO(e) => Self::from(e),
        }
    }
}

// Library errors.

impl From<CatalogueError> for ExplorerError {
    fn from(e: CatalogueError) -> Self {
        match e {
            CatalogueError::UnknownClass(_)
            | CatalogueError::IndexOutOfRange { .. }
            | CatalogueError::BadSequenceNumber { .. } => Self::Catalogue(e.to_string()),
            CatalogueError::Fits(e) => Self::from(e),
        }
    }
}

impl From<DataFileError> for ExplorerError {
    fn from(e: DataFileError) -> Self {
        match e {
            DataFileError::SequenceOutOfRange { .. }
            | DataFileError::BadImageShape { .. }
            | DataFileError::ObjectCountMismatch { .. } => Self::DataFile(e.to_string()),
            DataFileError::NoAirmassColumn(_) => Self::Airmass(e.to_string()),
            DataFileError::Fits(e) => Self::from(e),
            DataFileError::Airmass(e) => Self::from(e),
            DataFileError::LightCurve(e) => Self::from(e),
        }
    }
}

impl From<FitsError> for ExplorerError {
    fn from(e: FitsError) -> Self {
        let s = e.to_string();
        match e {
            FitsError::Open { .. } | FitsError::Fitsio { .. } => Self::Cfitsio(s),
            FitsError::MissingColumn { .. }
            | FitsError::NotImage { .. }
            | FitsError::NotTable { .. } => Self::DataFile(s),
        }
    }
}

impl From<AirmassError> for ExplorerError {
    fn from(e: AirmassError) -> Self {
        Self::Airmass(e.to_string())
    }
}

impl From<DetrendError> for ExplorerError {
    fn from(e: DetrendError) -> Self {
        match e {
            DetrendError::LightCurve(e) => Self::from(e),
            _ => Self::Detrend(e.to_string()),
        }
    }
}

impl From<LightCurveError> for ExplorerError {
    fn from(e: LightCurveError) -> Self {
        Self::LightCurve(e.to_string())
    }
}

impl From<PeriodSearchError> for ExplorerError {
    fn from(e: PeriodSearchError) -> Self {
        Self::PeriodSearch(e.to_string())
    }
}

impl From<PlotError> for ExplorerError {
    fn from(e: PlotError) -> Self {
        match e {
            PlotError::IO(e) => Self::from(e),
            _ => Self::Plot(e.to_string()),
        }
    }
}

// External crate errors.

impl From<std::io::Error> for ExplorerError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
