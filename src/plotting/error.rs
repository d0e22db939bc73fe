// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("ngts-explorer was not compiled with the \"plotting\" feature.\nYou need to compile ngts-explorer from source with this feature to draw figures.")]
    NoPlottingFeature,

    #[error("The figure has no finite points to draw")]
    NothingToPlot,

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Plotters(Box<dyn std::error::Error>),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
