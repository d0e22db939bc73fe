// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An exploration session: a catalogue, a data file, the currently selected
//! object and the most recent figure and period search.
//!
//! Everything here is driven by the operator, one call at a time. Calls that
//! need state that doesn't exist yet (e.g. saving before plotting) fail with
//! an error saying what to do first.

mod error;
mod prompt;

pub use error::SessionError;
pub use prompt::{is_yes, LinePrompt, Prompt};

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    airmass::AirmassLookup,
    detrend::detrend,
    io::read::{read_light_curve, Catalogue, CatalogueEntry},
    lightcurve::LightCurve,
    periodogram::{PeriodSearch, PowerSpectrum},
    plotting::{mjd_label, object_title, Figure},
};

/// The object currently being looked at.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub class: String,

    /// 0-based position within `class`.
    pub index: usize,

    pub entry: CatalogueEntry,
    pub light_curve: LightCurve,
}

impl Selection {
    /// "name (class, V=...)"
    pub fn title(&self) -> String {
        object_title(&self.entry.name, &self.class, self.entry.vmag)
    }
}

pub struct Explorer {
    catalogue_file: PathBuf,
    data_file: PathBuf,
    catalogue: Catalogue,
    airmass: Box<dyn AirmassLookup>,

    /// Every figure is also drawn here, if set.
    preview: Option<PathBuf>,

    /// Overwrite saved figures without asking.
    force_overwrite: bool,

    selection: Option<Selection>,
    figure: Option<Figure>,
    spectrum: Option<PowerSpectrum>,
}

impl Explorer {
    /// Start a session by reading `catalogue_file`. Light curves are read from
    /// `data_file` as objects are selected, with airmass from `airmass`.
    pub fn new<P: AsRef<Path>, P2: AsRef<Path>>(
        catalogue_file: P,
        data_file: P2,
        airmass: Box<dyn AirmassLookup>,
    ) -> Result<Explorer, SessionError> {
        let catalogue = Catalogue::read(&catalogue_file)?;
        debug!("Airmass comes from: {}", airmass.describe());
        Ok(Explorer {
            catalogue_file: catalogue_file.as_ref().to_path_buf(),
            data_file: data_file.as_ref().to_path_buf(),
            catalogue,
            airmass,
            preview: None,
            force_overwrite: false,
            selection: None,
            figure: None,
            spectrum: None,
        })
    }

    /// Draw every figure into `preview` as soon as it is made.
    pub fn with_preview(mut self, preview: Option<PathBuf>) -> Explorer {
        self.preview = preview;
        self
    }

    pub fn with_force_overwrite(mut self, force_overwrite: bool) -> Explorer {
        self.force_overwrite = force_overwrite;
        self
    }

    pub fn catalogue_file(&self) -> &Path {
        &self.catalogue_file
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn preview(&self) -> Option<&Path> {
        self.preview.as_deref()
    }

    /// The object classes in the catalogue.
    pub fn classes(&self) -> Vec<&str> {
        self.catalogue.classes().collect()
    }

    /// The number of objects of `class`, or of the selected object's class.
    pub fn num_objects(&self, class: Option<&str>) -> Result<usize, SessionError> {
        let class = match class {
            Some(c) => c,
            None => self.selected()?.class.as_str(),
        };
        Ok(self.catalogue.num_objects(class)?)
    }

    /// Select the `index`th (0-based) object of `class` and read its light
    /// curve. The previous figure and period search are forgotten.
    pub fn set_object(&mut self, class: &str, index: usize) -> Result<&Selection, SessionError> {
        let entry = self.catalogue.get(class, index)?.clone();
        let light_curve = read_light_curve(
            &self.data_file,
            entry.sequence_number,
            self.airmass.as_mut(),
        )?;
        info!(
            "{} {class} objects; selected {} ({} points)",
            self.catalogue.num_objects(class)?,
            entry.name,
            light_curve.len()
        );

        self.figure = None;
        self.spectrum = None;
        Ok(&*self.selection.insert(Selection {
            class: class.to_string(),
            index,
            entry,
            light_curve,
        }))
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    fn selected(&self) -> Result<&Selection, SessionError> {
        self.selection.as_ref().ok_or(SessionError::NoObjectSelected)
    }

    /// The selected object's light curve.
    pub fn light_curve(&self) -> Result<&LightCurve, SessionError> {
        Ok(&self.selected()?.light_curve)
    }

    /// The time-axis label for the selected object, e.g. "MJD - 57000".
    pub fn mjd_label(&self) -> Result<String, SessionError> {
        let mjd0 = self
            .light_curve()?
            .reference_mjd()
            .ok_or(SessionError::NoFiniteTimes)?;
        Ok(mjd_label(mjd0))
    }

    fn maybe_detrended(&self, detrend_data: bool) -> Result<LightCurve, SessionError> {
        let lc = self.light_curve()?;
        if detrend_data {
            Ok(detrend(lc)?)
        } else {
            Ok(lc.clone())
        }
    }

    /// Plot the selected object's light curve against time.
    pub fn plot(&mut self, detrend_data: bool) -> Result<&Figure, SessionError> {
        let lc = self.maybe_detrended(detrend_data)?;
        let figure = Figure::light_curve(&lc, Some(self.selected()?.title()));
        self.show(figure)
    }

    /// Plot the selected object's light curve folded on `period` [days]. If
    /// `epoch_is_mjd` is false, `epoch` is a Julian Date.
    pub fn plot_phase(
        &mut self,
        period: f64,
        epoch: f64,
        epoch_is_mjd: bool,
        detrend_data: bool,
        double: bool,
    ) -> Result<&Figure, SessionError> {
        let lc = self.maybe_detrended(detrend_data)?;
        let folded = lc.fold(period, epoch, epoch_is_mjd, double)?;
        let figure = Figure::phase(&folded, Some(self.selected()?.title()));
        self.show(figure)
    }

    /// Run a period search over the selected object's (undetrended) flux. The
    /// spectrum is remembered so that its peak can be used for phase plots.
    pub fn find_period(
        &mut self,
        search: &PeriodSearch,
        plot: bool,
    ) -> Result<&PowerSpectrum, SessionError> {
        let lc = self.light_curve()?;
        let spectrum = search.run(lc.time(), lc.flux())?;
        info!(
            "Peak period: {} d (power {})",
            spectrum.peak_period(),
            spectrum.peak_power()
        );
        if plot {
            self.show(Figure::periodogram(&spectrum))?;
        }
        Ok(&*self.spectrum.insert(spectrum))
    }

    /// The peak of the last period search.
    pub fn peak_period(&self) -> Result<f64, SessionError> {
        self.spectrum
            .as_ref()
            .map(|s| s.peak_period())
            .ok_or(SessionError::NoSpectrum)
    }

    pub fn current_figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    pub fn last_spectrum(&self) -> Option<&PowerSpectrum> {
        self.spectrum.as_ref()
    }

    fn show(&mut self, figure: Figure) -> Result<&Figure, SessionError> {
        if let Some(preview) = self.preview.as_deref() {
            figure.render(preview)?;
            info!("Drew {} to {}", figure.kind(), preview.display());
        }
        Ok(&*self.figure.insert(figure))
    }

    /// Plot every object of `class` in turn. With a `prompt`, wait for the
    /// operator after each one. With a `save_dir`, also save each figure
    /// there. Returns the number of objects plotted.
    pub fn plot_all(
        &mut self,
        class: &str,
        detrend_data: bool,
        mut prompt: Option<&mut dyn Prompt>,
        save_dir: Option<&Path>,
    ) -> Result<usize, SessionError> {
        let num_objects = self.catalogue.num_objects(class)?;
        info!("Plotting a total of {num_objects} objects");

        for index in 0..num_objects {
            info!("Plotting object {index}");
            self.set_object(class, index)?;
            self.plot(detrend_data)?;

            if let Some(dir) = save_dir {
                match prompt.as_deref_mut() {
                    Some(p) => {
                        self.save_figure(dir, p)?;
                    }
                    None => {
                        self.save_figure(dir, &mut DeclineOverwrite)?;
                    }
                }
            }
            if let Some(p) = prompt.as_deref_mut() {
                p.pause("Press enter to continue")?;
            }
        }

        Ok(num_objects)
    }

    /// Save the current figure as `<outdir>/<class>/<name>.png` for the
    /// selected object. Returns the path written, or `None` if the operator
    /// declined to overwrite an existing file.
    pub fn save_figure(
        &self,
        outdir: &Path,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<PathBuf>, SessionError> {
        let figure = self.figure.as_ref().ok_or(SessionError::NoFigure)?;
        let selection = self.selected()?;
        self.write_figure(figure, &selection.entry.name, &selection.class, outdir, prompt)
    }

    /// Save the current figure as `<outdir>/<class>/<name>.png`.
    pub fn save_figure_as(
        &self,
        name: &str,
        class: &str,
        outdir: &Path,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<PathBuf>, SessionError> {
        let figure = self.figure.as_ref().ok_or(SessionError::NoFigure)?;
        self.write_figure(figure, name, class, outdir, prompt)
    }

    fn write_figure(
        &self,
        figure: &Figure,
        name: &str,
        class: &str,
        outdir: &Path,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<PathBuf>, SessionError> {
        let path = figure_path(outdir, class, name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() && !self.force_overwrite {
            let question = format!("File '{}' exists, overwrite? [y/N]", path.display());
            if !prompt.confirm(&question)? {
                warn!("Not overwriting {}", path.display());
                return Ok(None);
            }
        }

        figure.render(&path)?;
        info!("Saved {} to {}", figure.kind(), path.display());
        Ok(Some(path))
    }
}

/// `<outdir>/<class>/<name>.png`. Path separators in the class and name are
/// replaced so that each stays a single path component.
pub fn figure_path(outdir: &Path, class: &str, name: &str) -> PathBuf {
    let clean = |s: &str| s.replace('/', "_");
    outdir
        .join(clean(class))
        .join(format!("{}.png", clean(name)))
}

/// Never overwrites; used when nobody is around to ask.
struct DeclineOverwrite;

impl Prompt for DeclineOverwrite {
    fn confirm(&mut self, _question: &str) -> Result<bool, std::io::Error> {
        Ok(false)
    }

    fn pause(&mut self, _message: &str) -> Result<(), std::io::Error> {
        Ok(())
    }
}
