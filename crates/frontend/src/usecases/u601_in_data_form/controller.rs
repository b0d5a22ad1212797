use contracts::usecases::u601_in_data_form::{FormLevel, FormSelection};
use thiserror::Error;
use web_sys::Document;

use crate::shared::config::EnhancerConfig;
use crate::shared::dom::{DomControl, FormControl};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnhancerError {
    #[error("window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("required element #{0} not found")]
    MissingElement(String),
}

/// The five cascade selects plus the submit button, looked up once
pub struct FormController<C: FormControl> {
    controls: [C; 5],
    submit: C,
    config: EnhancerConfig,
}

impl FormController<DomControl> {
    pub fn from_document(
        document: &Document,
        config: EnhancerConfig,
    ) -> Result<Self, EnhancerError> {
        let lookup = |id: &str| {
            DomControl::by_id(document, id)
                .ok_or_else(|| EnhancerError::MissingElement(id.to_string()))
        };

        let controls = [
            lookup(config.controls.id(FormLevel::State))?,
            lookup(config.controls.id(FormLevel::District))?,
            lookup(config.controls.id(FormLevel::Block))?,
            lookup(config.controls.id(FormLevel::Grampanchayat))?,
            lookup(config.controls.id(FormLevel::Village))?,
        ];
        let submit = lookup(config.submit_id.as_str())?;

        Ok(Self::new(controls, submit, config))
    }
}

impl<C: FormControl> FormController<C> {
    /// `controls` are in cascade order, see [`FormLevel::ALL`]
    pub fn new(controls: [C; 5], submit: C, config: EnhancerConfig) -> Self {
        Self {
            controls,
            submit,
            config,
        }
    }

    pub fn control(&self, level: FormLevel) -> &C {
        &self.controls[level.index()]
    }

    pub fn submit(&self) -> &C {
        &self.submit
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Current values of the five controls
    pub fn selection(&self) -> FormSelection {
        let mut selection = FormSelection::default();
        for level in FormLevel::ALL {
            selection.set(level, self.control(level).value());
        }
        selection
    }

    /// Enable the submit button only when every level has a value.
    ///
    /// Returns the completeness that was applied.
    pub fn validate_form(&self) -> bool {
        let complete = self.selection().is_complete();
        let style = &self.config.submit_style;

        self.submit.set_disabled(!complete);
        self.submit.set_background(if complete {
            &style.complete_background
        } else {
            &style.incomplete_background
        });

        complete
    }

    /// Completion percentage over the five controls. Diagnostic only.
    pub fn update_progress(&self) -> u8 {
        let progress = self.selection().completion_percent();
        log::info!("Form completion: {}%", progress);
        progress
    }
}
