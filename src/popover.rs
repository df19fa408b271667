use crate::api::ApiError;
use crate::form::MovieForm;
use crate::movie::Movie;
use tracing::{debug, error};

/// Which service call a popover's form is saved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Add,
    Update,
}

/// Disclosure around a [`MovieForm`].
///
/// The form exists only while the popover is open and is seeded from the
/// movie handed to [`Popover::toggle`] at that moment. Every open bumps the
/// generation so a late save result can tell whether its form is still the
/// mounted one.
pub struct Popover {
    label: &'static str,
    save: SaveKind,
    open: bool,
    generation: u64,
    form: Option<MovieForm>,
}

impl Popover {
    pub fn new(label: &'static str, save: SaveKind) -> Self {
        Self {
            label,
            save,
            open: false,
            generation: 0,
            form: None,
        }
    }

    pub fn add() -> Self {
        Self::new("ADD", SaveKind::Add)
    }

    pub fn update() -> Self {
        Self::new("Update", SaveKind::Update)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn save_kind(&self) -> SaveKind {
        self.save
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn toggle(&mut self, movie: &Movie) {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.generation += 1;
            self.form = Some(MovieForm::new(movie));
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.form = None;
    }

    pub fn form(&self) -> Option<&MovieForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut MovieForm> {
        self.form.as_mut()
    }

    /// Apply the outcome of a save started from generation `generation`.
    ///
    /// Success always closes the popover; the form only sees the outcome if
    /// it is still the instance that submitted.
    pub fn on_saved(&mut self, generation: u64, result: Result<(), ApiError>) {
        let current = self.open && self.generation == generation;
        match result {
            Ok(()) => {
                if current {
                    if let Some(form) = self.form.as_mut() {
                        form.on_save_success();
                    }
                }
                self.close();
            }
            Err(err) => match self.form.as_mut() {
                Some(form) if current => form.on_save_failure(&err),
                _ => {
                    error!(error = ?err, "failed to save movie");
                    debug!(label = self.label, "save result arrived after its form closed");
                }
            },
        }
    }
}
