use crate::actions::{Command, Message, Slot};
use crate::form::FormAction;
use crate::movie::Movie;
use crate::popover::Popover;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// List screen state. The only copy of the catalog the client holds.
pub struct App {
    pub movies: Vec<Movie>,
    /// Banner text. Last failure wins; a later success does not clear it.
    pub error: String,
    pub selected: usize,

    pub add_popover: Popover,
    /// One update popover per table position, not per movie id.
    pub row_popovers: Vec<Popover>,

    pub show_help: bool,
    pub should_quit: bool,
    pub status_msg: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            error: String::new(),
            selected: 0,

            add_popover: Popover::add(),
            row_popovers: Vec::new(),

            show_help: false,
            should_quit: false,
            status_msg: "Loading movies...".to_string(),
        }
    }

    /// Apply a finished flow to the screen.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Loaded(Ok(movies)) => {
                self.status_msg = format!("{} movies loaded", movies.len());
                self.row_popovers.resize_with(movies.len(), Popover::update);
                self.movies = movies;
                self.selected = self.selected.min(self.movies.len().saturating_sub(1));
            }
            Message::Loaded(Err(err)) => {
                self.status_msg = "Load failed".to_string();
                self.error = err.to_string();
            }
            Message::DeleteFailed(err) => {
                self.status_msg = "Delete failed".to_string();
                self.error = err.to_string();
            }
            Message::Saved {
                slot,
                generation,
                result,
            } => {
                if result.is_err() {
                    self.status_msg = "Save failed".to_string();
                }
                if let Some(popover) = self.popover_mut(slot) {
                    popover.on_saved(generation, result);
                }
            }
        }
    }

    pub fn popover(&self, slot: Slot) -> Option<&Popover> {
        match slot {
            Slot::Add => Some(&self.add_popover),
            Slot::Row(index) => self.row_popovers.get(index),
        }
    }

    pub fn popover_mut(&mut self, slot: Slot) -> Option<&mut Popover> {
        match slot {
            Slot::Add => Some(&mut self.add_popover),
            Slot::Row(index) => self.row_popovers.get_mut(index),
        }
    }

    /// The popover currently showing, if any.
    pub fn open_slot(&self) -> Option<Slot> {
        if self.add_popover.is_open() {
            return Some(Slot::Add);
        }
        self.row_popovers
            .iter()
            .position(Popover::is_open)
            .map(Slot::Row)
    }

    /// Flip a popover. Opening one closes whichever other one was showing.
    pub fn toggle_popover(&mut self, slot: Slot) {
        let seed = match slot {
            Slot::Add => Movie::blank(),
            Slot::Row(index) => match self.movies.get(index) {
                Some(movie) => movie.clone(),
                None => return,
            },
        };

        if let Some(open) = self.open_slot() {
            if open != slot {
                if let Some(other) = self.popover_mut(open) {
                    other.close();
                }
            }
        }
        if let Some(popover) = self.popover_mut(slot) {
            popover.toggle(&seed);
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.movies.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if let Some(slot) = self.open_slot() {
            return self.handle_form_key(slot, key);
        }

        if self.show_help {
            self.show_help = false;
            return None;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('a') => self.toggle_popover(Slot::Add),
            KeyCode::Char('u') | KeyCode::Enter => self.toggle_popover(Slot::Row(self.selected)),
            KeyCode::Char('d') => {
                let movie = self.movies.get(self.selected)?;
                self.status_msg = format!("Deleting {}...", movie.title);
                return Some(Command::Delete(movie.id_text()));
            }
            KeyCode::Char('r') => {
                self.status_msg = "Reloading...".to_string();
                return Some(Command::Reload);
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, slot: Slot, key: KeyEvent) -> Option<Command> {
        let popover = self.popover_mut(slot)?;
        let generation = popover.generation();
        let kind = popover.save_kind();
        match popover.form_mut()?.handle_key(key)? {
            FormAction::Submit(movie) => {
                self.status_msg = "Saving...".to_string();
                Some(Command::Save {
                    slot,
                    generation,
                    kind,
                    movie,
                })
            }
            FormAction::Close => {
                popover.close();
                None
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
