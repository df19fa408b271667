use crate::api::ApiError;
use crate::movie::{Field, Movie, MovieInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::error;

/// What the surrounding popover should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Hand the coerced movie to the save function.
    Submit(Movie),
    /// Close the popover without saving.
    Close,
}

/// Edit state for a single movie.
pub struct MovieForm {
    /// Seed captured when the form was mounted. Successful saves reset to it.
    initial: MovieInput,
    input: MovieInput,
    error_msg: String,
    focused: Field,
}

impl MovieForm {
    pub fn new(movie: &Movie) -> Self {
        let initial = MovieInput::from(movie);
        Self {
            input: initial.clone(),
            initial,
            error_msg: String::new(),
            focused: Field::Id,
        }
    }

    pub fn input(&self) -> &MovieInput {
        &self.input
    }

    pub fn error_msg(&self) -> &str {
        &self.error_msg
    }

    pub fn focused(&self) -> Field {
        self.focused
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.input.get_mut(field) = value.into();
    }

    /// The movie to save, with `id` and `imdb` coerced to integers.
    pub fn submit(&self) -> Movie {
        self.input.to_movie()
    }

    /// After a save resolved. The mirror goes back to the mount-time seed,
    /// not to blank fields and not to what was submitted.
    pub fn on_save_success(&mut self) {
        self.error_msg.clear();
        self.input = self.initial.clone();
    }

    /// After a save rejected. Shows the service's message, or nothing when
    /// the failure carried no response.
    pub fn on_save_failure(&mut self, err: &ApiError) {
        error!(error = ?err, "failed to save movie");
        self.error_msg = err.response_message().unwrap_or_default();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormAction> {
        match key.code {
            KeyCode::Enter => Some(FormAction::Submit(self.submit())),
            KeyCode::Esc => Some(FormAction::Close),
            KeyCode::Tab | KeyCode::Down => {
                self.focused = self.focused.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = self.focused.prev();
                None
            }
            KeyCode::Backspace => {
                self.input.get_mut(self.focused).pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.get_mut(self.focused).push(c);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn heat() -> Movie {
        Movie {
            id: Some(1),
            title: "Heat".to_string(),
            director: "Michael Mann".to_string(),
            imdb: Some(8),
            hollywood: "yes".to_string(),
            bollywood: "no".to_string(),
        }
    }

    fn conflict() -> ApiError {
        ApiError::Status {
            status: 409,
            body: "\"title already exists\"\n".to_string(),
        }
    }

    #[test]
    fn test_form_mirrors_seed_as_text() {
        let form = MovieForm::new(&heat());
        assert_eq!(form.input().id, "1");
        assert_eq!(form.input().imdb, "8");
        assert_eq!(form.input().title, "Heat");
        assert_eq!(form.error_msg(), "");
    }

    #[test]
    fn test_submit_parses_numbers_and_passes_text() {
        let mut form = MovieForm::new(&Movie::blank());
        form.set_field(Field::Id, "17");
        form.set_field(Field::Title, "Sholay");
        form.set_field(Field::Director, "Ramesh Sippy");
        form.set_field(Field::Imdb, "8.1");
        form.set_field(Field::Hollywood, "no");
        form.set_field(Field::Bollywood, "yes");

        let movie = form.submit();
        assert_eq!(movie.id, Some(17));
        assert_eq!(movie.imdb, Some(8));
        assert_eq!(movie.title, "Sholay");
        assert_eq!(movie.director, "Ramesh Sippy");
        assert_eq!(movie.hollywood, "no");
        assert_eq!(movie.bollywood, "yes");
    }

    #[test]
    fn test_submit_non_numeric_id_is_nan() {
        let mut form = MovieForm::new(&Movie::blank());
        form.set_field(Field::Id, "abc");
        assert_eq!(form.submit().id, None);
    }

    #[test]
    fn test_save_success_resets_to_seed() {
        let mut form = MovieForm::new(&heat());
        form.set_field(Field::Title, "Heat (1995)");
        form.on_save_failure(&conflict());
        form.on_save_success();

        assert_eq!(form.error_msg(), "");
        assert_eq!(form.input(), &MovieInput::from(&heat()));
    }

    #[test]
    fn test_save_failure_shows_response_message() {
        let mut form = MovieForm::new(&heat());
        form.on_save_failure(&conflict());
        assert_eq!(form.error_msg(), "title already exists");
    }

    #[test]
    fn test_save_failure_without_response_clears_message() {
        let mut form = MovieForm::new(&heat());
        form.on_save_failure(&conflict());
        let decode = ApiError::Decode(serde_json::from_str::<Movie>("{").unwrap_err());
        form.on_save_failure(&decode);
        assert_eq!(form.error_msg(), "");
    }

    #[test]
    fn test_keys_edit_focused_field() {
        let mut form = MovieForm::new(&Movie::blank());
        assert!(form.handle_key(key(KeyCode::Backspace)).is_none());
        form.handle_key(key(KeyCode::Char('4')));
        form.handle_key(key(KeyCode::Char('2')));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused(), Field::Title);
        form.handle_key(key(KeyCode::Char('X')));

        assert_eq!(form.input().id, "42");
        assert_eq!(form.input().title, "X");
    }

    #[test]
    fn test_enter_submits_and_esc_closes() {
        let mut form = MovieForm::new(&heat());
        assert_eq!(
            form.handle_key(key(KeyCode::Enter)),
            Some(FormAction::Submit(heat()))
        );
        assert_eq!(form.handle_key(key(KeyCode::Esc)), Some(FormAction::Close));
    }
}
