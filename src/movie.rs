use serde::{Deserialize, Deserializer, Serialize};

/// A single record of the remote catalog.
///
/// `id` and `imdb` are `None` when the form could not coerce the typed text
/// into an integer. They go over the wire as `null` and render as `NaN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, deserialize_with = "truncated_number")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default, deserialize_with = "truncated_number")]
    pub imdb: Option<i64>,
    #[serde(default)]
    pub hollywood: String,
    #[serde(default)]
    pub bollywood: String,
}

impl Movie {
    /// Seed for the ADD form.
    pub fn blank() -> Self {
        Self {
            id: Some(0),
            title: String::new(),
            director: String::new(),
            imdb: Some(0),
            hollywood: String::new(),
            bollywood: String::new(),
        }
    }

    /// The id as it appears in `/api/movies/{id}` and in the table.
    pub fn id_text(&self) -> String {
        number_text(self.id)
    }

    pub fn imdb_text(&self) -> String {
        number_text(self.imdb)
    }
}

pub fn number_text(value: Option<i64>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "NaN".to_string(),
    }
}

/// The service stores ratings as floats; the client model keeps integers.
fn truncated_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(value.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))))
}

/// Parse the leading base-10 integer of `text`.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, and text without any leading digit yields `None`.
/// Values beyond the `i64` range saturate.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        seen = true;
        let d = d as i64;
        value = value
            .saturating_mul(10)
            .saturating_add(if negative { -d } else { d });
    }

    seen.then_some(value)
}

/// One editable field of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    Director,
    Imdb,
    Hollywood,
    Bollywood,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Self::Id,
        Self::Title,
        Self::Director,
        Self::Imdb,
        Self::Hollywood,
        Self::Bollywood,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Director => "Director",
            Self::Imdb => "IMDb",
            Self::Hollywood => "Hollywood",
            Self::Bollywood => "Bollywood",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Id => "Enter Id",
            Self::Title => "Enter Title",
            Self::Director => "Enter Director",
            Self::Imdb => "Enter Rating",
            Self::Hollywood | Self::Bollywood => "yes/no",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Id => Self::Title,
            Self::Title => Self::Director,
            Self::Director => Self::Imdb,
            Self::Imdb => Self::Hollywood,
            Self::Hollywood => Self::Bollywood,
            Self::Bollywood => Self::Id,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Id => Self::Bollywood,
            Self::Title => Self::Id,
            Self::Director => Self::Title,
            Self::Imdb => Self::Director,
            Self::Hollywood => Self::Imdb,
            Self::Bollywood => Self::Hollywood,
        }
    }
}

/// Text mirror of a [`Movie`] while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieInput {
    pub id: String,
    pub title: String,
    pub director: String,
    pub imdb: String,
    pub hollywood: String,
    pub bollywood: String,
}

impl MovieInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::Director => &self.director,
            Field::Imdb => &self.imdb,
            Field::Hollywood => &self.hollywood,
            Field::Bollywood => &self.bollywood,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Director => &mut self.director,
            Field::Imdb => &mut self.imdb,
            Field::Hollywood => &mut self.hollywood,
            Field::Bollywood => &mut self.bollywood,
        }
    }

    /// Coerce the numeric fields and build the movie to save.
    pub fn to_movie(&self) -> Movie {
        Movie {
            id: parse_int(&self.id),
            title: self.title.clone(),
            director: self.director.clone(),
            imdb: parse_int(&self.imdb),
            hollywood: self.hollywood.clone(),
            bollywood: self.bollywood.clone(),
        }
    }
}

impl From<&Movie> for MovieInput {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id_text(),
            title: movie.title.clone(),
            director: movie.director.clone(),
            imdb: movie.imdb_text(),
            hollywood: movie.hollywood.clone(),
            bollywood: movie.bollywood.clone(),
        }
    }
}
