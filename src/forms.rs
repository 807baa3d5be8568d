//! Form State
//!
//! Add/edit form state machine and input validation.
//!
//! ```text
//! Closed -> Open -> Submitting -> Closed
//!            ^  \-> (invalid) -/      \-> Failed (still open)
//! ```

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::models::{Movie, MovieDraft, MovieId};

/// Earliest accepted release year
pub const MIN_YEAR: i32 = 1900;
/// Years past the current one still accepted (announced releases)
pub const FUTURE_YEARS: i32 = 5;
/// Shortest accepted title or director name, in characters
pub const MIN_NAME_CHARS: usize = 2;

/// Which modal form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    /// Prefix used for element ids (`add-title`, `edit-title`, ...)
    pub fn prefix(self) -> &'static str {
        match self {
            FormKind::Add => "add",
            FormKind::Edit => "edit",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            FormKind::Add => "Agregar película",
            FormKind::Edit => "Editar película",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormKind::Add => "Agregar",
            FormKind::Edit => "Guardar cambios",
        }
    }
}

/// Form input, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Director,
    Description,
    Image,
    Year,
    Genre,
    Rating,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Director,
        Field::Description,
        Field::Image,
        Field::Year,
        Field::Genre,
        Field::Rating,
    ];

    pub const REQUIRED: [Field; 3] = [Field::Title, Field::Director, Field::Description];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Director => "director",
            Field::Description => "description",
            Field::Image => "image",
            Field::Year => "year",
            Field::Genre => "genre",
            Field::Rating => "rating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Título",
            Field::Director => "Director",
            Field::Description => "Descripción",
            Field::Image => "URL del póster",
            Field::Year => "Año",
            Field::Genre => "Género",
            Field::Rating => "Calificación (1-10)",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Sentence subject for field-level messages
    pub fn subject(self) -> &'static str {
        match self {
            Field::Title => "El título",
            Field::Director => "El nombre del director",
            Field::Description => "La descripción",
            Field::Image => "La URL del póster",
            Field::Year => "El año",
            Field::Genre => "El género",
            Field::Rating => "La calificación",
        }
    }
}

/// Check a single input as typed. `None` when the value is acceptable.
pub fn validate_field(field: Field, raw: &str, current_year: i32) -> Option<ValidationError> {
    let value = raw.trim();
    match field {
        Field::Title | Field::Director if value.chars().count() < MIN_NAME_CHARS => {
            Some(ValidationError::TooShort { field, min: MIN_NAME_CHARS })
        }
        Field::Description if value.is_empty() => Some(ValidationError::MissingRequired { field }),
        Field::Year => parse_year(value, current_year).err(),
        Field::Rating => parse_rating(value).err(),
        _ => None,
    }
}

fn parse_year(value: &str, current_year: i32) -> Result<Option<i32>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    let max = current_year + FUTURE_YEARS;
    match value.parse::<i32>() {
        Ok(year) if (MIN_YEAR..=max).contains(&year) => Ok(Some(year)),
        _ => Err(ValidationError::YearOutOfRange { min: MIN_YEAR, max }),
    }
}

/// Accepts a decimal comma
fn parse_rating(value: &str) -> Result<Option<f32>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    match value.replace(',', ".").parse::<f32>() {
        Ok(rating) if (1.0..=10.0).contains(&rating) => Ok(Some(rating)),
        _ => Err(ValidationError::RatingOutOfRange),
    }
}

/// Raw text of every input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub director: String,
    pub description: String,
    pub image: String,
    pub year: String,
    pub genre: String,
    pub rating: String,
}

impl FormFields {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            description: movie.description.clone(),
            image: movie.image.clone().unwrap_or_default(),
            year: movie.year.map(|y| y.to_string()).unwrap_or_default(),
            genre: movie.genre.clone().unwrap_or_default(),
            rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Director => &self.director,
            Field::Description => &self.description,
            Field::Image => &self.image,
            Field::Year => &self.year,
            Field::Genre => &self.genre,
            Field::Rating => &self.rating,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Director => &mut self.director,
            Field::Description => &mut self.description,
            Field::Image => &mut self.image,
            Field::Year => &mut self.year,
            Field::Genre => &mut self.genre,
            Field::Rating => &mut self.rating,
        };
        *slot = value;
    }

    fn trim_all(&mut self) {
        for field in Field::ALL {
            let trimmed = self.get(field).trim();
            if trimmed.len() != self.get(field).len() {
                let trimmed = trimmed.to_string();
                self.set(field, trimmed);
            }
        }
    }

    /// Build a draft from already trimmed values
    pub fn to_draft(&self, current_year: i32) -> Result<MovieDraft, ValidationError> {
        if let Some(field) = Field::REQUIRED.into_iter().find(|f| self.get(*f).is_empty()) {
            return Err(ValidationError::MissingRequired { field });
        }
        if let Some(err) = Field::ALL
            .into_iter()
            .find_map(|field| validate_field(field, self.get(field), current_year))
        {
            return Err(err);
        }

        let year = parse_year(&self.year, current_year)?;
        let rating = parse_rating(&self.rating)?;

        Ok(MovieDraft {
            title: self.title.clone(),
            director: self.director.clone(),
            description: self.description.clone(),
            image: non_empty(&self.image),
            year,
            genre: non_empty(&self.genre),
            rating,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Lifecycle phase of a form
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormPhase {
    #[default]
    Closed,
    Open,
    Submitting,
    /// Remote call failed; input kept so the user can retry
    Failed(String),
}

/// One modal form: phase, inputs, and the record being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub phase: FormPhase,
    pub fields: FormFields,
    pub editing: Option<MovieId>,
    /// Current problem per input, shown under that input
    pub errors: BTreeMap<Field, ValidationError>,
}

impl FormState {
    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Open (or re-open) the form, optionally pre-filled from a movie
    pub fn open(&mut self, prefill: Option<&Movie>) {
        self.fields = prefill.map(FormFields::from_movie).unwrap_or_default();
        self.editing = prefill.map(|movie| movie.id.clone());
        self.errors.clear();
        self.phase = FormPhase::Open;
    }

    /// Edits are accepted while open, not while a request is in flight
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        if matches!(self.phase, FormPhase::Open | FormPhase::Failed(_)) {
            self.fields.set(field, value);
            self.errors.remove(&field);
            true
        } else {
            false
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, FormPhase::Open | FormPhase::Failed(_))
    }

    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Re-validate one input and record the outcome. False only when a
    /// check ran and failed.
    pub fn check_field(&mut self, field: Field, current_year: i32) -> bool {
        if !self.can_submit() {
            return true;
        }
        match validate_field(field, self.fields.get(field), current_year) {
            Some(err) => {
                self.errors.insert(field, err);
                false
            }
            None => {
                self.errors.remove(&field);
                true
            }
        }
    }

    /// Trim inputs and validate. Records the failure on the form.
    pub fn prepare(&mut self, current_year: i32) -> Result<MovieDraft, ValidationError> {
        self.fields.trim_all();
        match self.fields.to_draft(current_year) {
            Ok(draft) => {
                self.errors.clear();
                Ok(draft)
            }
            Err(err) => {
                self.errors.insert(err.field(), err.clone());
                self.phase = FormPhase::Open;
                Err(err)
            }
        }
    }

    pub fn mark_submitting(&mut self) {
        self.phase = FormPhase::Submitting;
    }

    /// Close after a confirmed save. False if the user already closed it.
    pub fn complete(&mut self) -> bool {
        if self.is_submitting() {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Keep the form open with the remote failure reason
    pub fn fail(&mut self, reason: String) -> bool {
        if self.is_submitting() {
            self.phase = FormPhase::Failed(reason);
            true
        } else {
            false
        }
    }

    /// Close without saving. No-op on a closed form.
    pub fn cancel(&mut self) -> bool {
        if self.is_open() {
            self.reset();
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        *self = FormState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn filled() -> FormState {
        let mut form = FormState::default();
        form.open(None);
        form.set_field(Field::Title, "  Jaws ".into());
        form.set_field(Field::Director, "Spielberg".into());
        form.set_field(Field::Description, " Un tiburón ".into());
        form
    }

    #[test]
    fn test_prepare_trims_and_normalizes_image() {
        let mut form = filled();
        form.set_field(Field::Image, "   ".into());

        let draft = form.prepare(YEAR).unwrap();
        assert_eq!(draft.title, "Jaws");
        assert_eq!(draft.description, "Un tiburón");
        assert_eq!(draft.image, None);
        assert_eq!(form.fields.title, "Jaws");
    }

    #[test]
    fn test_whitespace_required_field_is_rejected_with_first_missing() {
        let mut form = filled();
        form.set_field(Field::Director, "   ".into());
        form.set_field(Field::Description, "".into());

        let err = form.prepare(YEAR).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired { field: Field::Director });
        assert_eq!(form.phase, FormPhase::Open);
        assert_eq!(form.error(Field::Director), Some(&err));
    }

    #[test]
    fn test_year_and_rating_ranges() {
        let mut form = filled();
        form.set_field(Field::Year, "1899".into());
        assert_eq!(
            form.prepare(YEAR).unwrap_err(),
            ValidationError::YearOutOfRange { min: MIN_YEAR, max: YEAR + FUTURE_YEARS }
        );

        form.set_field(Field::Year, "1975".into());
        form.set_field(Field::Rating, "7,5".into());
        let draft = form.prepare(YEAR).unwrap();
        assert_eq!(draft.year, Some(1975));
        assert_eq!(draft.rating, Some(7.5));

        form.set_field(Field::Rating, "11".into());
        assert_eq!(form.prepare(YEAR).unwrap_err(), ValidationError::RatingOutOfRange);
    }

    #[test]
    fn test_field_validator_rules() {
        assert_eq!(
            validate_field(Field::Title, " J ", YEAR),
            Some(ValidationError::TooShort { field: Field::Title, min: MIN_NAME_CHARS })
        );
        assert_eq!(validate_field(Field::Director, "Lu", YEAR), None);
        assert_eq!(
            validate_field(Field::Description, "   ", YEAR),
            Some(ValidationError::MissingRequired { field: Field::Description })
        );
        assert_eq!(validate_field(Field::Year, "", YEAR), None);
        assert_eq!(validate_field(Field::Year, "2031", YEAR), None);
        assert!(validate_field(Field::Year, "2032", YEAR).is_some());
        assert!(validate_field(Field::Year, "mil", YEAR).is_some());
        assert_eq!(validate_field(Field::Rating, "0,5", YEAR), Some(ValidationError::RatingOutOfRange));
        assert_eq!(validate_field(Field::Genre, "", YEAR), None);
    }

    #[test]
    fn test_check_field_records_and_clears_errors() {
        let mut form = filled();
        form.set_field(Field::Year, "1850".into());
        assert!(!form.check_field(Field::Year, YEAR));
        assert!(matches!(form.error(Field::Year), Some(ValidationError::YearOutOfRange { .. })));

        form.set_field(Field::Year, "1975".into());
        assert!(form.check_field(Field::Year, YEAR));
        assert!(form.errors.is_empty());

        // a closed form has nothing to check
        form.cancel();
        assert!(form.check_field(Field::Title, YEAR));
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_submit_rejects_one_letter_title() {
        let mut form = filled();
        form.set_field(Field::Title, "J".into());

        let err = form.prepare(YEAR).unwrap_err();
        assert_eq!(err, ValidationError::TooShort { field: Field::Title, min: MIN_NAME_CHARS });
        assert_eq!(form.error(Field::Title), Some(&err));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut form = filled();
        assert!(form.cancel());
        assert_eq!(form, FormState::default());

        assert!(!form.cancel());
        assert_eq!(form, FormState::default());
    }

    #[test]
    fn test_fail_keeps_input_and_complete_clears_it() {
        let mut form = filled();
        form.prepare(YEAR).unwrap();
        form.mark_submitting();
        assert!(!form.set_field(Field::Title, "ignored".into()));

        assert!(form.fail("404 Not Found".into()));
        assert_eq!(form.phase, FormPhase::Failed("404 Not Found".into()));
        assert_eq!(form.fields.title, "Jaws");
        assert!(form.can_submit());

        form.mark_submitting();
        assert!(form.complete());
        assert!(!form.is_open());
        assert!(form.fields.title.is_empty());
    }

    #[test]
    fn test_open_with_prefill_tracks_edited_id() {
        let movie = Movie {
            id: MovieId::new("9"),
            title: "Alien".into(),
            director: "Scott".into(),
            description: "Nostromo".into(),
            image: None,
            year: Some(1979),
            genre: None,
            rating: None,
        };
        let mut form = FormState::default();
        form.open(Some(&movie));

        assert_eq!(form.editing, Some(MovieId::new("9")));
        assert_eq!(form.fields.year, "1979");
        assert_eq!(form.fields.image, "");
    }
}
