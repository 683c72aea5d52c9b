//! # Form Model
//!
//! Live form input and the immutable snapshot taken at submit time.
//!
//! [`FormState`] is what the user types into. Submitting never reads it
//! directly: the controller calls [`FormState::snapshot`], validates the
//! snapshot against the field constraints, and converts it into a field set.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Input constraints of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Integer { min: i64, max: Option<i64> },
    Checkbox,
}

/// Current value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    value: FieldValue,
    default: FieldValue,
}

impl FormField {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Text)
    }

    pub fn email(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Email)
    }

    pub fn integer(key: &'static str, label: &'static str, min: i64, max: Option<i64>) -> Self {
        Self::with_kind(key, label, FieldKind::Integer { min, max })
    }

    pub fn checkbox(key: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Checkbox,
            required: false,
            value: FieldValue::Flag(default),
            default: FieldValue::Flag(default),
        }
    }

    fn with_kind(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            value: FieldValue::Text(String::new()),
            default: FieldValue::Text(String::new()),
        }
    }

    /// Mark the field as not required
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    fn text_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(text) => text,
            FieldValue::Flag(_) => "",
        }
    }

    fn flag_value(&self) -> bool {
        matches!(self.value, FieldValue::Flag(true))
    }

    fn accepts(&self, ch: char) -> bool {
        match self.kind {
            FieldKind::Text | FieldKind::Email => !ch.is_control(),
            FieldKind::Integer { .. } => {
                ch.is_ascii_digit() || (ch == '-' && self.text_value().is_empty())
            }
            FieldKind::Checkbox => false,
        }
    }

    fn validate(&self) -> Result<(), FormError> {
        let label = self.label.to_string();
        match self.kind {
            FieldKind::Checkbox => Ok(()),
            FieldKind::Text => {
                if self.required && self.text_value().is_empty() {
                    return Err(FormError::Required { label });
                }
                Ok(())
            }
            FieldKind::Email => {
                let text = self.text_value();
                if text.is_empty() {
                    if self.required {
                        return Err(FormError::Required { label });
                    }
                    return Ok(());
                }
                if !email_pattern().is_match(text) {
                    return Err(FormError::InvalidEmail { label });
                }
                Ok(())
            }
            FieldKind::Integer { min, max } => {
                let text = self.text_value();
                if text.is_empty() {
                    if self.required {
                        return Err(FormError::Required { label });
                    }
                    return Ok(());
                }
                let number: i64 = text
                    .parse()
                    .map_err(|_| FormError::NotANumber { label: label.clone() })?;
                if number < min {
                    return Err(FormError::TooSmall { label, min });
                }
                if let Some(max) = max {
                    if number > max {
                        return Err(FormError::TooLarge { label, max });
                    }
                }
                Ok(())
            }
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern is a valid regex")
    })
}

/// Constraint violations reported before a submission leaves the client
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill out the {label} field.")]
    Required { label: String },

    #[error("{label} must be a number.")]
    NotANumber { label: String },

    #[error("{label} must be at least {min}.")]
    TooSmall { label: String, min: i64 },

    #[error("{label} must be at most {max}.")]
    TooLarge { label: String, max: i64 },

    #[error("{label} must be a valid email address.")]
    InvalidEmail { label: String },

    #[error("form has no field named '{0}'")]
    UnknownField(&'static str),
}

/// Editable form: an ordered list of fields with one focused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    title: String,
    fields: Vec<FormField>,
    focused: usize,
}

impl FormState {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            focused: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    /// Type a character into the focused field. Returns whether anything changed.
    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(field) = self.fields.get_mut(self.focused) else {
            return false;
        };
        if field.is_checkbox() && ch == ' ' {
            return self.toggle();
        }
        if !field.accepts(ch) {
            return false;
        }
        if let FieldValue::Text(text) = &mut field.value {
            text.push(ch);
            return true;
        }
        false
    }

    pub fn backspace(&mut self) -> bool {
        match self.fields.get_mut(self.focused).map(|field| &mut field.value) {
            Some(FieldValue::Text(text)) => text.pop().is_some(),
            _ => false,
        }
    }

    /// Flip the focused checkbox
    pub fn toggle(&mut self) -> bool {
        match self.fields.get_mut(self.focused).map(|field| &mut field.value) {
            Some(FieldValue::Flag(flag)) => {
                *flag = !*flag;
                true
            }
            _ => false,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Restore every field to its default and focus the first one
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
        self.focused = 0;
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.field(key).map(FormField::value)
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.field_mut(key).map(|field| &mut field.value) {
            Some(FieldValue::Text(text)) => {
                *text = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn set_flag(&mut self, key: &str, value: bool) -> bool {
        match self.field_mut(key).map(|field| &mut field.value) {
            Some(FieldValue::Flag(flag)) => {
                *flag = value;
                true
            }
            _ => false,
        }
    }

    /// Freeze the current input
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields.clone(),
        }
    }

    fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.key == key)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.key == key)
    }
}

/// Immutable copy of a form's values taken at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: Vec<FormField>,
}

impl FormSnapshot {
    /// Check every field constraint, reporting the first violation in field order
    pub fn validate(&self) -> Result<(), FormError> {
        self.fields.iter().try_for_each(FormField::validate)
    }

    pub fn text(&self, key: &'static str) -> Result<String, FormError> {
        self.field(key).map(|field| field.text_value().to_string())
    }

    /// Text value, with an empty input read as absent
    pub fn optional_text(&self, key: &'static str) -> Result<Option<String>, FormError> {
        let text = self.text(key)?;
        Ok((!text.is_empty()).then_some(text))
    }

    pub fn integer(&self, key: &'static str) -> Result<i64, FormError> {
        let field = self.field(key)?;
        field
            .text_value()
            .parse()
            .map_err(|_| FormError::NotANumber {
                label: field.label.to_string(),
            })
    }

    pub fn flag(&self, key: &'static str) -> Result<bool, FormError> {
        self.field(key).map(FormField::flag_value)
    }

    fn field(&self, key: &'static str) -> Result<&FormField, FormError> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .ok_or(FormError::UnknownField(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> FormState {
        FormState::new(
            "Sample",
            vec![
                FormField::text("name", "Name"),
                FormField::integer("age", "Age", 1, None),
                FormField::email("email", "Email"),
                FormField::text("note", "Note").optional(),
                FormField::checkbox("active", "Active", true),
            ],
        )
    }

    fn type_text(form: &mut FormState, text: &str) {
        for ch in text.chars() {
            form.insert_char(ch);
        }
    }

    #[test]
    fn typing_should_edit_focused_field() {
        let mut form = sample_form();
        type_text(&mut form, "Ann");
        assert_eq!(form.value("name"), Some(&FieldValue::Text("Ann".into())));

        form.backspace();
        assert_eq!(form.value("name"), Some(&FieldValue::Text("An".into())));
    }

    #[test]
    fn integer_field_should_reject_non_digits() {
        let mut form = sample_form();
        form.focus_next();
        type_text(&mut form, "2x0");
        assert_eq!(form.value("age"), Some(&FieldValue::Text("20".into())));
    }

    #[test]
    fn focus_should_wrap_both_ways() {
        let mut form = sample_form();
        form.focus_prev();
        assert_eq!(form.focused_field().unwrap().key(), "active");
        form.focus_next();
        assert_eq!(form.focused_index(), 0);
    }

    #[test]
    fn space_on_checkbox_should_toggle() {
        let mut form = sample_form();
        form.focus_prev();
        assert!(form.insert_char(' '));
        assert_eq!(form.value("active"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn reset_should_restore_defaults() {
        let mut form = sample_form();
        type_text(&mut form, "Ann");
        form.set_flag("active", false);
        form.focus_next();

        form.reset();

        assert_eq!(form.value("name"), Some(&FieldValue::Text(String::new())));
        assert_eq!(form.value("active"), Some(&FieldValue::Flag(true)));
        assert_eq!(form.focused_index(), 0);
    }

    #[test]
    fn snapshot_should_not_follow_later_edits() {
        let mut form = sample_form();
        form.set_text("name", "Ann");
        let snapshot = form.snapshot();

        form.set_text("name", "Bob");

        assert_eq!(snapshot.text("name").unwrap(), "Ann");
    }

    #[test]
    fn validate_should_report_first_missing_required_field() {
        let form = sample_form();
        let error = form.snapshot().validate().unwrap_err();
        assert_eq!(error.to_string(), "Please fill out the Name field.");
    }

    #[test]
    fn validate_should_enforce_integer_bounds() {
        let mut form = sample_form();
        form.set_text("name", "Ann");
        form.set_text("email", "a@x.com");
        form.set_text("age", "0");

        let error = form.snapshot().validate().unwrap_err();
        assert_eq!(
            error,
            FormError::TooSmall {
                label: "Age".into(),
                min: 1
            }
        );
    }

    #[test]
    fn validate_should_reject_malformed_email() {
        let mut form = sample_form();
        form.set_text("name", "Ann");
        form.set_text("age", "20");
        form.set_text("email", "not-an-email");

        assert!(matches!(
            form.snapshot().validate(),
            Err(FormError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn optional_empty_text_should_read_as_none() {
        let mut form = sample_form();
        form.set_text("name", "Ann");
        form.set_text("age", "20");
        form.set_text("email", "a@x.com");

        let snapshot = form.snapshot();
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.optional_text("note").unwrap(), None);
        assert_eq!(snapshot.integer("age").unwrap(), 20);
        assert!(snapshot.flag("active").unwrap());
    }

    #[test]
    fn unknown_key_should_error() {
        let snapshot = sample_form().snapshot();
        assert_eq!(
            snapshot.text("missing"),
            Err(FormError::UnknownField("missing"))
        );
    }
}
