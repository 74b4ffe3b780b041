use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{JournalEntry, JournalEntryFields, Trip, TripFields};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_DATE: &str = "Enter a valid date.";
pub const TOO_LONG: &str = "Ensure this value has at most 100 characters.";
pub const END_BEFORE_START: &str = "End date cannot be earlier than start date.";
pub const FIX_ERRORS: &str = "Please correct the errors in the form.";

const MAX_SHORT_TEXT: usize = 100;
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Dates are stored as text, so only four-digit unsigned years sort correctly.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Errors attached to individual fields plus errors about the form as a whole.
#[derive(Debug, Default)]
pub struct FormErrors {
    fields: HashMap<String, String>,
    form: Vec<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    pub fn add_field(&mut self, field: &str, message: &str) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn add_form(&mut self, message: &str) {
        self.form.push(message.to_string());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn form(&self) -> &[String] {
        &self.form
    }
}

fn required_text(errors: &mut FormErrors, field: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add_field(field, REQUIRED);
        return None;
    }
    Some(value.to_string())
}

fn short_text(errors: &mut FormErrors, field: &str, value: &str) -> Option<String> {
    let value = required_text(errors, field, value)?;
    if value.chars().count() > MAX_SHORT_TEXT {
        errors.add_field(field, TOO_LONG);
        return None;
    }
    Some(value)
}

fn required_date(errors: &mut FormErrors, field: &str, value: &str) -> Option<NaiveDate> {
    let value = required_text(errors, field, value)?;
    match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
        Ok(date) if YEARS.contains(&date.year()) => Some(date),
        _ => {
            errors.add_field(field, INVALID_DATE);
            None
        }
    }
}

/// Raw trip form as submitted. Missing fields deserialize as empty strings so
/// that they surface as validation errors instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TripForm {
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl TripForm {
    pub fn validate(&self) -> Result<TripFields, FormErrors> {
        let mut errors = FormErrors::default();

        let title = short_text(&mut errors, "title", &self.title);
        let destination = short_text(&mut errors, "destination", &self.destination);
        let start_date = required_date(&mut errors, "start_date", &self.start_date);
        let end_date = required_date(&mut errors, "end_date", &self.end_date);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.add_form(END_BEFORE_START);
            }
        }

        match (title, destination, start_date, end_date) {
            (Some(title), Some(destination), Some(start_date), Some(end_date))
                if errors.is_empty() =>
            {
                Ok(TripFields {
                    title,
                    destination,
                    start_date,
                    end_date,
                    description: self.description.trim().to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&Trip> for TripForm {
    fn from(trip: &Trip) -> Self {
        Self {
            title: trip.title.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date.format(DATE_FORMAT).to_string(),
            end_date: trip.end_date.format(DATE_FORMAT).to_string(),
            description: trip.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JournalEntryForm {
    pub entry_date: String,
    pub content: String,
}

impl JournalEntryForm {
    pub fn validate(&self) -> Result<JournalEntryFields, FormErrors> {
        let mut errors = FormErrors::default();

        let entry_date = required_date(&mut errors, "entry_date", &self.entry_date);
        let content = required_text(&mut errors, "content", &self.content);

        match (entry_date, content) {
            (Some(entry_date), Some(content)) => Ok(JournalEntryFields {
                entry_date,
                content,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&JournalEntry> for JournalEntryForm {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            entry_date: entry.entry_date.format(DATE_FORMAT).to_string(),
            content: entry.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_form(start: &str, end: &str) -> TripForm {
        TripForm {
            title: "Alps".to_string(),
            destination: "Switzerland".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            description: String::new(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn valid_trip_keeps_values() {
        let mut form = trip_form("2024-06-01", "2024-06-10");
        form.description = "  hiking  ".to_string();
        let fields = form.validate().unwrap();
        assert_eq!(fields.title, "Alps");
        assert_eq!(fields.destination, "Switzerland");
        assert_eq!(fields.start_date, date("2024-06-01"));
        assert_eq!(fields.end_date, date("2024-06-10"));
        assert_eq!(fields.description, "hiking");
    }

    #[test]
    fn same_day_trip_is_valid() {
        assert!(trip_form("2024-06-01", "2024-06-01").validate().is_ok());
    }

    #[test]
    fn end_before_start_is_a_form_error() {
        let errors = trip_form("2024-07-05", "2024-07-01").validate().unwrap_err();
        assert_eq!(errors.form(), [END_BEFORE_START.to_string()]);
        assert!(errors.field("start_date").is_none());
        assert!(errors.field("end_date").is_none());
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = TripForm::default().validate().unwrap_err();
        for field in ["title", "destination", "start_date", "end_date"] {
            assert_eq!(errors.field(field), Some(REQUIRED), "{field}");
        }
        assert!(errors.field("description").is_none());
        assert!(errors.form().is_empty());
    }

    #[test]
    fn whitespace_only_title_is_required() {
        let mut form = trip_form("2024-06-01", "2024-06-10");
        form.title = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("title"), Some(REQUIRED));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut form = trip_form("2024-06-01", "2024-06-10");
        form.title = "x".repeat(101);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("title"), Some(TOO_LONG));

        form.title = "x".repeat(100);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn unparseable_date_is_rejected_without_ordering_error() {
        let errors = trip_form("June 1st", "2024-06-10").validate().unwrap_err();
        assert_eq!(errors.field("start_date"), Some(INVALID_DATE));
        assert!(errors.form().is_empty());
    }

    #[test]
    fn years_outside_four_digits_are_rejected() {
        for bad in ["+12345-01-01", "0000-01-01", "-0001-01-01"] {
            let errors = trip_form(bad, "2024-06-10").validate().unwrap_err();
            assert_eq!(errors.field("start_date"), Some(INVALID_DATE), "{bad}");
        }
        assert!(trip_form("0001-01-01", "9999-12-31").validate().is_ok());
    }

    #[test]
    fn journal_entry_requires_date_and_content() {
        let errors = JournalEntryForm::default().validate().unwrap_err();
        assert_eq!(errors.field("entry_date"), Some(REQUIRED));
        assert_eq!(errors.field("content"), Some(REQUIRED));
    }

    #[test]
    fn journal_entry_valid() {
        let form = JournalEntryForm {
            entry_date: "2024-06-02".to_string(),
            content: "Arrived".to_string(),
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.entry_date, date("2024-06-02"));
        assert_eq!(fields.content, "Arrived");
    }
}
