use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Form, Router,
};
use tower_sessions::Session;

use crate::error::{parse_id, AppError};
use crate::flash::{self, Flash};
use crate::forms::{FormErrors, JournalEntryForm, FIX_ERRORS};
use crate::models::{JournalEntry, Trip};
use crate::AppState;

#[derive(Template)]
#[template(path = "journal/list.html")]
struct JournalTemplate {
    trip: Trip,
    entries: Vec<JournalEntry>,

    flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "journal/form.html")]
struct JournalEntryFormTemplate {
    trip: Trip,
    entry: Option<JournalEntry>,
    form: JournalEntryForm,
    errors: FormErrors,
    action: String,

    flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "journal/delete.html")]
struct JournalEntryDeleteTemplate {
    trip: Trip,
    entry: JournalEntry,

    flash: Option<Flash>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/journal/{trip_id}/", get(show_journal))
        .route("/journal/{trip_id}/add/", get(new_entry_form).post(create_entry))
        .route("/journal/edit/{entry_id}/", get(edit_entry_form).post(update_entry))
        .route(
            "/journal/delete/{entry_id}/",
            get(confirm_delete_entry).post(delete_entry),
        )
}

fn journal_url(trip_id: i64) -> String {
    format!("/journal/{trip_id}/")
}

async fn find_trip(state: &AppState, raw_id: &str) -> Result<Trip, AppError> {
    let id = parse_id(raw_id)?;
    Trip::find(&state.db, id).await?.ok_or(AppError::NotFound)
}

/// Look up an entry together with the trip that owns it.
async fn find_entry(state: &AppState, raw_id: &str) -> Result<(JournalEntry, Trip), AppError> {
    let id = parse_id(raw_id)?;
    let entry = JournalEntry::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let trip = Trip::find(&state.db, entry.trip_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok((entry, trip))
}

fn render_form(
    trip: Trip,
    entry: Option<JournalEntry>,
    form: JournalEntryForm,
    errors: FormErrors,
    flash: Option<Flash>,
) -> Result<Html<String>, AppError> {
    let action = match &entry {
        Some(entry) => format!("/journal/edit/{}/", entry.id),
        None => format!("/journal/{}/add/", trip.id),
    };
    let template = JournalEntryFormTemplate {
        trip,
        entry,
        form,
        errors,
        action,
        flash,
    };
    Ok(Html(template.render()?))
}

async fn show_journal(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trip = find_trip(&state, &trip_id).await?;
    let entries = JournalEntry::list_for_trip(&state.db, trip.id).await?;

    let template = JournalTemplate {
        trip,
        entries,
        flash: flash::take(&session).await?,
    };
    Ok(Html(template.render()?))
}

async fn new_entry_form(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trip = find_trip(&state, &trip_id).await?;
    let flash = flash::take(&session).await?;
    render_form(
        trip,
        None,
        JournalEntryForm::default(),
        FormErrors::default(),
        flash,
    )
}

async fn create_entry(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
    Form(form): Form<JournalEntryForm>,
) -> Result<impl IntoResponse, AppError> {
    let trip = find_trip(&state, &trip_id).await?;

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(
                render_form(trip, None, form, errors, Some(Flash::error(FIX_ERRORS)))?
                    .into_response(),
            );
        }
    };

    let entry = JournalEntry::insert(&state.db, trip.id, &fields).await?;
    tracing::info!(trip_id = trip.id, entry_id = entry.id, "journal entry created");

    flash::push(&session, Flash::success("Journal entry created!")).await?;
    Ok(Redirect::to(&journal_url(trip.id)).into_response())
}

async fn edit_entry_form(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (entry, trip) = find_entry(&state, &entry_id).await?;
    let form = JournalEntryForm::from(&entry);
    let flash = flash::take(&session).await?;
    render_form(trip, Some(entry), form, FormErrors::default(), flash)
}

async fn update_entry(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
    Form(form): Form<JournalEntryForm>,
) -> Result<impl IntoResponse, AppError> {
    let (entry, trip) = find_entry(&state, &entry_id).await?;

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(render_form(
                trip,
                Some(entry),
                form,
                errors,
                Some(Flash::error(FIX_ERRORS)),
            )?
            .into_response());
        }
    };

    let entry = JournalEntry::update(&state.db, entry.id, &fields)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(trip_id = entry.trip_id, entry_id = entry.id, "journal entry updated");

    flash::push(&session, Flash::success("Journal entry updated!")).await?;
    Ok(Redirect::to(&journal_url(entry.trip_id)).into_response())
}

async fn confirm_delete_entry(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (entry, trip) = find_entry(&state, &entry_id).await?;

    let template = JournalEntryDeleteTemplate {
        trip,
        entry,
        flash: flash::take(&session).await?,
    };
    Ok(Html(template.render()?))
}

async fn delete_entry(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&entry_id)?;
    let entry = JournalEntry::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    JournalEntry::delete(&state.db, entry.id).await?;
    tracing::info!(trip_id = entry.trip_id, entry_id = entry.id, "journal entry deleted");

    flash::push(&session, Flash::success("Journal entry deleted!")).await?;
    Ok(Redirect::to(&journal_url(entry.trip_id)))
}
