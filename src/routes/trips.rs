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
use crate::forms::{FormErrors, TripForm, FIX_ERRORS};
use crate::models::Trip;
use crate::AppState;

#[derive(Template)]
#[template(path = "trips/list.html")]
struct TripListTemplate {
    trips: Vec<Trip>,

    flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "trips/form.html")]
struct TripFormTemplate {
    trip: Option<Trip>,
    form: TripForm,
    errors: FormErrors,
    action: String,

    flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "trips/delete.html")]
struct TripDeleteTemplate {
    trip: Trip,

    flash: Option<Flash>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips))
        .route("/create/", get(new_trip_form).post(create_trip))
        .route("/edit/{trip_id}/", get(edit_trip_form).post(update_trip))
        .route("/delete/{trip_id}/", get(confirm_delete_trip).post(delete_trip))
}

async fn find_trip(state: &AppState, raw_id: &str) -> Result<Trip, AppError> {
    let id = parse_id(raw_id)?;
    Trip::find(&state.db, id).await?.ok_or(AppError::NotFound)
}

fn render_form(
    trip: Option<Trip>,
    form: TripForm,
    errors: FormErrors,
    flash: Option<Flash>,
) -> Result<Html<String>, AppError> {
    let action = match &trip {
        Some(trip) => format!("/edit/{}/", trip.id),
        None => "/create/".to_string(),
    };
    let template = TripFormTemplate {
        trip,
        form,
        errors,
        action,
        flash,
    };
    Ok(Html(template.render()?))
}

async fn list_trips(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let trips = Trip::list(&state.db).await?;

    let template = TripListTemplate {
        trips,
        flash: flash::take(&session).await?,
    };
    Ok(Html(template.render()?))
}

async fn new_trip_form(session: Session) -> Result<impl IntoResponse, AppError> {
    let flash = flash::take(&session).await?;
    render_form(None, TripForm::default(), FormErrors::default(), flash)
}

async fn create_trip(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<TripForm>,
) -> Result<impl IntoResponse, AppError> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(render_form(None, form, errors, Some(Flash::error(FIX_ERRORS)))?
                .into_response());
        }
    };

    let trip = Trip::insert(&state.db, &fields).await?;
    tracing::info!(trip_id = trip.id, "trip created");

    flash::push(&session, Flash::success("Trip created successfully!")).await?;
    Ok(Redirect::to("/").into_response())
}

async fn edit_trip_form(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trip = find_trip(&state, &trip_id).await?;
    let form = TripForm::from(&trip);
    let flash = flash::take(&session).await?;
    render_form(Some(trip), form, FormErrors::default(), flash)
}

async fn update_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
    Form(form): Form<TripForm>,
) -> Result<impl IntoResponse, AppError> {
    let trip = find_trip(&state, &trip_id).await?;

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(
                render_form(Some(trip), form, errors, Some(Flash::error(FIX_ERRORS)))?
                    .into_response(),
            );
        }
    };

    let trip = Trip::update(&state.db, trip.id, &fields)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(trip_id = trip.id, "trip updated");

    flash::push(&session, Flash::success("Trip updated successfully!")).await?;
    Ok(Redirect::to("/").into_response())
}

async fn confirm_delete_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trip = find_trip(&state, &trip_id).await?;

    let template = TripDeleteTemplate {
        trip,
        flash: flash::take(&session).await?,
    };
    Ok(Html(template.render()?))
}

async fn delete_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&trip_id)?;
    if !Trip::delete(&state.db, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(trip_id = id, "trip deleted");

    flash::push(&session, Flash::success("Trip deleted successfully!")).await?;
    Ok(Redirect::to("/"))
}
