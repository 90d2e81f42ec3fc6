use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use actix_files::Files;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::catalog::{Catalog, ResolvedAssignment};
use crate::config::{ServerSettings, TimetableConfig};
use crate::display::{describe_notification, render_swap_preview};
use crate::form::{save_assignment, validate_form, AssignmentForm};
use crate::schedule::{
    slot_label, Assignment, GridDimensions, GridStore, Notification, SlotChange, SlotCoordinate,
    SwapCoordinator, SwapState,
};

/// The grid and the swap gesture in flight, always mutated together under one lock
#[derive(Debug, Default)]
pub struct Timetable {
    pub store: GridStore,
    pub swap: SwapCoordinator,
}

impl Timetable {
    pub fn new(store: GridStore) -> Self {
        Self {
            store,
            swap: SwapCoordinator::new(),
        }
    }
}

pub struct AppState {
    pub timetable: Mutex<Timetable>,
    pub config: TimetableConfig,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(config: TimetableConfig, catalog: Catalog, store: GridStore) -> Self {
        Self {
            timetable: Mutex::new(Timetable::new(store)),
            config,
            catalog,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Timetable>> {
        self.timetable
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("timetable state is poisoned"))
    }
}

/// Request-side coordinate; wider than `SlotCoordinate` so any integer gets
/// an out-of-range answer instead of an extractor error
#[derive(Deserialize)]
pub struct SlotRequest {
    day: i64,
    period: i64,
}

#[derive(Deserialize)]
pub struct GridQuery {
    class: Option<String>,
}

#[derive(Serialize)]
pub struct ConfigResponse<'a> {
    #[serde(flatten)]
    config: &'a TimetableConfig,
    dimensions: GridDimensions,
}

#[derive(Serialize)]
pub struct GridSlot {
    day: u8,
    period: u8,
    label: String,
    #[serde(flatten)]
    assignment: Assignment,
    names: ResolvedAssignment,
}

#[derive(Serialize)]
pub struct GridResponse {
    class: Option<String>,
    slots: Vec<GridSlot>,
}

#[derive(Serialize)]
pub struct SwapResponse {
    success: bool,
    #[serde(flatten)]
    state: SwapState,
    selected: Vec<SlotCoordinate>,
    preview: Option<String>,
    change: Option<SlotChange>,
    notifications: Vec<Notification>,
    messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": message.to_string()}))
}

fn swap_response(
    state: &AppState,
    timetable: &Timetable,
    success: bool,
    change: Option<SlotChange>,
    notifications: Vec<Notification>,
    error: Option<String>,
) -> SwapResponse {
    let swap_state = timetable.swap.state();
    SwapResponse {
        success,
        state: swap_state,
        selected: swap_state.selected(),
        preview: render_swap_preview(&state.config, &timetable.store, &state.catalog, swap_state),
        change,
        messages: notifications
            .iter()
            .map(|n| describe_notification(&state.config, n))
            .collect(),
        notifications,
        error,
    }
}

async fn get_config(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ConfigResponse {
        config: &state.config,
        dimensions: state.config.dimensions(),
    }))
}

async fn get_catalog(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.catalog))
}

// "all" or no parameter means every class
async fn get_grid(query: web::Query<GridQuery>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let class = query.class.clone().filter(|c| c != "all");
    let timetable = state.lock()?;

    let slots = timetable
        .store
        .snapshot_for_class(class.as_deref())
        .into_iter()
        .map(|entry| GridSlot {
            day: entry.day,
            period: entry.period,
            label: slot_label(&state.config, entry.coordinate()),
            names: state.catalog.resolve(&entry.assignment),
            assignment: entry.assignment,
        })
        .collect();

    Ok(HttpResponse::Ok().json(GridResponse { class, slots }))
}

async fn get_slot(path: web::Path<(i64, i64)>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let (day, period) = path.into_inner();
    let timetable = state.lock()?;

    let lookup = timetable
        .store
        .coordinate(day, period)
        .and_then(|coord| Ok((coord, timetable.store.get(coord)?)));
    match lookup {
        Ok((coord, assignment)) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "label": slot_label(&state.config, coord),
            "assignment": assignment,
            "names": assignment.map(|a| state.catalog.resolve(a)),
        }))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn put_slot(
    path: web::Path<(i64, i64)>,
    form: web::Json<AssignmentForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (day, period) = path.into_inner();

    let assignment = match validate_form(&form, &state.catalog) {
        Ok(a) => a,
        Err(message) => return Ok(bad_request(message)),
    };

    let mut timetable = state.lock()?;
    let saved = timetable
        .store
        .coordinate(day, period)
        .and_then(|coord| save_assignment(&mut timetable.store, coord, assignment));
    match saved {
        Ok(outcome) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "kind": outcome.kind,
            "previous": outcome.previous,
        }))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn delete_slot(path: web::Path<(i64, i64)>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let (day, period) = path.into_inner();
    let mut timetable = state.lock()?;

    let removed = timetable
        .store
        .coordinate(day, period)
        .and_then(|coord| timetable.store.remove(coord));
    match removed {
        Ok(removed) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "removed": removed,
        }))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn get_swap(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timetable = state.lock()?;
    Ok(HttpResponse::Ok().json(swap_response(&state, &timetable, true, None, Vec::new(), None)))
}

async fn select_slot(slot: web::Json<SlotRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut guard = state.lock()?;
    let timetable = &mut *guard;
    let mut notifications: Vec<Notification> = Vec::new();

    let result = timetable
        .swap
        .select_position(&timetable.store, slot.day, slot.period, &mut notifications);
    match result {
        // An ignored selection is a valid request with nothing done
        Ok(accepted) => Ok(HttpResponse::Ok().json(swap_response(
            &state,
            timetable,
            accepted,
            None,
            notifications,
            None,
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(swap_response(
            &state,
            timetable,
            false,
            None,
            notifications,
            Some(e.to_string()),
        ))),
    }
}

async fn confirm_swap(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut guard = state.lock()?;
    let timetable = &mut *guard;
    let mut notifications: Vec<Notification> = Vec::new();

    let change = timetable.swap.confirm(&mut timetable.store, &mut notifications);
    let success = change.is_some();
    Ok(HttpResponse::Ok().json(swap_response(&state, timetable, success, change, notifications, None)))
}

async fn cancel_swap(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut guard = state.lock()?;
    let timetable = &mut *guard;
    let mut notifications: Vec<Notification> = Vec::new();

    let success = timetable.swap.cancel(&mut notifications);
    Ok(HttpResponse::Ok().json(swap_response(&state, timetable, success, None, notifications, None)))
}

/// JSON API routes, shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/config", web::get().to(get_config))
        .route("/api/catalog", web::get().to(get_catalog))
        .route("/api/grid", web::get().to(get_grid))
        .service(
            web::resource("/api/slot/{day}/{period}")
                .route(web::get().to(get_slot))
                .route(web::put().to(put_slot))
                .route(web::delete().to(delete_slot)),
        )
        .route("/api/swap", web::get().to(get_swap))
        .route("/api/swap/select", web::post().to(select_slot))
        .route("/api/swap/confirm", web::post().to(confirm_swap))
        .route("/api/swap/cancel", web::post().to(cancel_swap));
}

pub async fn start_server(settings: ServerSettings, app_state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(app_state);
    let static_dir = settings.static_dir.clone();
    info!(bind = %settings.bind, port = settings.port, "starting timetable server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .service(Files::new("/static", static_dir.clone()).index_file("index.html"))
    })
    .bind((settings.bind.as_str(), settings.port))?
    .run()
    .await
}
