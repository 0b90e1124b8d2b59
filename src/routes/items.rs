use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{NewTask, Task, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, http::header, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Lists every task.
///
/// The list is shared: it is not filtered by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, ordered by id.
/// - `401 Unauthorized`: missing or invalid token.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "All tasks", body = [Task]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn list_items(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list().await?;
    log::debug!("{} listed {} tasks", user.username, tasks.len());
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task.
///
/// ## Request Body:
/// - `name`: 1 to 100 characters.
/// - `isComplete` (optional): defaults to `false`.
///
/// ## Responses:
/// - `201 Created`: the new task, with a `Location` header.
/// - `400 Bad Request`: empty or over-long name, or a malformed body.
/// - `401 Unauthorized`: missing or invalid token.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid name or malformed body"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state
        .tasks
        .create(&task_data.name, task_data.is_complete)
        .await?;
    log::info!("{} created task {}", user.username, task.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/items/{}", task.id)))
        .json(task))
}

/// Overwrites a task's name and completion flag.
///
/// ## Path Parameters:
/// - `id`: the task id. An `id` in the body is ignored.
///
/// ## Responses:
/// - `204 No Content`: updated.
/// - `400 Bad Request`: empty or over-long name, or a malformed body.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no task with that id.
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i32, Path, description = "Task id")),
    request_body = TaskUpdate,
    responses(
        (status = 204, description = "Task updated"),
        (status = 400, description = "Invalid name or malformed body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No task with that id"),
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}")]
pub async fn update_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let id = task_id.into_inner();

    state
        .tasks
        .update(id, &task_data.name, task_data.is_complete)
        .await?;
    log::info!("{} updated task {}", user.username, id);

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes a task.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no task with that id, including a repeated delete.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No task with that id"),
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();

    state.tasks.delete(id).await?;
    log::info!("{} deleted task {}", user.username, id);

    Ok(HttpResponse::NoContent().finish())
}
