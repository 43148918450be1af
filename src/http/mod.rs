mod auth;
mod http_error;
mod message_map;

use self::auth::BasicAuth;
use self::http_error::HttpError;
use self::message_map::message_map;
use crate::config::Config;
use crate::database::{Database, Message, NewMessage, Status};
use crate::validation::{validate_email, validate_length, Side, ValidationError};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::middleware::Logger;
use actix_web::web::{self, Data, Query};
use actix_web::{delete, get, post, App, Error, HttpResponse, HttpServer};
use log::{debug, info, warn};
use serde::Deserialize;
use std::net::ToSocketAddrs;
use std::sync::{Mutex, MutexGuard};

type DatabaseData = Data<Mutex<Database>>;

#[derive(Deserialize)]
struct MailboxQuery {
    receiver: Option<String>,
}

#[derive(Deserialize)]
struct DeleteQuery {
    sender: Option<String>,
    receiver: Option<String>,
}

#[derive(Deserialize)]
struct WriteQuery {
    sender: Option<String>,
    receiver: Option<String>,
    message: Option<String>,
    subject: Option<String>,
}

// Empty query parameters are treated the same as missing ones
fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|value| !value.is_empty())
}

fn text(body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body.to_owned())
}

fn lock(db: &DatabaseData) -> Result<MutexGuard<Database>, HttpError> {
    db.lock()
        .map_err(|_| HttpError::from_status_code(StatusCode::INTERNAL_SERVER_ERROR))
}

// Load messages from a receiver's mailbox, mark them as read, and respond with them keyed by id
fn read_mailbox(
    query: MailboxQuery,
    config: &Config,
    db: &DatabaseData,
    load: impl FnOnce(&mut Database, &str) -> anyhow::Result<Vec<Message>>,
) -> Result<HttpResponse, HttpError> {
    let Some(receiver) = non_empty(query.receiver) else {
        return Ok(text(&config.no_messages_text));
    };

    let mut db_guard = lock(db)?;
    let mut messages = load(&mut db_guard, &receiver)?;
    db_guard.set_status(&mut messages, Status::Read)?;
    drop(db_guard);

    debug!("Read {} messages for {receiver}", messages.len());
    Ok(HttpResponse::Ok().json(message_map(messages)))
}

#[get("/")]
async fn home() -> HttpResponse {
    text("Welcome To Message System - Home Page")
}

#[get("/get_all_messages")]
async fn get_all_messages(
    query: Query<MailboxQuery>,
    config: Data<Config>,
    db: DatabaseData,
) -> Result<HttpResponse, HttpError> {
    read_mailbox(query.into_inner(), &config, &db, Database::get_messages)
}

#[get("/read_message")]
async fn read_message(
    query: Query<MailboxQuery>,
    config: Data<Config>,
    db: DatabaseData,
) -> Result<HttpResponse, HttpError> {
    read_mailbox(query.into_inner(), &config, &db, |db, receiver| {
        Ok(db.get_latest_message(receiver)?.into_iter().collect())
    })
}

#[get("/get_all_unread")]
async fn get_all_unread(
    query: Query<MailboxQuery>,
    config: Data<Config>,
    db: DatabaseData,
) -> Result<HttpResponse, HttpError> {
    read_mailbox(query.into_inner(), &config, &db, Database::get_unread_messages)
}

#[delete("/delete_message")]
async fn delete_message(
    query: Query<DeleteQuery>,
    config: Data<Config>,
    db: DatabaseData,
) -> Result<HttpResponse, HttpError> {
    let DeleteQuery { sender, receiver } = query.into_inner();
    let sender = non_empty(sender);
    let receiver = non_empty(receiver);

    let deleted = lock(&db)?.delete_messages(sender.as_deref(), receiver.as_deref())?;
    info!(
        "Deleted {deleted} messages (sender: {}, receiver: {})",
        sender.as_deref().unwrap_or("-"),
        receiver.as_deref().unwrap_or("-")
    );
    Ok(text(&config.deleted_text))
}

/// Check a message's addresses and field lengths before it is stored
fn validate_message(message: &NewMessage, max_field_length: usize) -> Result<(), ValidationError> {
    validate_email(message.sender, Side::Sender)?;
    validate_email(message.receiver, Side::Receiver)?;
    for (field, value) in [
        ("sender", message.sender),
        ("receiver", message.receiver),
        ("message", message.message),
        ("subject", message.subject),
    ] {
        validate_length(field, value, max_field_length)?;
    }
    Ok(())
}

#[post("/write_message")]
async fn write_message(
    query: Query<WriteQuery>,
    config: Data<Config>,
    db: DatabaseData,
) -> Result<HttpResponse, HttpError> {
    let WriteQuery {
        sender,
        receiver,
        message,
        subject,
    } = query.into_inner();
    let sender = sender.unwrap_or_default();
    let receiver = receiver.unwrap_or_default();
    let message = message.unwrap_or_default();
    let subject = subject.unwrap_or_default();

    let new_message = NewMessage::unread(&sender, &receiver, &message, &subject);
    if let Err(err) = validate_message(&new_message, config.max_field_length) {
        warn!("Rejected message: {err}");
        return Err(err.into());
    }

    let mut db_guard = lock(&db)?;
    let stored = db_guard.insert_message(&new_message)?;
    let mailbox_size = db_guard.count_messages(&stored.receiver)?;
    drop(db_guard);

    info!(
        "Stored message {} from {} to {}",
        stored.id, stored.sender, stored.receiver
    );
    debug!("{} now has {mailbox_size} messages", stored.receiver);
    Ok(text(&config.uploaded_text))
}

/// Build the application with the public home page and the authenticated mailbox endpoints
pub fn create_app(
    config: Data<Config>,
    db: DatabaseData,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let auth = BasicAuth::new(&config);
    App::new()
        .app_data(config)
        .app_data(db)
        .wrap(Logger::default())
        .service(home)
        .service(
            web::scope("")
                .wrap(auth)
                .service(get_all_messages)
                .service(read_message)
                .service(get_all_unread)
                .service(delete_message)
                .service(write_message),
        )
}

pub async fn start_server(
    config: Config,
    db: Database,
    addr: impl ToSocketAddrs,
) -> Result<(), std::io::Error> {
    let config = Data::new(config);
    let db = Data::new(Mutex::new(db));
    let server = HttpServer::new(move || create_app(config.clone(), db.clone())).bind(addr)?;
    for addr in server.addrs() {
        info!("Starting HTTP server on {addr}");
    }
    server.run().await
}
