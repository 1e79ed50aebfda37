use super::hall::Hall;
use super::reaper::Reaper;
use crate::ID;
use crate::gameroom::Member;
use crate::gameroom::Room;
use crate::gameroom::Timeouts;
use crate::gameroom::Variant;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use serde::Deserialize;

pub struct Server;

impl Server {
    pub async fn run(bind: String, timeouts: Timeouts) -> Result<(), std::io::Error> {
        let state = web::Data::new(Hall::new(timeouts));
        tokio::spawn(Reaper::new(state.clone().into_inner()).run());
        log::info!("starting hosting server on {}", bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .route("/health", web::get().to(health))
                .route("/rooms", web::post().to(create))
                .route("/enter/{room_id}", web::get().to(enter))
        })
        .workers(4)
        .bind(bind)?
        .run()
        .await
    }
}

#[derive(Debug, Deserialize)]
struct CreateQuery {
    variant: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnterQuery {
    name: Option<String>,
}

async fn health(hall: web::Data<Hall>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "rooms": hall.rooms().await }))
}

async fn create(hall: web::Data<Hall>, query: web::Query<CreateQuery>) -> impl Responder {
    let variant = match query.variant.as_deref().map(Variant::try_from) {
        None => Variant::default(),
        Some(Ok(variant)) => variant,
        Some(Err(e)) => return HttpResponse::BadRequest().body(e),
    };
    let id = hall.create(variant).await;
    HttpResponse::Ok().json(serde_json::json!({ "room_id": id.to_string(), "variant": variant }))
}

async fn enter(
    hall: web::Data<Hall>,
    path: web::Path<String>,
    query: web::Query<EnterQuery>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let Ok(room) = ID::<Room>::try_from(path.as_str()) else {
        return HttpResponse::BadRequest().body("invalid room id");
    };
    let name = query.name.clone().unwrap_or_else(|| "guest".to_string());
    let (member, inbox) = match hall.connect(room, &name).await {
        Ok(pair) => pair,
        Err(e) => return HttpResponse::NotFound().body(e.to_string()),
    };
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            bridge(hall, member, inbox, session, stream);
            response
        }
        Err(e) => {
            hall.disconnect(member).await;
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Pumps lines between one WebSocket and the hall until either side ends.
fn bridge(
    hall: web::Data<Hall>,
    member: ID<Member>,
    mut inbox: tokio::sync::mpsc::UnboundedReceiver<String>,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    use futures::StreamExt;
    log::info!("[hall] {} connected", member);
    actix_web::rt::spawn(async move {
        'sesh: loop {
            tokio::select! {
                biased;
                msg = inbox.recv() => match msg {
                    Some(json) => if session.text(json).await.is_err() { break 'sesh },
                    None => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        if let Err(e) = hall.route(member, text.to_string()).await {
                            log::warn!("[hall] {}: {}", member, e);
                            break 'sesh;
                        }
                    }
                    Some(Ok(actix_ws::Message::Ping(bytes))) => if session.pong(&bytes).await.is_err() { break 'sesh },
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        hall.disconnect(member).await;
        let _ = session.close(None).await;
    });
}
