//! In-memory mock of the game server's HTTP and event-stream surface.
//!
//! Binds a real HTTP server to a random local port so client tests exercise
//! the full transport. State is seeded per test through the handle; every
//! incoming request is recorded so tests can assert that an operation made
//! exactly the calls it should (including none at all). A forced status code
//! makes every route fail with that code while still recording the hit.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::debug;

/// Session expiry handed out by the default login response: far enough in the
/// future that tests never race it.
const DEFAULT_EXPIRE_TIME: i64 = 4_102_444_800;

#[derive(Default)]
struct MockState {
    forced_status: Mutex<Option<u16>>,
    requests: Mutex<Vec<String>>,
    session: Mutex<Option<Value>>,
    created_lobby: Mutex<Option<Value>>,
    lobbies: Mutex<HashMap<String, Value>>,
    bids: Mutex<HashMap<String, Value>>,
    games: Mutex<HashMap<String, Value>>,
    widows: Mutex<HashMap<String, Value>>,
    scores: Mutex<HashMap<String, Value>>,
    last_play: Mutex<Option<Value>>,
    streams: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<String>>>>,
}

impl MockState {
    fn record(&self, req: &HttpRequest) {
        let line = format!("{} {}", req.method(), req.path());
        debug!(%line, "mock server hit");
        self.requests.lock().push(line);
    }

    fn forced(&self) -> Option<HttpResponse> {
        let code = (*self.forced_status.lock())?;
        let status = StatusCode::from_u16(code).expect("forced status must be a valid HTTP code");
        Some(HttpResponse::build(status).finish())
    }

    fn json_or_not_found(&self, map: &Mutex<HashMap<String, Value>>, id: &str) -> HttpResponse {
        match map.lock().get(id) {
            Some(value) => HttpResponse::Ok().json(value),
            None => HttpResponse::NotFound().finish(),
        }
    }

    fn open_stream(&self, key: String) -> HttpResponse {
        let (sender, receiver) = mpsc::unbounded_channel::<String>();
        self.streams.lock().entry(key).or_default().push(sender);
        let body = UnboundedReceiverStream::new(receiver)
            .map(|frame| Ok::<_, Infallible>(web::Bytes::from(frame)));
        HttpResponse::Ok()
            .content_type("text/event-stream")
            .insert_header(("Cache-Control", "no-cache"))
            .streaming(body)
    }
}

async fn login(req: HttpRequest, state: web::Data<MockState>, body: web::Json<Value>) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    let name = body["name"].as_str().unwrap_or("player");
    HttpResponse::Ok().json(json!({
        "name": name,
        "admin": false,
        "expireTime": DEFAULT_EXPIRE_TIME,
    }))
}

async fn logout(req: HttpRequest, state: web::Data<MockState>) -> HttpResponse {
    state.record(&req);
    state.forced().unwrap_or_else(|| HttpResponse::Ok().finish())
}

async fn auth_status(req: HttpRequest, state: web::Data<MockState>) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    match &*state.session.lock() {
        Some(session) => HttpResponse::Ok().json(session),
        None => HttpResponse::Unauthorized().finish(),
    }
}

async fn register(req: HttpRequest, state: web::Data<MockState>, _body: web::Json<Value>) -> HttpResponse {
    state.record(&req);
    state
        .forced()
        .unwrap_or_else(|| HttpResponse::Accepted().finish())
}

async fn create_game(req: HttpRequest, state: web::Data<MockState>) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    let lobby = state.created_lobby.lock().clone().unwrap_or_else(|| {
        json!({
            "id": "created-1",
            "host": "alice",
            "players": ["alice", "", "", ""],
            "started": false,
        })
    });
    state
        .lobbies
        .lock()
        .insert(lobby["id"].as_str().unwrap_or_default().to_string(), lobby.clone());
    HttpResponse::Ok().json(lobby)
}

async fn create_lobby(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    let id = path.into_inner();
    let lobby = json!({
        "id": id,
        "host": "alice",
        "players": ["alice", "", "", ""],
        "started": false,
    });
    state.lobbies.lock().insert(id, lobby.clone());
    HttpResponse::Ok().json(lobby)
}

async fn get_lobby(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.json_or_not_found(&state.lobbies, &path.into_inner())
}

async fn join_lobby(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.json_or_not_found(&state.lobbies, &path.into_inner())
}

async fn swap_lobby(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
    _body: web::Json<Value>,
) -> HttpResponse {
    state.record(&req);
    state
        .forced()
        .unwrap_or_else(|| HttpResponse::Accepted().finish())
}

async fn leave_lobby(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    state.forced().unwrap_or_else(|| HttpResponse::Ok().finish())
}

async fn subscribe_lobby(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.open_stream(format!("lobbies/{}", path.into_inner()))
}

async fn start_bidding(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    state.forced().unwrap_or_else(|| HttpResponse::Ok().finish())
}

async fn get_bid_state(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.json_or_not_found(&state.bids, &path.into_inner())
}

async fn submit_bid(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
    _body: web::Json<Value>,
) -> HttpResponse {
    state.record(&req);
    state.forced().unwrap_or_else(|| HttpResponse::Ok().finish())
}

async fn subscribe_bidding(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.open_stream(format!("bidding/{}", path.into_inner()))
}

async fn get_game(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.json_or_not_found(&state.games, &path.into_inner())
}

async fn get_widow(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.json_or_not_found(&state.widows, &path.into_inner())
}

async fn start_round(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
    _body: web::Json<Value>,
) -> HttpResponse {
    state.record(&req);
    state.forced().unwrap_or_else(|| HttpResponse::Ok().finish())
}

async fn get_score(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.json_or_not_found(&state.scores, &path.into_inner())
}

async fn play_card(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    *state.last_play.lock() = Some(body.into_inner());
    HttpResponse::Ok().finish()
}

async fn finish_trick(
    req: HttpRequest,
    state: web::Data<MockState>,
    _path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    state.forced().unwrap_or_else(|| HttpResponse::Ok().finish())
}

async fn subscribe_game(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.open_stream(format!("games/{}", path.into_inner()))
}

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/auth/login").route(web::post().to(login)))
            .service(web::resource("/auth/logout").route(web::post().to(logout)))
            .service(web::resource("/auth/status").route(web::get().to(auth_status)))
            .service(web::resource("/auth/register").route(web::post().to(register)))
            .service(web::resource("/games/create").route(web::post().to(create_game)))
            .service(
                web::resource("/lobbies/{id}")
                    .route(web::put().to(create_lobby))
                    .route(web::get().to(get_lobby)),
            )
            .service(web::resource("/lobbies/{id}/join").route(web::post().to(join_lobby)))
            .service(web::resource("/lobbies/{id}/swap").route(web::post().to(swap_lobby)))
            .service(web::resource("/lobbies/{id}/leave").route(web::post().to(leave_lobby)))
            .service(web::resource("/lobbies/{id}/subscribe").route(web::get().to(subscribe_lobby)))
            .service(
                web::resource("/bidding/{id}")
                    .route(web::put().to(start_bidding))
                    .route(web::get().to(get_bid_state))
                    .route(web::post().to(submit_bid)),
            )
            .service(
                web::resource("/bidding/{id}/subscribe").route(web::get().to(subscribe_bidding)),
            )
            .service(web::resource("/games/{id}").route(web::get().to(get_game)))
            .service(web::resource("/games/{id}/widow").route(web::get().to(get_widow)))
            .service(web::resource("/games/{id}/start").route(web::post().to(start_round)))
            .service(web::resource("/games/{id}/score").route(web::get().to(get_score)))
            .service(web::resource("/games/{id}/play").route(web::post().to(play_card)))
            .service(web::resource("/games/{id}/finish").route(web::post().to(finish_trick)))
            .service(web::resource("/games/{id}/subscribe").route(web::get().to(subscribe_game))),
    );
}

/// Handle to a running mock server. Dropping it leaves the server running
/// until the test binary exits; call [`shutdown`](Self::shutdown) for an
/// orderly stop.
pub struct MockGameServer {
    addr: SocketAddr,
    handle: actix_web::dev::ServerHandle,
    state: Arc<MockState>,
}

impl MockGameServer {
    /// Bind to `127.0.0.1:0` and start serving.
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server local addr");

        let state = Arc::new(MockState::default());
        let data = web::Data::from(state.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .configure(configure_routes)
        })
        .workers(1)
        .listen(listener)
        .expect("listen on mock server socket")
        .run();

        let handle = server.handle();
        tokio::spawn(server);

        Self {
            addr,
            handle,
            state,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop immediately; open event streams would otherwise hold a graceful
    /// stop until the shutdown timeout.
    pub async fn shutdown(self) {
        self.handle.stop(false).await;
    }

    /// Make every route answer with `code` (hits are still recorded).
    pub fn force_status(&self, code: u16) {
        *self.state.forced_status.lock() = Some(code);
    }

    pub fn clear_forced_status(&self) {
        *self.state.forced_status.lock() = None;
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    /// Recorded requests as `"METHOD /path"` lines, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().clone()
    }

    pub fn seed_session(&self, session: Value) {
        *self.state.session.lock() = Some(session);
    }

    pub fn seed_created_lobby(&self, lobby: Value) {
        *self.state.created_lobby.lock() = Some(lobby);
    }

    pub fn seed_lobby(&self, id: &str, lobby: Value) {
        self.state.lobbies.lock().insert(id.to_string(), lobby);
    }

    pub fn seed_bid(&self, id: &str, bid: Value) {
        self.state.bids.lock().insert(id.to_string(), bid);
    }

    pub fn seed_game(&self, id: &str, game: Value) {
        self.state.games.lock().insert(id.to_string(), game);
    }

    pub fn seed_widow(&self, id: &str, widow: Value) {
        self.state.widows.lock().insert(id.to_string(), widow);
    }

    pub fn seed_score(&self, id: &str, score: Value) {
        self.state.scores.lock().insert(id.to_string(), score);
    }

    /// Body of the most recent `/play` request, if any.
    pub fn last_play(&self) -> Option<Value> {
        self.state.last_play.lock().clone()
    }

    /// Push a raw event-stream frame to every subscriber of `channel`
    /// (`"lobbies/{id}"`, `"bidding/{id}"`, or `"games/{id}"`).
    pub fn push_frame(&self, channel: &str, frame: &str) {
        let streams = self.state.streams.lock();
        if let Some(senders) = streams.get(channel) {
            for sender in senders {
                let _ = sender.send(frame.to_string());
            }
        }
    }

    /// Push an `update` frame carrying `data` as its JSON payload.
    pub fn push_update(&self, channel: &str, data: &Value) {
        self.push_frame(channel, &format!("event: update\ndata: {data}\n\n"));
    }

    /// Push a bare control frame (`continue`, `end`, `delete`).
    pub fn push_control(&self, channel: &str, name: &str) {
        self.push_frame(channel, &format!("event: {name}\n\n"));
    }

    /// Number of open subscriptions on `channel`.
    pub fn stream_count(&self, channel: &str) -> usize {
        self.state
            .streams
            .lock()
            .get(channel)
            .map_or(0, Vec::len)
    }

    /// Drop the server side of every subscription on `channel`, ending the
    /// streams from the server's end.
    pub fn close_streams(&self, channel: &str) {
        self.state.streams.lock().remove(channel);
    }
}
