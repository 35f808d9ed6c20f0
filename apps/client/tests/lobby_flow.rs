mod support;

use rook_client::CallStatus;

#[actix_web::test]
async fn create_lobby_adopts_snapshot() {
    let server = support::start_server().await;
    let client = support::client_for(&server);

    let status = client.create_lobby("g1").await.unwrap();

    assert!(status.ok);
    let lobby = client.context().lobby.get().expect("lobby cell set");
    assert_eq!(lobby.id, "g1");
    assert_eq!(lobby.host, "alice");
    assert_eq!(lobby.players.len(), 4);

    server.shutdown().await;
}

#[actix_web::test]
async fn create_game_adopts_server_assigned_lobby() {
    let server = support::start_server().await;
    let client = support::client_for(&server);
    server.seed_created_lobby(support::lobby_json("fresh-7"));

    let status = client.create_game().await.unwrap();

    assert!(status.ok);
    assert_eq!(client.context().lobby.get().unwrap().id, "fresh-7");

    server.shutdown().await;
}

#[actix_web::test]
async fn join_lobby_adopts_snapshot() {
    let server = support::start_server().await;
    let client = support::client_for(&server);
    server.seed_lobby("g1", support::lobby_json("g1"));

    let status = client.join_lobby("g1").await.unwrap();

    assert!(status.ok);
    assert_eq!(
        client.context().lobby.get(),
        Some(support::lobby_fixture("g1"))
    );

    server.shutdown().await;
}

#[actix_web::test]
async fn join_missing_lobby_reports_not_found() {
    let server = support::start_server().await;
    let client = support::client_for(&server);

    let status = client.join_lobby("nope").await.unwrap();

    assert_eq!(status, CallStatus { ok: false, code: 404 });
    assert!(!client.context().lobby.is_set());

    server.shutdown().await;
}

#[actix_web::test]
async fn fetch_lobby_reads_without_touching_cell() {
    let server = support::start_server().await;
    let client = support::client_for(&server);
    server.seed_lobby("g1", support::lobby_json("g1"));

    let lobby = client.fetch_lobby("g1").await.unwrap();

    assert_eq!(lobby, Some(support::lobby_fixture("g1")));
    assert!(!client.context().lobby.is_set());

    server.shutdown().await;
}

#[actix_web::test]
async fn fetch_missing_lobby_returns_none() {
    let server = support::start_server().await;
    let client = support::client_for(&server);

    assert_eq!(client.fetch_lobby("nope").await.unwrap(), None);

    server.shutdown().await;
}

#[actix_web::test]
async fn swap_without_lobby_makes_no_request() {
    let server = support::start_server().await;
    let client = support::client_for(&server);

    let status = client.swap_players(0, 2).await.unwrap();

    assert_eq!(status, CallStatus::NO_CONTEXT);
    assert_eq!(server.request_count(), 0);

    server.shutdown().await;
}

#[actix_web::test]
async fn swap_reports_server_status() {
    let server = support::start_server().await;
    let client = support::client_for(&server);
    client.context().lobby.set(Some(support::lobby_fixture("g1")));

    let status = client.swap_players(0, 2).await.unwrap();

    assert_eq!(status, CallStatus { ok: true, code: 202 });
    assert_eq!(server.requests(), vec!["POST /api/lobbies/g1/swap"]);

    server.shutdown().await;
}

#[actix_web::test]
async fn leave_clears_lobby_cell_on_success() {
    let server = support::start_server().await;
    let client = support::client_for(&server);
    client.context().lobby.set(Some(support::lobby_fixture("g1")));

    let status = client.leave_lobby().await.unwrap();

    assert!(status.ok);
    assert!(!client.context().lobby.is_set());

    server.shutdown().await;
}

#[actix_web::test]
async fn failed_leave_keeps_lobby_cell_and_carries_code() {
    let server = support::start_server().await;
    let client = support::client_for(&server);
    client.context().lobby.set(Some(support::lobby_fixture("g1")));
    server.force_status(500);

    let status = client.leave_lobby().await.unwrap();

    assert_eq!(status, CallStatus { ok: false, code: 500 });
    assert_eq!(
        client.context().lobby.get(),
        Some(support::lobby_fixture("g1"))
    );

    server.shutdown().await;
}
