//! HTTP adapter behaviour against a local fake gateway served by actix-web.

use std::sync::Mutex;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use ledger_client::domain::ports::{GatewayError, LedgerGateway};
use ledger_client::domain::{NewPerson, NewTransaction, PersonId, TransactionKind};
use ledger_client::outbound::gateway::HttpLedgerGateway;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

const STAMP: &str = "2024-05-01T12:00:00Z";

#[derive(Default)]
struct FakeLedger {
    people: Vec<Value>,
    received: Vec<Value>,
}

type Shared = web::Data<Mutex<FakeLedger>>;

#[derive(Deserialize)]
struct DeleteQuery {
    id: String,
}

async fn list_people(state: Shared) -> HttpResponse {
    let guard = state.lock().expect("fake state lock");
    HttpResponse::Ok().json(&guard.people)
}

async fn create_person(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let payload = body.into_inner();
    let mut guard = state.lock().expect("fake state lock");
    let person = json!({
        "id": format!("p{}", guard.people.len() + 1),
        "name": payload["name"],
        "age": payload["age"],
        "created_at": STAMP,
        "updated_at": STAMP,
    });
    guard.received.push(payload);
    guard.people.push(person.clone());
    HttpResponse::Created().json(person)
}

async fn delete_person(state: Shared, query: web::Query<DeleteQuery>) -> HttpResponse {
    let mut guard = state.lock().expect("fake state lock");
    let before = guard.people.len();
    guard.people.retain(|person| person["id"] != query.id.as_str());
    if guard.people.len() == before {
        HttpResponse::NotFound().json(json!({ "message": "person not found" }))
    } else {
        HttpResponse::NoContent().finish()
    }
}

async fn list_transactions() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        {
            "id": "t1",
            "person_id": "p1",
            "type": "RECEITA",
            "description": "salary",
            "amount": 500,
            "created_at": STAMP,
            "updated_at": STAMP,
        },
        {
            "id": "t2",
            "person_id": "p1",
            "type": "DESPESA",
            "description": "rent",
            "amount": 200.5,
            "created_at": STAMP,
            "updated_at": STAMP,
        }
    ]))
}

async fn create_transaction(state: Shared, body: web::Json<Value>) -> HttpResponse {
    state
        .lock()
        .expect("fake state lock")
        .received
        .push(body.into_inner());
    HttpResponse::Created().finish()
}

async fn totals() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "people_total": [{
            "person_id": "p1",
            "person_name": "Ana",
            "person_income": 500,
            "person_expense": 200,
            "person_total_amount": 300,
        }],
        "total_income": 500,
        "total_expense": 200,
        "total_amount": 300,
    }))
}

async fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().body("down for   maintenance")
}

async fn malformed() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body("{\"people_total\": oops")
}

async fn stalled() -> HttpResponse {
    actix_rt::time::sleep(Duration::from_secs(5)).await;
    HttpResponse::Ok().json(json!([]))
}

/// Serve the fake gateway on an ephemeral port and return its `/api` base.
fn serve(state: Shared) -> Url {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/person-list", web::get().to(list_people))
                    .route("/person", web::post().to(create_person))
                    .route("/person", web::delete().to(delete_person))
                    .route("/transaction-list", web::get().to(list_transactions))
                    .route("/transaction", web::post().to(create_transaction))
                    .route("/totals", web::get().to(totals)),
            )
            .route("/down/person-list", web::get().to(unavailable))
            .route("/malformed/totals", web::get().to(malformed))
            .route("/stalled/person-list", web::get().to(stalled))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake gateway");
    let addr = server
        .addrs()
        .first()
        .copied()
        .expect("bound address");
    actix_rt::spawn(server.run());
    Url::parse(&format!("http://{addr}/api")).expect("valid base url")
}

fn gateway_at(base: &Url, path: &str, timeout: Duration) -> HttpLedgerGateway {
    let url = base.join(path).expect("valid url");
    HttpLedgerGateway::new(url, timeout).expect("client builds")
}

fn gateway(base: Url) -> HttpLedgerGateway {
    HttpLedgerGateway::new(base, Duration::from_secs(5)).expect("client builds")
}

fn shared() -> Shared {
    web::Data::new(Mutex::new(FakeLedger::default()))
}

#[actix_rt::test]
async fn creates_lists_and_deletes_people() {
    let state = shared();
    let gateway = gateway(serve(state.clone()));

    let ana = NewPerson::new("Ana", 30).expect("valid person");
    gateway.create_person(&ana).await.expect("create succeeds");
    let people = gateway.list_people().await.expect("list succeeds");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Ana");
    assert_eq!(people[0].created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");

    gateway
        .delete_person(&people[0].id)
        .await
        .expect("delete succeeds");
    assert!(gateway.list_people().await.expect("list succeeds").is_empty());
    assert_eq!(
        state.lock().expect("fake state lock").received,
        vec![json!({ "name": "Ana", "age": 30 })]
    );
}

#[actix_rt::test]
async fn deleting_unknown_person_maps_to_not_found() {
    let gateway = gateway(serve(shared()));
    let id = PersonId::new("p9").expect("valid id");

    let error = gateway.delete_person(&id).await.expect_err("unknown person");

    assert!(matches!(error, GatewayError::NotFound { .. }));
    assert!(error.to_string().contains("person not found"));
}

#[actix_rt::test]
async fn transactions_decode_wire_kinds() {
    let gateway = gateway(serve(shared()));

    let transactions = gateway.list_transactions().await.expect("list succeeds");

    let kinds: Vec<_> = transactions.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TransactionKind::Income, TransactionKind::Expense]);
    assert_eq!(transactions[1].amount, 200.5);
}

#[actix_rt::test]
async fn created_transaction_is_sent_with_wire_kind() {
    let state = shared();
    let gateway = gateway(serve(state.clone()));
    let transaction = NewTransaction::new(
        PersonId::new("p1").expect("valid id"),
        TransactionKind::Income,
        "salary",
        500.0,
    )
    .expect("valid transaction");

    gateway
        .create_transaction(&transaction)
        .await
        .expect("empty created body is accepted");

    assert_eq!(
        state.lock().expect("fake state lock").received,
        vec![json!({
            "person_id": "p1",
            "type": "RECEITA",
            "description": "salary",
            "amount": 500.0,
        })]
    );
}

#[actix_rt::test]
async fn totals_map_into_domain_shape() {
    let gateway = gateway(serve(shared()));

    let totals = gateway.fetch_totals().await.expect("totals load");

    assert_eq!(totals.people.len(), 1);
    assert_eq!(totals.people[0].person_name, "Ana");
    assert_eq!(totals.people[0].balance, 300.0);
    assert_eq!(totals.total_balance, 300.0);
    assert!(totals.inconsistencies().is_empty());
}

#[actix_rt::test]
async fn server_errors_are_retryable_with_body_preview() {
    let base = serve(shared());
    let gateway = gateway_at(&base, "/down", Duration::from_secs(5));

    let error = gateway.list_people().await.expect_err("gateway down");

    assert!(matches!(error, GatewayError::Server { .. }));
    assert!(error.is_retryable());
    assert_eq!(
        error.to_string(),
        "gateway server error: status 503: down for maintenance"
    );
}

#[actix_rt::test]
async fn malformed_payload_maps_to_decode() {
    let base = serve(shared());
    let gateway = gateway_at(&base, "/malformed", Duration::from_secs(5));

    let error = gateway.fetch_totals().await.expect_err("bad json");

    assert!(matches!(error, GatewayError::Decode { .. }));
    assert!(!error.is_retryable());
}

#[actix_rt::test]
async fn slow_gateway_maps_to_timeout() {
    let base = serve(shared());
    let gateway = gateway_at(&base, "/stalled", Duration::from_millis(200));

    let error = gateway.list_people().await.expect_err("request times out");

    assert!(matches!(error, GatewayError::Timeout { .. }), "got {error}");
}

#[actix_rt::test]
async fn unreachable_gateway_maps_to_transport() {
    let base = Url::parse("http://127.0.0.1:9").expect("valid url");
    let gateway = HttpLedgerGateway::new(base, Duration::from_secs(2)).expect("client builds");

    let error = gateway.list_people().await.expect_err("nothing listening");

    assert!(error.is_retryable(), "got {error}");
}
