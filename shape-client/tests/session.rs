use std::io::Cursor;
use std::net::SocketAddr;

use shape_client::{session, Config, InputError, SessionError};
use shape_core::ImcStatus;

async fn start_server() -> SocketAddr {
    let cfg = shape_server::Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        max_connections: 8,
        io_timeout_secs: 5,
    };
    let server = shape_server::Server::bind(&cfg).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    addr
}

fn client_config(addr: SocketAddr) -> Config {
    Config {
        server_addr: addr.to_string(),
        io_timeout_secs: 5,
    }
}

#[tokio::test]
async fn scripted_session_gets_report() {
    let addr = start_server().await;
    let mut input = Cursor::new(b"1.70 70.0\n1.70 70.0 M 3 20\n".to_vec());
    let mut out = Vec::new();

    let report = session::run(&client_config(addr), &mut input, &mut out)
        .await
        .unwrap();

    assert_eq!(report.bmr, 1667.5);
    assert_eq!(report.calorie_intake, 5002.5);
    assert_eq!(report.imc_status, ImcStatus::NormalWeight);
    assert_eq!(report.nutrients.fats, 49.0);
    let shown = String::from_utf8(out).unwrap();
    assert_eq!(shown.matches("PLEASE FILL IN ALL THE DATA TO PROCEED!").count(), 1);
}

#[tokio::test]
async fn server_fault_ends_session() {
    let addr = start_server().await;
    let mut input = Cursor::new(b"0 70.0 F 2 30\n".to_vec());
    let mut out = Vec::new();

    let res = session::run(&client_config(addr), &mut input, &mut out).await;
    assert!(matches!(res, Err(SessionError::Receive(_))));
}

#[tokio::test]
async fn closed_input_ends_session() {
    let addr = start_server().await;
    let mut input = Cursor::new(Vec::new());
    let mut out = Vec::new();

    let res = session::run(&client_config(addr), &mut input, &mut out).await;
    assert!(matches!(res, Err(SessionError::Input(InputError::Closed))));
}

#[tokio::test]
async fn refused_connection_is_not_retried() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut input = Cursor::new(b"1.70 70.0 M 3 20\n".to_vec());
    let mut out = Vec::new();

    let res = session::run(&client_config(addr), &mut input, &mut out).await;
    assert!(matches!(res, Err(SessionError::Connect { .. })));
    // Nothing was read: the profile prompt never started.
    assert_eq!(input.position(), 0);
}
