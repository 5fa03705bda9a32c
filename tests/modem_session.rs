//! End-to-end sessions against the in-memory transport.

use std::time::Duration;

use lora_modem::protocol::CommandOpcode;
use lora_modem::{
    AppConfig, AppState, Application, Credentials, Error, Event, EventType, HandshakeConfig,
    MockTransport, Modem, ResultCode, TxOutcome, provision,
};

fn modem() -> Modem<MockTransport> {
    Modem::with_handshake(
        MockTransport::new(),
        HandshakeConfig::default().settle_delay(Duration::ZERO),
    )
}

fn app(period: u32) -> Application<MockTransport, fn() -> f32> {
    let config = AppConfig::default()
        .period(period)
        .lora_port(7)
        .poll_interval(Duration::ZERO);
    Application::new(modem(), (|| 21.5) as fn() -> f32, config)
}

fn codes(modem: &Modem<MockTransport>) -> Vec<u8> {
    modem
        .transport()
        .request_frames()
        .into_iter()
        .map(|f| f.expect("request frame").code)
        .collect()
}

#[test]
fn test_join_measure_transmit_cycle() {
    let mut app = app(2);

    app.modem_mut().transport_mut().push_ok(&[]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Joining);

    app.modem_mut()
        .transport_mut()
        .push_event(EventType::Joined as u8, 0, &[]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Ready);
    assert_eq!(app.counter(), 2);

    // First Ready tick sends straight away.
    let mock = app.modem_mut().transport_mut();
    mock.push_no_event();
    mock.push_ok(&[]);
    mock.push_event(EventType::TxDone as u8, 0, &[0x01]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Transmitting);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Ready);
    assert_eq!(app.counter(), 0);

    for expected in 1..=2 {
        app.modem_mut().transport_mut().push_no_event();
        app.step().unwrap();
        assert_eq!(app.state(), AppState::Ready);
        assert_eq!(app.counter(), expected);
    }

    let mock = app.modem_mut().transport_mut();
    mock.push_no_event();
    mock.push_ok(&[]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Transmitting);
    assert_eq!(app.counter(), 0);

    app.modem_mut()
        .transport_mut()
        .push_event(EventType::TxDone as u8, 0, &[0x01]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Ready);

    let modem = app.into_modem();
    let join = u8::from(CommandOpcode::Join);
    let get_event = u8::from(CommandOpcode::GetEvent);
    let request_tx = u8::from(CommandOpcode::RequestTx);
    assert_eq!(
        codes(&modem),
        vec![
            join, get_event, get_event, request_tx, get_event, get_event, get_event, get_event,
            request_tx, get_event,
        ]
    );

    let uplink = modem.transport().request_frames()[8].clone().unwrap();
    let mut expected = vec![7, 0];
    expected.extend_from_slice(&21.5_f32.to_le_bytes());
    assert_eq!(&uplink.payload[..], &expected[..]);
    assert!(modem.transport().line_changes().chunks(2).all(|pair| pair == [true, false]));
    assert!(!modem.transport().command_line());
}

#[test]
fn test_reset_while_transmitting_rejoins() {
    let mut app = app(0);
    let mock = app.modem_mut().transport_mut();
    mock.push_ok(&[]);
    mock.push_event(EventType::Joined as u8, 0, &[]);
    mock.push_no_event();
    mock.push_ok(&[]);
    app.step().unwrap();
    app.step().unwrap();
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Transmitting);

    app.modem_mut()
        .transport_mut()
        .push_event(EventType::Reset as u8, 0, &[0x00, 0x03]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Init);

    app.modem_mut().transport_mut().push_ok(&[]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Joining);
}

#[test]
fn test_downlink_does_not_interrupt_duty_cycle() {
    let mut app = app(5);
    let mock = app.modem_mut().transport_mut();
    mock.push_ok(&[]);
    mock.push_event(EventType::Joined as u8, 0, &[]);
    mock.push_no_event();
    mock.push_ok(&[]);
    mock.push_event(EventType::TxDone as u8, 0, &[0x00]);
    for _ in 0..4 {
        app.step().unwrap();
    }
    assert_eq!(app.state(), AppState::Ready);
    assert_eq!(app.counter(), 0);

    app.modem_mut()
        .transport_mut()
        .push_event(EventType::DownData as u8, 0, &[10, 40, 0, 5, 0xAA, 0xBB]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Ready);
    assert_eq!(app.counter(), 1);
}

#[test]
fn test_poll_errors_do_not_stop_the_application() {
    let mut app = app(5);
    let mock = app.modem_mut().transport_mut();
    mock.push_ok(&[]);
    mock.push_response(ResultCode::Fail, &[]);
    app.step().unwrap();
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Joining);
}

#[test]
fn test_rejected_join_propagates() {
    let mut app = app(5);
    app.modem_mut()
        .transport_mut()
        .push_response(ResultCode::Busy, &[]);
    let err = app.step().unwrap_err();
    assert!(matches!(err, Error::Command(ResultCode::Busy)));
    assert_eq!(app.state(), AppState::Init);
}

#[test]
fn test_stuck_busy_line_times_out() {
    let mut modem = Modem::with_handshake(
        MockTransport::new(),
        HandshakeConfig::default()
            .busy_timeout(Duration::from_millis(2))
            .settle_delay(Duration::ZERO),
    );
    modem.transport_mut().set_stuck_busy(true);

    let err = modem.get_version().unwrap_err();
    assert!(matches!(err, Error::HandshakeTimeout { .. }));
    assert!(modem.transport().written().is_empty());
    assert!(!modem.transport().command_line());
}

#[test]
fn test_event_drain_until_empty() {
    let mut modem = modem();
    let mock = modem.transport_mut();
    mock.push_event(EventType::Reset as u8, 2, &[0x00, 0x01]);
    mock.push_event(EventType::TxDone as u8, 1, &[0x02]);
    mock.push_event(0x7F, 0, &[0x01]);
    mock.push_no_event();

    let mut events = Vec::new();
    while let Some(event) = modem.get_event().unwrap() {
        events.push(event);
    }

    assert_eq!(events.len(), 3);
    assert_eq!(events[0], Event::Reset { counter: 1 });
    assert_eq!(events[1], Event::TxDone(TxOutcome::Confirmed));
    assert!(matches!(events[2], Event::Other { event_type: 0x7F, .. }));
    assert_eq!(modem.transport().pending(), 0);
}

#[test]
fn test_provision_then_read_identity() {
    let credentials = Credentials {
        dev_eui: "0011223344556677".parse().unwrap(),
        join_eui: "70-B3-D5-7E-D0-00-00-01".parse().unwrap(),
        nwk_key: [0x5A; 16],
    };

    let mut modem = modem();
    let mock = modem.transport_mut();
    for _ in 0..3 {
        mock.push_ok(&[]);
    }
    mock.push_ok(credentials.dev_eui.as_bytes());
    mock.push_ok(credentials.join_eui.as_bytes());
    provision(&mut modem, &credentials).unwrap();

    let set_key = modem.transport().request_frames()[2].clone().unwrap();
    assert_eq!(set_key.code, u8::from(CommandOpcode::SetNwkKey));
    assert_eq!(&set_key.payload[..], &[0x5A; 16]);
}

#[test]
fn test_truncated_tx_done_releases_transmitting() {
    let mut app = app(0);
    let mock = app.modem_mut().transport_mut();
    mock.push_ok(&[]);
    mock.push_event(EventType::Joined as u8, 0, &[]);
    mock.push_no_event();
    mock.push_ok(&[]);
    for _ in 0..3 {
        app.step().unwrap();
    }
    assert_eq!(app.state(), AppState::Transmitting);

    app.modem_mut()
        .transport_mut()
        .push_event(EventType::TxDone as u8, 0, &[]);
    app.step().unwrap();
    assert_eq!(app.state(), AppState::Ready);
}
