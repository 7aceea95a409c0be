//! End-to-end DogStatsD Tests
//!
//! Emits through a real `StatsdSink` to a local UDP socket and checks the
//! datagrams that arrive.

use serial_test::serial;
use std::net::UdpSocket;
use std::sync::Arc;
use std::time::Duration;

use statsd_shim::{MetricSink, RecordingLogger, StatsdConfig, StatsdSink};

fn receiver() -> (UdpSocket, String) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_millis(500)))
        .unwrap();
    let addr = socket.local_addr().unwrap().to_string();
    (socket, addr)
}

fn recv_line(socket: &UdpSocket) -> Option<String> {
    let mut buf = [0u8; 1024];
    match socket.recv(&mut buf) {
        Ok(n) => Some(String::from_utf8_lossy(&buf[..n]).to_string()),
        Err(_) => None,
    }
}

/// Route the facade to a local receiver for `config`.
///
/// Uses the real `configure_with` path when the standard port is free,
/// otherwise a sink built from the same config on an ephemeral port.
fn configured_receiver(config: &StatsdConfig) -> UdpSocket {
    if let Ok(socket) = UdpSocket::bind("127.0.0.1:8125") {
        socket
            .set_read_timeout(Some(Duration::from_millis(500)))
            .unwrap();
        statsd_shim::configure_with(config, Arc::new(RecordingLogger::new())).unwrap();
        return socket;
    }
    let (socket, addr) = receiver();
    let sink = StatsdSink::with_address(&addr, &config.namespace, config.tags()).unwrap();
    statsd_shim::install(Arc::new(sink), Arc::new(RecordingLogger::new()));
    socket
}

/// Tag section of a DogStatsD line, split into tags
fn wire_tags(line: &str) -> Vec<String> {
    line.split('|')
        .find_map(|part| part.strip_prefix('#'))
        .map(|tags| tags.split(',').map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

#[test]
#[serial]
fn test_env_only_tags_on_the_wire() {
    let socket = configured_receiver(&StatsdConfig::new("127.0.0.1", "shim", "prod", ""));

    statsd_shim::simple_incr("jobs.done", &[]);

    let line = recv_line(&socket).expect("datagram");
    assert_eq!(wire_tags(&line), vec!["env:prod"], "got {}", line);

    statsd_shim::disable().unwrap();
}

#[test]
#[serial]
fn test_component_only_tags_on_the_wire() {
    let socket = configured_receiver(&StatsdConfig::new("127.0.0.1", "shim", "", "api"));

    statsd_shim::simple_incr("jobs.done", &[]);

    let line = recv_line(&socket).expect("datagram");
    assert_eq!(wire_tags(&line), vec!["component:api"], "got {}", line);

    statsd_shim::disable().unwrap();
}

#[test]
#[serial]
fn test_process_environment_adds_no_tags() {
    let saved: Vec<(&str, Option<String>)> = ["DD_ENV", "DD_SERVICE", "DD_VERSION"]
        .iter()
        .map(|var| (*var, std::env::var(var).ok()))
        .collect();
    std::env::set_var("DD_ENV", "staging");
    std::env::set_var("DD_SERVICE", "billing");
    std::env::set_var("DD_VERSION", "1.2.3");

    let socket = configured_receiver(&StatsdConfig::new("127.0.0.1", "ns", "", "api"));
    statsd_shim::incr("jobs.done", &["queue:mail"], 1.0);
    let line = recv_line(&socket);

    for (var, value) in saved {
        match value {
            Some(v) => std::env::set_var(var, v),
            None => std::env::remove_var(var),
        }
    }
    statsd_shim::disable().unwrap();

    let line = line.expect("datagram");
    assert_eq!(line, "ns.jobs.done:1|c|#component:api,queue:mail");
}

#[test]
#[serial]
fn test_sample_rate_written_to_line() {
    let (socket, addr) = receiver();
    let sink = StatsdSink::with_address(&addr, "", vec![]).unwrap();

    // Retry until the 50% sample lets one through
    let mut line = None;
    for _ in 0..64 {
        sink.count("jobs.enqueued", 4, &[], 0.5).unwrap();
        socket
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();
        if let Some(l) = recv_line(&socket) {
            line = Some(l);
            break;
        }
    }
    assert_eq!(line.expect("datagram"), "jobs.enqueued:4|c|@0.5");
}

#[test]
#[serial]
fn test_facade_sends_namespaced_tagged_datagram() {
    let (socket, addr) = receiver();
    let sink = StatsdSink::with_address(&addr, "shim", vec!["env:test".to_string()]).unwrap();
    let logger = Arc::new(RecordingLogger::new());
    statsd_shim::install(Arc::new(sink), logger.clone());

    statsd_shim::simple_incr("jobs.done", &["queue:mail"]);

    let line = recv_line(&socket).expect("datagram");
    assert!(line.starts_with("shim.jobs.done:1|c"), "got {}", line);
    assert!(line.contains("env:test"), "got {}", line);
    assert!(line.contains("queue:mail"), "got {}", line);
    assert!(logger.is_empty());

    statsd_shim::disable().unwrap();
}

#[test]
#[serial]
fn test_metric_types_on_the_wire() {
    let (socket, addr) = receiver();
    let sink = StatsdSink::with_address(&addr, "", vec![]).unwrap();

    sink.count("jobs.enqueued", 3, &[], 1.0).unwrap();
    assert!(recv_line(&socket).unwrap().starts_with("jobs.enqueued:3|c"));

    sink.gauge("queue.depth", 12.0, &[], 1.0).unwrap();
    assert!(recv_line(&socket).unwrap().starts_with("queue.depth:12|g"));

    sink.histogram("payload.bytes", 512.0, &[], 1.0).unwrap();
    assert!(recv_line(&socket).unwrap().starts_with("payload.bytes:512|h"));

    sink.distribution("latency", 2.5, &[], 1.0).unwrap();
    assert!(recv_line(&socket).unwrap().starts_with("latency:2.5|d"));

    sink.timing("db.query", Duration::from_millis(40), &[], 1.0).unwrap();
    assert!(recv_line(&socket).unwrap().starts_with("db.query:40|ms"));
}

#[test]
#[serial]
fn test_zero_sample_rate_sends_nothing() {
    let (socket, addr) = receiver();
    let sink = StatsdSink::with_address(&addr, "", vec![]).unwrap();

    for _ in 0..20 {
        sink.incr("sampled.out", &[], 0.0).unwrap();
    }
    sink.incr("sampled.in", &[], 1.0).unwrap();

    let line = recv_line(&socket).unwrap();
    assert!(line.starts_with("sampled.in:1|c"), "got {}", line);
}

#[test]
#[serial]
fn test_measure_exec_time_reports_whole_millis() {
    let (socket, addr) = receiver();
    let sink = StatsdSink::with_address(&addr, "", vec![]).unwrap();
    statsd_shim::install(Arc::new(sink), Arc::new(RecordingLogger::new()));

    let start = std::time::Instant::now() - Duration::from_micros(7_400);
    let elapsed = statsd_shim::simple_measure_exec_time("task.duration", start);

    let expected = format!("task.duration:{}|h", elapsed.as_millis());
    let line = recv_line(&socket).unwrap();
    assert!(line.starts_with(&expected), "got {}", line);

    statsd_shim::disable().unwrap();
}
