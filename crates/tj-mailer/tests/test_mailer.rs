//! Dispatch queue behavior: FIFO ordering, inter-request spacing,
//! outcome classification, the configured latch, and teardown.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tj_core::{RecordingSink, Result};
use tj_mailer::{
    AlertType, CriterionRef, DispatchOutcome, DispatchStatus, EmailRequest, EmailTransport, Mailer,
    MailerConfig, TransportError, TransportErrorCode, UserRef,
};

/// Replays scripted results in order, then succeeds forever.
#[derive(Debug)]
struct StubTransport {
    configured: bool,
    script: Mutex<VecDeque<Result<(), TransportError>>>,
}

impl StubTransport {
    fn new(configured: bool, script: Vec<Result<(), TransportError>>) -> Self {
        Self {
            configured,
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl EmailTransport for StubTransport {
    async fn send(&self, _request: &EmailRequest) -> Result<(), TransportError> {
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

fn request(to: &str) -> EmailRequest {
    EmailRequest::new(
        to,
        AlertType::Warning,
        CriterionRef {
            id: "c1".into(),
            nome: "Coleta Seletiva".into(),
            secretaria: "Meio Ambiente".into(),
        },
        UserRef {
            id: "u1".into(),
            name: "Ana".into(),
        },
        None,
    )
}

async fn wait_for_outcomes(sink: &RecordingSink<DispatchOutcome>, n: usize) {
    while sink.len() < n {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test(start_paused = true)]
async fn outcomes_reach_the_sink_in_queue_order() {
    let sink = Arc::new(RecordingSink::new());
    let (mailer, _worker) = Mailer::spawn(
        StubTransport::new(true, vec![]),
        MailerConfig::default(),
        sink.clone(),
    );

    mailer.enqueue(request("a@jardim.ms.gov.br")).unwrap();
    mailer.enqueue(request("b@jardim.ms.gov.br")).unwrap();
    wait_for_outcomes(&sink, 2).await;

    let outcomes = sink.take();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].request.to, "a@jardim.ms.gov.br");
    assert_eq!(outcomes[0].status, DispatchStatus::Delivered);
    assert_eq!(outcomes[1].request.to, "b@jardim.ms.gov.br");
    assert_eq!(outcomes[1].status, DispatchStatus::Delivered);
}

#[tokio::test(start_paused = true)]
async fn worker_spaces_consecutive_sends() {
    let sink = Arc::new(RecordingSink::new());
    let (mailer, _worker) = Mailer::spawn(
        StubTransport::new(true, vec![]),
        MailerConfig { min_spacing_ms: 600 },
        sink.clone(),
    );

    let start = tokio::time::Instant::now();
    for to in ["a@jardim.ms.gov.br", "b@jardim.ms.gov.br", "c@jardim.ms.gov.br"] {
        mailer.enqueue(request(to)).unwrap();
    }
    wait_for_outcomes(&sink, 3).await;

    // Two full spacing intervals separate the three attempts.
    assert!(start.elapsed() >= Duration::from_millis(1200));
}

#[tokio::test(start_paused = true)]
async fn test_mode_restriction_latches_configured() {
    let sink = Arc::new(RecordingSink::new());
    let transport = StubTransport::new(
        false,
        vec![Err(TransportError::new(
            TransportErrorCode::TestModeRestricted,
            "sandbox recipient list",
        ))],
    );
    let (mailer, _worker) = Mailer::spawn(transport, MailerConfig::default(), sink.clone());
    assert!(!mailer.is_configured(), "no credentials at startup");

    mailer.enqueue(request("a@jardim.ms.gov.br")).unwrap();
    wait_for_outcomes(&sink, 1).await;

    assert_eq!(sink.take()[0].status, DispatchStatus::TestModeRestricted);
    assert!(
        mailer.is_configured(),
        "test-mode refusal proves the credentials work"
    );
}

#[tokio::test(start_paused = true)]
async fn failures_do_not_block_later_requests() {
    let sink = Arc::new(RecordingSink::new());
    let transport = StubTransport::new(
        true,
        vec![
            Err(TransportError::new(TransportErrorCode::Unauthorized, "401")),
            Err(TransportError::new(TransportErrorCode::RateLimited, "429")),
        ],
    );
    let (mailer, _worker) = Mailer::spawn(transport, MailerConfig::default(), sink.clone());

    for to in ["a@jardim.ms.gov.br", "b@jardim.ms.gov.br", "c@jardim.ms.gov.br"] {
        mailer.enqueue(request(to)).unwrap();
    }
    wait_for_outcomes(&sink, 3).await;

    let outcomes = sink.take();
    assert!(matches!(
        outcomes[0].status,
        DispatchStatus::Failed {
            code: TransportErrorCode::Unauthorized,
            ..
        }
    ));
    assert_eq!(outcomes[1].status, DispatchStatus::RateLimited);
    assert_eq!(outcomes[2].status, DispatchStatus::Delivered);
}

#[tokio::test(start_paused = true)]
async fn worker_drains_the_queue_after_the_handle_drops() {
    let sink = Arc::new(RecordingSink::new());
    let (mailer, worker) = Mailer::spawn(
        StubTransport::new(true, vec![]),
        MailerConfig::default(),
        sink.clone(),
    );

    mailer.enqueue(request("a@jardim.ms.gov.br")).unwrap();
    mailer.enqueue(request("b@jardim.ms.gov.br")).unwrap();
    drop(mailer);

    worker.await.unwrap();
    assert_eq!(sink.len(), 2, "queued requests are sent before exit");
}

#[tokio::test(start_paused = true)]
async fn enqueue_fails_once_the_worker_is_gone() {
    let sink = Arc::new(RecordingSink::new());
    let (mailer, worker) = Mailer::spawn(
        StubTransport::new(true, vec![]),
        MailerConfig::default(),
        sink.clone(),
    );

    worker.abort();
    let _ = worker.await;

    let err = mailer.enqueue(request("a@jardim.ms.gov.br")).unwrap_err();
    assert!(matches!(err, tj_core::Error::Queue(_)));
}
