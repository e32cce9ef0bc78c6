use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::{domain::ContactRequest, domain::NotificationKind, protocol::ContactReply};
use tokio::sync::Notify;

use crate::transport::{ServerReply, TransportError};

enum Reply {
    Accepted,
    Failed(Option<&'static str>),
    Unreachable,
}

struct ScriptedTransport {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    fn new(reply: Reply) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

async fn unreachable_error() -> TransportError {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let err = reqwest::Client::new()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect_err("closed port");
    TransportError::Request(err)
}

#[async_trait]
impl ContactTransport for ScriptedTransport {
    async fn submit(&self, _request: &ContactRequest) -> Result<ServerReply, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Accepted => Ok(ServerReply {
                status: StatusCode::OK,
                body: ContactReply {
                    success: true,
                    message: Some("Message sent successfully".into()),
                    error: None,
                },
            }),
            Reply::Failed(error) => Ok(ServerReply {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ContactReply {
                    success: false,
                    message: None,
                    error: error.map(str::to_string),
                },
            }),
            Reply::Unreachable => Err(unreachable_error().await),
        }
    }
}

fn fill<T: ContactTransport>(form: &ContactForm<T>, name: &str, email: &str, message: &str) {
    form.set_field(ContactField::Name, name);
    form.set_field(ContactField::Email, email);
    form.set_field(ContactField::Message, message);
}

fn completed(outcome: SubmitOutcome) -> ContactResult {
    match outcome {
        SubmitOutcome::Completed(result) => result,
        SubmitOutcome::Ignored => panic!("submission was ignored"),
    }
}

#[tokio::test]
async fn empty_message_is_missing_fields_without_network_call() {
    let (transport, calls) = ScriptedTransport::new(Reply::Accepted);
    let form = ContactForm::new(transport, NotificationPresenter::default());
    fill(&form, "A", "a@b.com", "   ");

    let result = completed(form.submit().await);
    assert_eq!(result, ContactResult::Error(MISSING_FIELDS_MESSAGE.into()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!form.submit_control().is_disabled());
    assert_eq!(form.submit_control().label(), SUBMIT_LABEL);
}

#[tokio::test]
async fn malformed_email_is_invalid_without_network_call() {
    let (transport, calls) = ScriptedTransport::new(Reply::Accepted);
    let form = ContactForm::new(transport, NotificationPresenter::default());
    fill(&form, "A", "not-an-email", "hi");

    let result = completed(form.submit().await);
    assert_eq!(result, ContactResult::Error(INVALID_EMAIL_MESSAGE.into()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(form.fields().email, "not-an-email");
}

#[tokio::test]
async fn accepted_submission_notifies_and_clears_form() {
    let (transport, calls) = ScriptedTransport::new(Reply::Accepted);
    let form = ContactForm::new(transport, NotificationPresenter::default());
    fill(&form, "A", "a@b.com", "hi");

    let result = completed(form.submit().await);
    assert_eq!(result, ContactResult::Success(SUCCESS_MESSAGE.into()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(form.fields().is_empty());

    let banners = form.notifications().banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].0.kind, NotificationKind::Success);
    assert_eq!(banners[0].0.text, SUCCESS_MESSAGE);
    assert_eq!(form.submit_control().label(), SUBMIT_LABEL);
}

#[tokio::test]
async fn unreachable_server_keeps_form_and_reports_network_error() {
    let (transport, calls) = ScriptedTransport::new(Reply::Unreachable);
    let form = ContactForm::new(transport, NotificationPresenter::default());
    fill(&form, "A", "a@b.com", "hi");

    let result = completed(form.submit().await);
    assert_eq!(result, ContactResult::Error(NETWORK_ERROR_MESSAGE.into()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(form.fields().message, "hi");
    assert!(!form.submit_control().is_disabled());
}

#[tokio::test]
async fn server_failure_uses_server_message_or_generic_fallback() {
    let (transport, _) = ScriptedTransport::new(Reply::Failed(Some("Failed to send message")));
    let form = ContactForm::new(transport, NotificationPresenter::default());
    fill(&form, "A", "a@b.com", "hi");
    assert_eq!(
        completed(form.submit().await),
        ContactResult::Error("Failed to send message".into())
    );
    assert_eq!(form.fields().name, "A");

    let (transport, _) = ScriptedTransport::new(Reply::Failed(None));
    let form = ContactForm::new(transport, NotificationPresenter::default());
    fill(&form, "A", "a@b.com", "hi");
    assert_eq!(
        completed(form.submit().await),
        ContactResult::Error(GENERIC_FAILURE_MESSAGE.into())
    );
}

struct GatedTransport {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ContactTransport for GatedTransport {
    async fn submit(&self, _request: &ContactRequest) -> Result<ServerReply, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(ServerReply {
            status: StatusCode::OK,
            body: ContactReply {
                success: true,
                message: None,
                error: None,
            },
        })
    }
}

#[tokio::test]
async fn second_submission_while_pending_is_not_dispatched() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let form = Arc::new(ContactForm::new(
        GatedTransport {
            entered: entered.clone(),
            release: release.clone(),
            calls: calls.clone(),
        },
        NotificationPresenter::default(),
    ));
    fill(&form, "A", "a@b.com", "hi");

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    entered.notified().await;

    assert!(form.submit_control().is_disabled());
    assert_eq!(form.submit_control().label(), BUSY_LABEL);
    assert_eq!(form.submit().await, SubmitOutcome::Ignored);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    release.notify_one();
    let outcome = first.await.expect("join");
    assert!(matches!(outcome, SubmitOutcome::Completed(ContactResult::Success(_))));
    assert!(!form.submit_control().is_disabled());
}

#[test]
fn guard_releases_control_on_drop() {
    let control = SubmitControl::default();
    {
        let _guard = control.try_begin().expect("free");
        assert!(control.try_begin().is_none());
        assert_eq!(control.label(), BUSY_LABEL);
    }
    assert!(control.try_begin().is_some());
}

#[tokio::test]
async fn blur_and_focus_tones() {
    let (transport, _) = ScriptedTransport::new(Reply::Accepted);
    let form = ContactForm::new(transport, NotificationPresenter::default());
    assert_eq!(form.blur(ContactField::Name), FieldTone::Invalid);
    form.set_field(ContactField::Email, "a@b.com");
    assert_eq!(form.blur(ContactField::Email), FieldTone::Valid);
    form.set_field(ContactField::Email, "a@b");
    assert_eq!(form.blur(ContactField::Email), FieldTone::Unchanged);
    assert_eq!(form.focus(ContactField::Message), FieldTone::Focused);
}
