mod common;

use std::cell::RefCell;
use std::time::Instant;

use common::*;
use folio_view::error::{FolioError, Result};
use folio_view::net::form::{
    FormClient, FormTransport, TransportResponse, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
use folio_view::view::form::SENDING_LABEL;
use folio_view::view::ViewAction;
use rstest::rstest;

// --- MODAL ---

fn trigger(ctl: &folio_view::view::ViewController, id: &str) -> folio_view::dom::NodeId {
    ctl.registry()
        .project_triggers
        .iter()
        .find(|(_, v)| v.as_str() == id)
        .map(|(k, _)| *k)
        .unwrap()
}

#[test]
fn trigger_opens_dialog_with_project_details() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let dialog = node_by_id(&ctl, "project-modal");

    assert_eq!(ctl.on_click(trigger(&ctl, "nmap"), ms(t0, 10)), None);
    ctl.frame(ms(t0, 10));

    let doc = ctl.document();
    assert!(doc.has_class(dialog, "active"));
    assert_eq!(
        doc.text_content(node_by_id(&ctl, "modal-title")),
        "Website Scanning Using Nmap for Jain Hospital"
    );
    assert_eq!(
        doc.text_content(node_by_id(&ctl, "modal-tech")),
        "Nmap, Nmap Scripting Engine (NSE), Bash"
    );
    assert!(!doc.text_content(node_by_id(&ctl, "modal-description")).is_empty());
}

#[test]
fn only_backdrop_or_close_button_dismisses() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let dialog = node_by_id(&ctl, "project-modal");
    let title = node_by_id(&ctl, "modal-title");

    ctl.on_click(trigger(&ctl, "nmap"), ms(t0, 10));
    ctl.on_click(title, ms(t0, 20));
    assert!(ctl.modal().is_open());

    ctl.on_click(dialog, ms(t0, 30));
    ctl.frame(ms(t0, 30));
    assert!(!ctl.modal().is_open());
    assert!(!ctl.document().has_class(dialog, "active"));

    ctl.on_click(trigger(&ctl, "nmap"), ms(t0, 40));
    let close = first_with_class(&ctl, "modal-close");
    ctl.on_click(close, ms(t0, 50));
    assert!(!ctl.modal().is_open());

    ctl.open_project("nmap");
    ctl.on_escape();
    assert!(!ctl.modal().is_open());
}

#[test]
fn unknown_project_is_ignored() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let dialog = node_by_id(&ctl, "project-modal");

    assert_eq!(ctl.on_click(trigger(&ctl, "does-not-exist"), ms(t0, 10)), None);
    ctl.frame(ms(t0, 10));
    assert!(!ctl.modal().is_open());
    assert!(!ctl.document().has_class(dialog, "active"));
    assert!(!ctl.open_project("nope"));
}

#[test]
fn reopening_overwrites_previous_content() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let title = node_by_id(&ctl, "modal-title");

    ctl.open_project("vapt");
    ctl.frame(ms(t0, 10));
    let first = ctl.document().text_content(title);
    ctl.close_project();
    ctl.frame(ms(t0, 20));
    ctl.open_project("nmap");
    ctl.frame(ms(t0, 30));
    let second = ctl.document().text_content(title);

    assert_ne!(first, second);
    assert_eq!(second, "Website Scanning Using Nmap for Jain Hospital");
}

// --- FORM ---

struct MockTransport {
    reply: std::result::Result<TransportResponse, String>,
    seen: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl MockTransport {
    fn answering(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            reply: Err("connection refused".into()),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl FormTransport for MockTransport {
    fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> Result<TransportResponse> {
        self.seen
            .borrow_mut()
            .push((endpoint.to_string(), fields.to_vec()));
        self.reply.clone().map_err(FolioError::Transport)
    }
}

fn fill_and_submit(ctl: &mut folio_view::view::ViewController, t0: Instant) -> Vec<(String, String)> {
    assert!(ctl.set_field("email", "a@b.co"));
    assert!(ctl.set_field("message", "Hello there"));
    assert!(!ctl.set_field("phone", "123"));
    let submit = ctl.registry().form.as_ref().and_then(|f| f.submit).unwrap();
    match ctl.on_click(submit, ms(t0, 100)) {
        Some(ViewAction::SubmitForm(fields)) => fields,
        other => panic!("expected a submission, got {:?}", other),
    }
}

#[test]
fn success_shows_confirmation_and_clears_fields() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let fields = fill_and_submit(&mut ctl, t0);
    assert_eq!(
        fields,
        vec![
            ("email".to_string(), "a@b.co".to_string()),
            ("message".to_string(), "Hello there".to_string()),
        ]
    );

    let client = FormClient::new("https://forms.example/f/1", MockTransport::answering(200, "{\"ok\":true}"));
    let outcome = client.submit(&fields);
    ctl.finish_submit(&outcome);
    ctl.frame(ms(t0, 200));

    let slots = ctl.registry().form.clone().unwrap();
    let doc = ctl.document();
    assert_eq!(doc.text_content(slots.status.unwrap()), SUCCESS_MESSAGE);
    assert_eq!(ctl.form().unwrap().field("email"), Some(""));
    assert_eq!(ctl.form().unwrap().field("message"), Some(""));
    let email_input = slots.fields[0].1;
    let message_area = slots.fields[1].1;
    assert_eq!(doc.attr(email_input, "value"), Some(""));
    assert_eq!(doc.text_content(message_area), "");
}

#[rstest]
#[case(422, r#"{"errors":[{"message":"Email is invalid"}]}"#, "Email is invalid")]
#[case(
    422,
    r#"{"errors":[{"message":"Email is invalid"},{"message":"Message is required"}]}"#,
    "Email is invalid, Message is required"
)]
#[case(500, "Internal Server Error", FAILURE_MESSAGE)]
#[case(400, r#"{"error":"bad"}"#, FAILURE_MESSAGE)]
fn rejected_submission_reports_endpoint_errors(
    #[case] status: u16,
    #[case] body: &str,
    #[case] expected: &str,
) {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let fields = fill_and_submit(&mut ctl, t0);

    let client = FormClient::new("https://forms.example/f/1", MockTransport::answering(status, body));
    ctl.finish_submit(&client.submit(&fields));
    ctl.frame(ms(t0, 200));

    let status_node = ctl.registry().form.as_ref().and_then(|f| f.status).unwrap();
    assert_eq!(ctl.document().text_content(status_node), expected);
    // Failed submissions keep what the visitor typed.
    assert_eq!(ctl.form().unwrap().field("email"), Some("a@b.co"));
}

#[test]
fn status_text_is_placed_on_the_status_line() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    let fields = fill_and_submit(&mut ctl, t0);
    let client = FormClient::new("https://forms.example/f/1", MockTransport::answering(200, "{}"));
    ctl.finish_submit(&client.submit(&fields));
    ctl.frame(ms(t0, 200));

    let status = ctl.registry().form.as_ref().and_then(|f| f.status).unwrap();
    let text = ctl.document().node(status).children[0];
    assert_eq!(ctl.layout().get(text), ctl.layout().get(status));

    // A second outcome rewrites the same node.
    ctl.finish_submit(&folio_view::net::form::FormOutcome::failure());
    ctl.frame(ms(t0, 216));
    assert_eq!(ctl.document().node(status).children, vec![text]);
    assert_eq!(ctl.document().text_content(status), FAILURE_MESSAGE);
}

#[test]
fn network_failure_shows_generic_message() {
    let transport = MockTransport::unreachable();
    let client = FormClient::new("https://forms.example/f/1", transport);
    let outcome = client.submit(&[("email".into(), "x@y.z".into())]);
    assert!(!outcome.success);
    assert_eq!(outcome.message, FAILURE_MESSAGE);
}

#[test]
fn client_posts_once_to_its_endpoint() {
    let transport = MockTransport::answering(500, "");
    let client = FormClient::new("https://forms.example/f/1", &transport);
    let outcome = client.submit(&[("email".into(), "x@y.z".into())]);

    assert!(!outcome.success);
    let seen = transport.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "https://forms.example/f/1");
    assert_eq!(seen[0].1, vec![("email".to_string(), "x@y.z".to_string())]);
}

#[test]
fn submit_button_locks_for_three_seconds() {
    let t0 = Instant::now();
    let mut ctl = controller(t0);
    fill_and_submit(&mut ctl, t0);
    let submit = ctl.registry().form.as_ref().and_then(|f| f.submit).unwrap();

    ctl.frame(ms(t0, 100));
    assert_eq!(ctl.document().text_content(submit), SENDING_LABEL);
    assert!(ctl.document().attr(submit, "disabled").is_some());

    // A second click while locked does nothing.
    assert_eq!(ctl.on_click(submit, ms(t0, 500)), None);

    // The response arriving early does not unlock the button.
    ctl.finish_submit(&folio_view::net::form::FormOutcome::failure());
    ctl.frame(ms(t0, 3099));
    assert!(ctl.document().attr(submit, "disabled").is_some());

    ctl.frame(ms(t0, 3100));
    assert_eq!(ctl.document().text_content(submit), "Send Message");
    assert!(ctl.document().attr(submit, "disabled").is_none());
}
