use std::{sync::Arc, time::Duration};

use serde_json::json;

use super::test_utils::{
    create_controller, inner_html, is_disabled, message, session_for, Call, FakePollRepository,
    Scripted,
};
use crate::dtos::requests::{CreatePollRequest, PageEvent, PollSubmission};

const PATH: &str = "/polls/create/";
const COOKIE: &str = "sessionid=s1; csrftoken=tok123";

fn submission(question: &str, choices: &[&str]) -> PageEvent {
    PageEvent::SubmitPoll(PollSubmission {
        question: question.to_owned(),
        choices: choices.iter().map(|c| c.to_string()).collect(),
    })
}

#[tokio::test]
async fn blank_choices_block_submission_locally() {
    let repo = Arc::new(FakePollRepository::new());
    let session = session_for(PATH, COOKIE, repo.clone());

    session
        .dispatch(submission("Best editor?", &["", " ", "A"]))
        .await
        .unwrap();

    let (text, class, hidden) = message(&session);
    assert_eq!(text, "Please add at least 2 choices");
    assert_eq!(class, "message error");
    assert!(!hidden);
    assert!(repo.calls().is_empty());
    assert!(!is_disabled(&session, "submitBtn"));
}

#[tokio::test]
async fn missing_token_blocks_submission_locally() {
    let repo = Arc::new(FakePollRepository::new());
    let session = session_for(PATH, "sessionid=s1", repo.clone());

    session
        .dispatch(submission("Best editor?", &["vim", "emacs"]))
        .await
        .unwrap();

    let (text, ..) = message(&session);
    assert_eq!(text, "Security token missing. Please refresh the page.");
    assert!(repo.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn successful_create_redirects_and_keeps_button_disabled() {
    let repo = Arc::new(FakePollRepository::new());
    let session = session_for(PATH, COOKIE, repo.clone());

    session
        .dispatch(submission("Best editor?", &["vim", "", " emacs "]))
        .await
        .unwrap();

    assert_eq!(
        repo.calls(),
        vec![Call::CreatePoll {
            request: CreatePollRequest {
                question: String::from("Best editor?"),
                choices: vec![String::from("vim"), String::from(" emacs ")],
            },
            token: String::from("tok123"),
        }]
    );
    let (text, class, _) = message(&session);
    assert_eq!(text, "Poll created successfully! Redirecting...");
    assert_eq!(class, "message success");
    assert!(is_disabled(&session, "submitBtn"));
    assert_eq!(inner_html(&session, "submitBtn"), "Creating...");

    tokio::time::sleep(Duration::from_millis(1_900)).await;
    assert_eq!(session.page().location(), None);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(session.page().location().as_deref(), Some("/polls/"));
}

#[tokio::test]
async fn server_detail_is_shown_and_button_restored() {
    let repo = Arc::new(FakePollRepository::new());
    repo.answer_create(Scripted::Fail(
        400,
        json!({"detail": "Question is too long"}),
    ));
    let session = session_for(PATH, COOKIE, repo);

    let patches = session
        .dispatch(submission("Best editor?", &["vim", "emacs"]))
        .await
        .unwrap();

    let (text, ..) = message(&session);
    assert_eq!(text, "Error: Question is too long");
    assert!(!is_disabled(&session, "submitBtn"));
    assert_eq!(inner_html(&session, "submitBtn"), "Create Poll");
    assert_eq!(session.page().location(), None);
    assert!(!patches.is_empty());
}

#[tokio::test]
async fn payload_without_detail_is_serialized() {
    let repo = Arc::new(FakePollRepository::new());
    repo.answer_create(Scripted::Fail(
        400,
        json!({"question": ["This field is required."]}),
    ));
    let session = session_for(PATH, COOKIE, repo);

    session
        .dispatch(submission("", &["vim", "emacs"]))
        .await
        .unwrap();

    let (text, ..) = message(&session);
    assert_eq!(
        text,
        "Error: {&quot;question&quot;:[&quot;This field is required.&quot;]}"
    );
}

#[tokio::test]
async fn network_error_restores_button() {
    let repo = Arc::new(FakePollRepository::new());
    repo.answer_create(Scripted::Network(String::from("connection reset")));
    let session = session_for(PATH, COOKIE, repo);

    session
        .dispatch(submission("Best editor?", &["vim", "emacs"]))
        .await
        .unwrap();

    let (text, class, _) = message(&session);
    assert_eq!(text, "Network error: connection reset");
    assert_eq!(class, "message error");
    assert!(!is_disabled(&session, "submitBtn"));
    assert_eq!(inner_html(&session, "submitBtn"), "Create Poll");
}

#[tokio::test]
async fn added_choices_are_numbered_and_removable() {
    let repo = Arc::new(FakePollRepository::new());
    let session = session_for(PATH, COOKIE, repo.clone());
    assert_eq!(create_controller(&session).choice_count(), 2);

    session.dispatch(PageEvent::AddChoice).await.unwrap();
    let patches = session.dispatch(PageEvent::AddChoice).await.unwrap();

    let html = inner_html(&session, "choices-container");
    assert!(html.contains(r#"placeholder="Choice 1""#));
    assert!(html.contains(r#"placeholder="Choice 3""#));
    assert!(html.contains(r#"placeholder="Choice 4""#));
    assert_eq!(html.matches("data-remove-parent").count(), 2);
    assert_eq!(create_controller(&session).choice_count(), 4);
    assert_eq!(patches.len(), 1);
    assert!(repo.calls().is_empty());
}
