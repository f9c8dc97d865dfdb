use super::*;

fn output(text: &str) -> Result<RunScriptResponse, String> {
    Ok(RunScriptResponse {
        output: Some(text.to_string()),
        error: None,
    })
}

fn submit(controller: &mut FormController) -> RequestId {
    controller.begin_submit().expect("submit accepted").request_id
}

#[test]
fn starts_idle_with_form_defaults() {
    let controller = FormController::new();
    assert_eq!(controller.option, SearchOption::CourseCode);
    assert_eq!(controller.exam_filter, ExamFilter::All);
    assert!(controller.value.is_empty());
    assert!(!controller.merge_pdfs);
    assert_eq!(controller.phase(), &FormPhase::Idle);
    assert_eq!(controller.message(), None);
}

#[test]
fn submit_snapshots_current_fields_and_enters_loading() {
    let mut controller = FormController::new();
    controller.option = SearchOption::CourseName;
    controller.value = "Computer Networks".to_string();
    controller.exam_filter = ExamFilter::Aux;
    controller.merge_pdfs = true;

    let pending = controller.begin_submit().expect("submit accepted");
    assert_eq!(
        pending.request,
        SearchRequest {
            option: SearchOption::CourseName,
            value: "Computer Networks".to_string(),
            merge_pdfs: true,
            exam_filter: ExamFilter::Aux,
        }
    );
    assert!(controller.is_loading());
    assert_eq!(controller.phase(), &FormPhase::Loading);

    controller.value = "changed after submit".to_string();
    assert_eq!(pending.request.value, "Computer Networks");
}

#[test]
fn success_output_reaches_success_state() {
    let mut controller = FormController::new();
    let id = submit(&mut controller);
    assert!(controller.complete(id, output("SUCCESS: done"), Instant::now()));
    assert_eq!(
        controller.phase(),
        &FormPhase::Success(SUCCESS_MESSAGE.to_string())
    );
    assert!(!controller.is_loading());
}

#[test]
fn no_results_output_shows_fixed_message() {
    let mut controller = FormController::new();
    let id = submit(&mut controller);
    controller.complete(id, output("No results found for X"), Instant::now());
    assert_eq!(controller.message(), Some(NO_RESULTS_MESSAGE));
    assert!(!controller.is_loading());
}

#[test]
fn server_error_is_shown_verbatim() {
    let mut controller = FormController::new();
    let id = submit(&mut controller);
    let response = RunScriptResponse {
        output: None,
        error: Some("bad input".to_string()),
    };
    controller.complete(id, Ok::<_, String>(response), Instant::now());
    assert_eq!(controller.phase(), &FormPhase::Error("bad input".to_string()));
}

#[test]
fn unrecognized_output_falls_back_to_generic_message() {
    let mut controller = FormController::new();
    let id = submit(&mut controller);
    controller.complete(id, output("Page loaded but no clear results"), Instant::now());
    assert_eq!(controller.message(), Some(GENERIC_FAILURE_MESSAGE));
}

#[test]
fn transport_failure_shows_processing_error_and_stops_loading() {
    let mut controller = FormController::new();
    let id = submit(&mut controller);
    controller.complete(
        id,
        Err::<RunScriptResponse, _>("connection refused"),
        Instant::now(),
    );
    assert_eq!(controller.message(), Some(TRANSPORT_FAILURE_MESSAGE));
    assert!(!controller.is_loading());
}

#[test]
fn overlapping_submit_is_rejected_until_completion() {
    let mut controller = FormController::new();
    let first = submit(&mut controller);
    assert!(controller.begin_submit().is_none());

    controller.complete(first, output("SUCCESS: ok"), Instant::now());
    let second = submit(&mut controller);
    assert_ne!(first, second);
}

#[test]
fn stale_completion_is_ignored() {
    let mut controller = FormController::new();
    let first = submit(&mut controller);
    controller.complete(first, output("No results found"), Instant::now());
    let second = submit(&mut controller);

    assert!(!controller.complete(first, output("SUCCESS: late"), Instant::now()));
    assert_eq!(controller.phase(), &FormPhase::Loading);

    assert!(controller.complete(second, output("SUCCESS: fresh"), Instant::now()));
    assert!(matches!(controller.phase(), FormPhase::Success(_)));
}

#[test]
fn resubmit_clears_previous_message() {
    let mut controller = FormController::new();
    let id = submit(&mut controller);
    controller.complete(id, output("No results found"), Instant::now());
    assert!(controller.message().is_some());

    submit(&mut controller);
    assert_eq!(controller.message(), None);
}

#[test]
fn success_stays_without_auto_clear() {
    let mut controller = FormController::new();
    let start = Instant::now();
    let id = submit(&mut controller);
    controller.complete(id, output("SUCCESS: done"), start);

    assert!(!controller.tick(start + Duration::from_secs(60)));
    assert_eq!(controller.message(), Some(SUCCESS_MESSAGE));
}

#[test]
fn auto_clear_returns_success_to_idle_after_window() {
    let mut controller = FormController::with_success_auto_clear();
    let start = Instant::now();
    let id = submit(&mut controller);
    controller.complete(id, output("SUCCESS: done"), start);

    assert!(!controller.tick(start + Duration::from_secs(2)));
    assert_eq!(
        controller.until_auto_clear(start + Duration::from_secs(2)),
        Some(Duration::from_secs(1))
    );
    assert!(controller.tick(start + SUCCESS_DISPLAY_DURATION));
    assert_eq!(controller.phase(), &FormPhase::Idle);
    assert_eq!(controller.until_auto_clear(start), None);
}

#[test]
fn auto_clear_never_touches_errors() {
    let mut controller = FormController::with_success_auto_clear();
    let start = Instant::now();
    let id = submit(&mut controller);
    controller.complete(id, output("No results found"), start);

    assert!(!controller.tick(start + Duration::from_secs(10)));
    assert_eq!(controller.message(), Some(NO_RESULTS_MESSAGE));
}

#[test]
fn new_submit_cancels_pending_auto_clear() {
    let mut controller = FormController::with_success_auto_clear();
    let start = Instant::now();
    let id = submit(&mut controller);
    controller.complete(id, output("SUCCESS: done"), start);

    submit(&mut controller);
    assert!(!controller.tick(start + Duration::from_secs(5)));
    assert_eq!(controller.phase(), &FormPhase::Loading);
}
