use qaboard_core::{
    Answer, AnswerScope, BoardGateway, OutOfRangeError, Question, QuestionStatus,
    DELETED_PLACEHOLDER, DELETED_QUESTION_TITLE,
};
use rusqlite::{params, Connection};
use tempfile::TempDir;

fn gateway() -> BoardGateway {
    BoardGateway::connect_in_memory().unwrap()
}

/// File-backed board plus a second connection for direct row checks.
fn gateway_with_side_connection() -> (TempDir, BoardGateway, Connection) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");
    let board = BoardGateway::connect(&path).unwrap();
    let side = Connection::open(&path).unwrap();
    (dir, board, side)
}

fn rendered<T: ToString>(list: &T) -> String {
    list.to_string()
}

#[test]
fn post_question_stores_exact_fields_unresolved() {
    let (_dir, board, side) = gateway_with_side_connection();
    board
        .post_question(&Question::new("Test Title", "Test Body", "TestUser"))
        .unwrap();

    let (title, text, posted_by, resolved): (String, String, String, i64) = side
        .query_row(
            "SELECT title, text, postedBy, resolved FROM questions WHERE title = ?1;",
            ["Test Title"],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert_eq!(title, "Test Title");
    assert_eq!(text, "Test Body");
    assert_eq!(posted_by, "TestUser");
    assert_eq!(resolved, 0);
}

#[test]
fn posted_answer_shows_up_under_its_question() {
    let board = gateway();
    let qid = board
        .post_question(&Question::new("Test Question", "Test Body", "TestUser"))
        .unwrap();
    board
        .post_answer(&Answer::new("Test Answer", "AnswerUser", qid))
        .unwrap();

    let answers = board.view_answers_to_question(qid).unwrap();
    assert_eq!(answers.len(), 1);
    let text = rendered(&answers);
    assert!(text.contains("Test Answer"));
    assert!(text.contains("Posted by: AnswerUser"));
    assert!(!text.contains("(Solution)"));
}

#[test]
fn list_all_questions_renders_badge_author_and_body() {
    let board = gateway();
    let qid = board.post_question(&Question::new("T", "B", "U")).unwrap();
    board
        .post_question(&Question::new("Title2", "Body2", "User2"))
        .unwrap();

    let list = board.list_all_questions().unwrap();
    assert_eq!(list.len(), 2);

    let text = rendered(&list);
    assert!(text.contains("T"));
    assert!(text.contains("(Unresolved)"));
    assert!(text.contains("Posted by: U"));
    assert!(text.contains("B"));
    assert!(list.entries()[0].starts_with(&format!("{qid}. T (Unresolved)")));
}

#[test]
fn mark_answer_as_solution_is_idempotent() {
    let board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let aid = board.post_answer(&Answer::new("A", "V", qid)).unwrap();

    board.mark_answer_as_solution(aid).unwrap();
    let once = board.find_answer(aid).unwrap();
    board.mark_answer_as_solution(aid).unwrap();
    let twice = board.find_answer(aid).unwrap();

    assert_eq!(once, twice);
    assert!(twice.unwrap().is_solution);
}

#[test]
fn second_answer_marked_as_solution_is_the_only_badge() {
    let board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    board.post_answer(&Answer::new("first", "V", qid)).unwrap();
    let second = board.post_answer(&Answer::new("second", "W", qid)).unwrap();

    board.mark_answer_as_solution(second).unwrap();

    let answers = board.view_answers_to_question(qid).unwrap();
    let badged: Vec<_> = answers
        .entries()
        .iter()
        .filter(|entry| entry.starts_with("(Solution)"))
        .collect();
    assert_eq!(badged.len(), 1);
    assert!(badged[0].contains("second"));
}

#[test]
fn delete_question_keeps_row_and_children() {
    let (_dir, board, side) = gateway_with_side_connection();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let aid = board.post_answer(&Answer::new("A", "V", qid)).unwrap();
    board.mark_question_as_resolved(qid).unwrap();

    board.delete_question(qid).unwrap();

    let rows: i64 = side
        .query_row(
            "SELECT COUNT(*) FROM questions WHERE id = ?1;",
            params![qid],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);

    let deleted = board.find_question(qid).unwrap().unwrap();
    assert_eq!(deleted.title, DELETED_QUESTION_TITLE);
    assert_eq!(deleted.text, DELETED_PLACEHOLDER);
    assert_eq!(deleted.posted_by, DELETED_PLACEHOLDER);
    assert!(deleted.resolved);
    assert_eq!(deleted.status(), QuestionStatus::Deleted);

    assert!(board.find_answer(aid).unwrap().is_some());
    assert_eq!(board.view_answers_to_question(qid).unwrap().len(), 1);
}

#[test]
fn question_titled_like_sentinel_is_not_deleted() {
    let board = gateway();
    let qid = board
        .post_question(&Question::new(DELETED_QUESTION_TITLE, "--", "--"))
        .unwrap();

    let loaded = board.find_question(qid).unwrap().unwrap();
    assert_eq!(loaded.status(), QuestionStatus::Open);
}

#[test]
fn delete_answer_is_hard_delete() {
    let board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let aid = board.post_answer(&Answer::new("A", "V", qid)).unwrap();

    board.delete_answer(aid).unwrap();

    assert!(board.find_answer(aid).unwrap().is_none());
    assert!(board.view_answers_to_question(qid).unwrap().is_empty());
    assert!(board.delete_answer(aid).unwrap_err().is_not_found());
}

#[test]
fn show_questions_to_manage_resolves_distinct_ids() {
    let board = gateway();
    let q1 = board.post_question(&Question::new("one", "1", "U")).unwrap();
    board.post_question(&Question::new("other", "x", "V")).unwrap();
    let q2 = board.post_question(&Question::new("two", "2", "U")).unwrap();

    let list = board.show_questions_to_manage("U").unwrap();
    assert_eq!(list.len(), 2);
    let first = list.resolve_id(1).unwrap();
    let second = list.resolve_id(2).unwrap();
    assert_ne!(first, second);
    assert_eq!((first, second), (q1, q2));

    assert_eq!(
        list.resolve_id(0),
        Err(OutOfRangeError { index: 0, len: 2 })
    );
    assert_eq!(
        list.resolve_id(3),
        Err(OutOfRangeError { index: 3, len: 2 })
    );
}

#[test]
fn management_list_outlives_store_changes() {
    let board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let aid = board.post_answer(&Answer::new("mine", "U", qid)).unwrap();

    let list = board
        .show_answers_to_manage(&AnswerScope::PostedBy("U".to_string()))
        .unwrap();
    board.delete_answer(aid).unwrap();
    board.disconnect();

    assert_eq!(list.resolve_id(1), Ok(aid));
    assert!(list.to_string().starts_with("1. mine"));
}

#[test]
fn show_answers_to_manage_under_question_includes_every_author() {
    let board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let a1 = board.post_answer(&Answer::new("a", "V", qid)).unwrap();
    let a2 = board.post_answer(&Answer::new("b", "W", qid)).unwrap();
    board.post_answer(&Answer::new("c", "V", qid + 1)).unwrap();

    let list = board
        .show_answers_to_manage(&AnswerScope::UnderQuestion(qid))
        .unwrap();
    assert_eq!(list.ids().collect::<Vec<_>>(), [a1, a2]);

    let by_v = board
        .show_answers_to_manage(&AnswerScope::PostedBy("V".to_string()))
        .unwrap();
    assert_eq!(by_v.len(), 2);
}

#[test]
fn deleted_questions_drop_out_of_management_list() {
    let board = gateway();
    let q1 = board.post_question(&Question::new("one", "1", "U")).unwrap();
    board.post_question(&Question::new("two", "2", "U")).unwrap();
    board.delete_question(q1).unwrap();

    let list = board.show_questions_to_manage("U").unwrap();
    assert_eq!(list.len(), 1);
    assert!(list.to_string().contains("two"));

    let browse = board.list_all_questions().unwrap();
    assert_eq!(browse.len(), 2);
    assert!(browse.to_string().contains(DELETED_QUESTION_TITLE));
}

#[test]
fn update_operations_touch_only_their_fields() {
    let board = gateway();
    let qid = board.post_question(&Question::new("T", "B", "U")).unwrap();
    let aid = board.post_answer(&Answer::new("A", "V", qid)).unwrap();
    board.mark_answer_as_solution(aid).unwrap();

    board.update_question(qid, "T2", "B2").unwrap();
    board.update_answer(aid, "A2").unwrap();

    let question = board.find_question(qid).unwrap().unwrap();
    assert_eq!((question.title.as_str(), question.text.as_str()), ("T2", "B2"));
    assert_eq!(question.posted_by, "U");
    assert!(!question.resolved);

    let answer = board.find_answer(aid).unwrap().unwrap();
    assert_eq!(answer.text, "A2");
    assert!(answer.is_solution);
    assert_eq!(answer.under_question, qid);
}

#[test]
fn writes_to_missing_rows_report_not_found() {
    let board = gateway();

    let err = board.update_question(77, "T", "B").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation(), "question_update");
    assert!(board.update_answer(77, "x").unwrap_err().is_not_found());
    assert!(board.mark_answer_as_solution(77).unwrap_err().is_not_found());
    assert!(board.mark_question_as_resolved(77).unwrap_err().is_not_found());
    assert!(board.delete_question(77).unwrap_err().is_not_found());
}

#[test]
fn search_questions_narrows_browse_list() {
    let board = gateway();
    board
        .post_question(&Question::new("Rust traits", "dyn vs impl", "U"))
        .unwrap();
    board
        .post_question(&Question::new("SQL joins", "left or inner", "V"))
        .unwrap();

    let hits = board.search_questions("Rust").unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits.entries()[0].contains("Rust traits"));

    assert!(board.search_questions("rust").unwrap().is_empty());
}

#[test]
fn accept_solution_is_exclusive_and_resolves_question() {
    let mut board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let a1 = board.post_answer(&Answer::new("first", "V", qid)).unwrap();
    let a2 = board.post_answer(&Answer::new("second", "W", qid)).unwrap();
    board.mark_answer_as_solution(a1).unwrap();

    board.accept_solution(qid, a2).unwrap();

    assert!(!board.find_answer(a1).unwrap().unwrap().is_solution);
    assert!(board.find_answer(a2).unwrap().unwrap().is_solution);
    let question = board.find_question(qid).unwrap().unwrap();
    assert_eq!(question.status(), QuestionStatus::Resolved);
}

#[test]
fn accept_solution_with_foreign_answer_writes_nothing() {
    let mut board = gateway();
    let qid = board.post_question(&Question::new("Q", "B", "U")).unwrap();
    let other = board.post_question(&Question::new("O", "B", "U")).unwrap();
    let own = board.post_answer(&Answer::new("own", "V", qid)).unwrap();
    let foreign = board.post_answer(&Answer::new("foreign", "V", other)).unwrap();
    board.mark_answer_as_solution(own).unwrap();

    let err = board.accept_solution(qid, foreign).unwrap_err();
    assert!(err.is_not_found());

    assert!(board.find_answer(own).unwrap().unwrap().is_solution);
    assert!(!board.find_question(qid).unwrap().unwrap().resolved);
}

#[test]
fn read_failure_is_an_error_not_an_empty_list() {
    let (_dir, board, side) = gateway_with_side_connection();
    side.execute_batch("DROP TABLE answers;").unwrap();

    let err = board.view_answers_to_question(1).unwrap_err();
    assert_eq!(err.operation(), "answers_view");
    assert!(board.list_all_questions().unwrap().is_empty());
}

#[test]
fn file_backed_board_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    let board = BoardGateway::connect(&path).unwrap();
    let qid = board.post_question(&Question::new("kept", "B", "U")).unwrap();
    board.disconnect();

    let board = BoardGateway::connect(&path).unwrap();
    let loaded = board.find_question(qid).unwrap().unwrap();
    assert_eq!(loaded.title, "kept");
    board.disconnect();
}
