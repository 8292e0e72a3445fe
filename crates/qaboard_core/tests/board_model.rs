use qaboard_core::{Answer, Question, QuestionStatus};

#[test]
fn question_new_sets_defaults() {
    let question = Question::new("Borrowing", "Why does this not compile?", "Student A");

    assert_eq!(question.id, None);
    assert_eq!(question.title, "Borrowing");
    assert_eq!(question.text, "Why does this not compile?");
    assert_eq!(question.posted_by, "Student A");
    assert!(!question.resolved);
    assert!(!question.is_deleted);
    assert_eq!(question.status(), QuestionStatus::Open);
}

#[test]
fn answer_new_sets_defaults() {
    let answer = Answer::new("Clone it", "Student B", 4);

    assert_eq!(answer.id, None);
    assert_eq!(answer.under_question, 4);
    assert!(!answer.is_solution);
}

#[test]
fn question_serialization_uses_expected_fields() {
    let mut question = Question::new("T", "B", "U");
    question.id = Some(9);
    question.resolved = true;

    let json = serde_json::to_value(&question).unwrap();
    assert_eq!(json["id"], 9);
    assert_eq!(json["posted_by"], "U");
    assert_eq!(json["resolved"], true);
    assert_eq!(json["is_deleted"], false);
    assert_eq!(
        serde_json::to_value(question.status()).unwrap(),
        "resolved"
    );

    let decoded: Question = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, question);
}
